//! Typed query methods and the feature-source seam of the store.
//!
//! The base grouped-count query is pure SQL (`GROUP BY month`); spatially
//! constrained queries pre-filter candidates with the constraint's bounding
//! box in SQL and refine each candidate point against the exact geometry,
//! honoring any distance buffer.

use crate::models::RegionInfo;
use crate::Database;
use mim_core::geometry::{Geometry, Point};
use mim_core::observation::{Feature, FeatureSet};
use mim_core::query::{QuerySpec, SpatialConstraint, SpatialRelationship, StatisticType};
use mim_core::region::RegionHit;
use mim_core::source::FeatureSource;
use rusqlite::params;
use std::collections::BTreeMap;

impl Database {
    /// Get all regions, ordered by region id.
    pub fn query_regions(&self) -> anyhow::Result<Vec<RegionInfo>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT region_id, name, geometry FROM regions ORDER BY region_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut regions = Vec::with_capacity(rows.len());
        for (region_id, name, geometry_json) in rows {
            let geometry: Geometry = serde_json::from_str(&geometry_json)?;
            regions.push(RegionInfo {
                region_id,
                name,
                geometry,
            });
        }
        log::info!(
            "[MIM Debug] query: query_regions returned {} records",
            regions.len()
        );
        Ok(regions)
    }

    /// Resolve the region under a map point, if any.
    ///
    /// This is the store-side stand-in for the map view's hit test against
    /// the region layer. When regions overlap, the lowest region id wins.
    pub fn hit_test(&self, x: f64, y: f64) -> anyhow::Result<Option<RegionHit>> {
        let point = Point::new(x, y);
        let hit = self
            .query_regions()?
            .into_iter()
            .find(|region| region.geometry.covers(point, 0.0))
            .map(|region| RegionHit {
                region_id: region.region_id,
                geometry: region.geometry,
            });
        Ok(hit)
    }

    /// Grouped incident counts per month label, optionally scoped to a
    /// spatial constraint. Months with no incidents are absent from the
    /// result; densification happens downstream in the chart matrix.
    pub fn query_month_counts(
        &self,
        spatial: Option<&SpatialConstraint>,
    ) -> anyhow::Result<Vec<(String, i64)>> {
        let conn = self.conn.borrow();
        let rows = match spatial {
            None => {
                let mut stmt = conn.prepare(
                    "SELECT month, COUNT(*) as value
                     FROM incidents
                     GROUP BY month
                     ORDER BY month",
                )?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            Some(constraint) => {
                let Some(bbox) = constraint.geometry.bbox() else {
                    return Ok(Vec::new());
                };
                let margin = constraint.buffer();
                let bbox = bbox.expand(margin);
                let mut stmt = conn.prepare(
                    "SELECT month, x, y FROM incidents
                     WHERE x >= ?1 AND x <= ?2 AND y >= ?3 AND y <= ?4",
                )?;
                let candidates = stmt
                    .query_map(params![bbox.xmin, bbox.xmax, bbox.ymin, bbox.ymax], |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, f64>(1)?,
                            row.get::<_, f64>(2)?,
                        ))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                let mut counts: BTreeMap<String, i64> = BTreeMap::new();
                for (month, x, y) in candidates {
                    if constraint.geometry.covers(Point::new(x, y), margin) {
                        *counts.entry(month).or_default() += 1;
                    }
                }
                counts.into_iter().collect()
            }
        };
        log::info!(
            "[MIM Debug] query: query_month_counts returned {} groups",
            rows.len()
        );
        Ok(rows)
    }
}

impl FeatureSource for Database {
    /// Execute a grouped-count query specification.
    ///
    /// Supports exactly the shape the dashboard builds: one count statistic
    /// grouped by a single field, with an optional `intersects` constraint.
    fn query_features(&self, query: &QuerySpec) -> anyhow::Result<FeatureSet> {
        let group_field = query
            .group_by_fields
            .first()
            .ok_or_else(|| anyhow::anyhow!("query has no group-by field"))?;
        if !query
            .out_statistics
            .iter()
            .any(|stat| stat.statistic_type == StatisticType::Count)
        {
            anyhow::bail!("query requests no count statistic");
        }
        if let Some(constraint) = &query.spatial {
            if constraint.spatial_relationship != SpatialRelationship::Intersects {
                anyhow::bail!(
                    "unsupported spatial relationship {:?}",
                    constraint.spatial_relationship
                );
            }
        }

        let counts = self.query_month_counts(query.spatial.as_ref())?;
        let features = counts
            .into_iter()
            .map(|(month, value)| Feature::grouped_count(group_field, &month, value as u64))
            .collect();
        Ok(FeatureSet { features })
    }
}
