//! CSV fixture loading for the in-memory feature store.
//!
//! # CSV Formats
//!
//! - **Regions** (has headers): `ID,NAME,XMIN,YMIN,XMAX,YMAX,RING`. The
//!   bounding box fields are required; `RING` may hold a polygon exterior
//!   ring as semicolon-separated `x y` pairs (e.g. `0 0;10 0;10 10`), and
//!   when present it replaces the box as the region geometry.
//! - **Incidents** (no headers): `incident_id,region_id,date(YYYY-MM-DD),x,y`.
//!   The month attribute is derived from the date; rows whose date does not
//!   parse are skipped.

use crate::Database;
use chrono::{Datelike, NaiveDate};
use mim_core::geometry::{BoundingBox, Geometry, Point, Polygon};
use mim_core::months::month_label;
use rusqlite::params;

impl Database {
    /// Load region metadata from a CSV string.
    ///
    /// Expected format (with headers): `ID,NAME,XMIN,YMIN,XMAX,YMAX,RING`
    ///
    /// # Example CSV
    /// ```text
    /// ID,NAME,XMIN,YMIN,XMAX,YMAX,RING
    /// 1,North County,0,0,100,100,
    /// 2,Lake County,100,0,200,100,100 0;200 0;150 100
    /// ```
    pub fn load_regions(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let region_id: i64 = r.get(0).unwrap_or("").trim().parse()?;
            let name = r.get(1).unwrap_or("").trim();
            let xmin: f64 = r.get(2).unwrap_or("0").trim().parse()?;
            let ymin: f64 = r.get(3).unwrap_or("0").trim().parse()?;
            let xmax: f64 = r.get(4).unwrap_or("0").trim().parse()?;
            let ymax: f64 = r.get(5).unwrap_or("0").trim().parse()?;

            let geometry = match r.get(6).map(str::trim) {
                Some(ring) if !ring.is_empty() => Geometry::Polygon(parse_ring(ring)?),
                _ => Geometry::Bbox(BoundingBox::new(xmin, ymin, xmax, ymax)),
            };

            conn.execute(
                "INSERT OR REPLACE INTO regions (region_id, name, geometry)
                 VALUES (?1, ?2, ?3)",
                params![region_id, name, serde_json::to_string(&geometry)?],
            )?;
            count += 1;
        }
        log::info!("[MIM Debug] loader: Loaded {} regions", count);
        Ok(())
    }

    /// Load point incidents from a CSV string.
    ///
    /// Expected format (no headers): `incident_id,region_id,date(YYYY-MM-DD),x,y`
    ///
    /// The month attribute the chart groups on is derived from the date
    /// here, at load time. Rows with unparseable dates are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// 1,1,2024-01-15,50.0,50.0
    /// 2,2,2024-03-02,150.0,40.0
    /// ```
    pub fn load_incidents(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let incident_id: i64 = r.get(0).unwrap_or("").trim().parse()?;
            let region_id: Option<i64> = r.get(1).unwrap_or("").trim().parse().ok();
            let date_str = r.get(2).unwrap_or("").trim();
            let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
                skipped += 1;
                continue;
            };
            let Some(month) = month_label(date.month()) else {
                skipped += 1;
                continue;
            };
            let x: f64 = r.get(3).unwrap_or("0").trim().parse()?;
            let y: f64 = r.get(4).unwrap_or("0").trim().parse()?;

            conn.execute(
                "INSERT OR REPLACE INTO incidents (incident_id, region_id, date, month, x, y)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![incident_id, region_id, date_str, month, x, y],
            )?;
            count += 1;
        }
        log::info!(
            "[MIM Debug] loader: Loaded {} incidents ({} skipped)",
            count,
            skipped
        );
        Ok(())
    }
}

fn parse_ring(ring: &str) -> anyhow::Result<Polygon> {
    let points = ring
        .split(';')
        .map(|pair| {
            let mut coords = pair.trim().split_whitespace();
            let x: f64 = coords
                .next()
                .ok_or_else(|| anyhow::anyhow!("ring vertex missing x: '{pair}'"))?
                .parse()?;
            let y: f64 = coords
                .next()
                .ok_or_else(|| anyhow::anyhow!("ring vertex missing y: '{pair}'"))?
                .parse()?;
            Ok(Point::new(x, y))
        })
        .collect::<anyhow::Result<Vec<Point>>>()?;
    if points.len() < 3 {
        anyhow::bail!("region ring needs at least 3 vertices, got {}", points.len());
    }
    Ok(Polygon::new(points))
}
