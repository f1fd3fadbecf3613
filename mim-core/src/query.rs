//! Construction of grouped-count statistics queries and layer filters.
//!
//! [`grouped_count_query`] is pure construction: it produces a [`QuerySpec`]
//! describing a count statistic grouped by a named field, optionally scoped
//! to a spatial constraint. Execution belongs to the feature source.

use crate::geometry::{DistanceUnits, Geometry};
use serde::{Deserialize, Serialize};

/// Attribute field the chart groups on.
pub const MONTH_FIELD: &str = "MonthName";

/// Out-field name carrying the grouped count in query responses.
pub const COUNT_FIELD: &str = "value";

/// Exclusion styling applied to features outside a spatial filter.
pub const EXCLUDED_EFFECT: &str = "grayscale(90%) opacity(15%)";

/// Statistic kinds a feature source can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticType {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// One output statistic requested from the feature source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticDefinition {
    pub on_statistic_field: String,
    pub out_statistic_field_name: String,
    pub statistic_type: StatisticType,
}

impl StatisticDefinition {
    /// A `COUNT(*)`-style statistic written to [`COUNT_FIELD`].
    pub fn count() -> Self {
        Self {
            on_statistic_field: "1".to_string(),
            out_statistic_field_name: COUNT_FIELD.to_string(),
            statistic_type: StatisticType::Count,
        }
    }
}

/// Spatial relationship between the query geometry and candidate features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialRelationship {
    Intersects,
    Contains,
    Within,
}

/// Spatial constraint attached to a statistics query or layer filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialConstraint {
    pub geometry: Geometry,
    pub spatial_relationship: SpatialRelationship,
    pub distance: Option<f64>,
    pub units: Option<DistanceUnits>,
}

impl SpatialConstraint {
    /// An `intersects` constraint with no distance buffer.
    pub fn intersects(geometry: Geometry) -> Self {
        Self {
            geometry,
            spatial_relationship: SpatialRelationship::Intersects,
            distance: None,
            units: None,
        }
    }

    /// Buffer distance in map units; zero when no distance is set.
    /// A distance without units is taken to already be in map units.
    pub fn buffer(&self) -> f64 {
        match self.distance {
            Some(distance) => self
                .units
                .map_or(distance, |units| units.to_map_units(distance)),
            None => 0.0,
        }
    }
}

/// A query specification for the feature source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub out_statistics: Vec<StatisticDefinition>,
    pub group_by_fields: Vec<String>,
    pub spatial: Option<SpatialConstraint>,
    pub return_query_geometry: bool,
}

/// Build a grouped-count query over `group_field`, optionally scoped to a
/// spatial constraint.
pub fn grouped_count_query(group_field: &str, spatial: Option<SpatialConstraint>) -> QuerySpec {
    QuerySpec {
        out_statistics: vec![StatisticDefinition::count()],
        group_by_fields: vec![group_field.to_string()],
        spatial,
        return_query_geometry: true,
    }
}

/// Layer filter: a month equality predicate and/or a spatial constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureFilter {
    pub where_clause: Option<String>,
    pub spatial: Option<SpatialConstraint>,
}

impl FeatureFilter {
    /// Filter the layer to features of a single month.
    pub fn month_equals(month: &str) -> Self {
        Self {
            where_clause: Some(format!("Month = '{month}'")),
            spatial: None,
        }
    }

    /// Filter the layer to features matching a spatial constraint.
    pub fn spatial(constraint: SpatialConstraint) -> Self {
        Self {
            where_clause: None,
            spatial: Some(constraint),
        }
    }
}

/// Visual effect that de-emphasizes features excluded by a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEffect {
    pub filter: FeatureFilter,
    pub excluded_effect: String,
}

impl FeatureEffect {
    /// Default exclusion styling for features outside `constraint`.
    pub fn excluding(constraint: SpatialConstraint) -> Self {
        Self {
            filter: FeatureFilter::spatial(constraint),
            excluded_effect: EXCLUDED_EFFECT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Point};

    #[test]
    fn test_grouped_count_query_base() {
        let spec = grouped_count_query(MONTH_FIELD, None);
        assert_eq!(spec.group_by_fields, vec![MONTH_FIELD.to_string()]);
        assert_eq!(spec.out_statistics.len(), 1);
        let stat = &spec.out_statistics[0];
        assert_eq!(stat.statistic_type, StatisticType::Count);
        assert_eq!(stat.out_statistic_field_name, COUNT_FIELD);
        assert!(spec.spatial.is_none());
    }

    #[test]
    fn test_grouped_count_query_spatial() {
        let geometry = Geometry::Bbox(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        let spec = grouped_count_query(
            MONTH_FIELD,
            Some(SpatialConstraint::intersects(geometry.clone())),
        );
        let spatial = spec.spatial.unwrap();
        assert_eq!(spatial.geometry, geometry);
        assert_eq!(spatial.spatial_relationship, SpatialRelationship::Intersects);
        assert_eq!(spatial.buffer(), 0.0);
    }

    #[test]
    fn test_constraint_buffer_units() {
        let mut constraint =
            SpatialConstraint::intersects(Geometry::Point(Point::new(0.0, 0.0)));
        constraint.distance = Some(2.0);
        assert_eq!(constraint.buffer(), 2.0);
        constraint.units = Some(DistanceUnits::Kilometers);
        assert_eq!(constraint.buffer(), 2000.0);
    }

    #[test]
    fn test_month_filter_clause() {
        let filter = FeatureFilter::month_equals("June");
        assert_eq!(filter.where_clause.as_deref(), Some("Month = 'June'"));
        assert!(filter.spatial.is_none());
    }
}
