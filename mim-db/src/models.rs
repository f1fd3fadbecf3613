//! Row types for data retrieved from the feature store.

use mim_core::geometry::Geometry;
use mim_core::region::RegionId;
use serde::Serialize;

/// Region metadata row: identity, display name, and hit-test geometry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionInfo {
    pub region_id: RegionId,
    pub name: String,
    pub geometry: Geometry,
}
