use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};

/// Region identifier: the feature id of the region layer.
pub type RegionId = i64;

/// A region resolved under the pointer by a hit test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionHit {
    pub region_id: RegionId,
    pub geometry: Geometry,
}
