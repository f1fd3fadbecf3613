//! Planar geometry primitives for regions and spatial query constraints.
//!
//! Coordinates are projected map units (meters). Distance buffers on queries
//! are converted to map units and applied to the bounding box of the query
//! geometry; exact ring containment is evaluated for unbuffered queries.

use serde::{Deserialize, Serialize};

/// A point in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.xmin <= point.x && point.x <= self.xmax && self.ymin <= point.y && point.y <= self.ymax
    }

    /// Grow the box by `margin` map units on every side.
    pub fn expand(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin - margin,
            ymin: self.ymin - margin,
            xmax: self.xmax + margin,
            ymax: self.ymax + margin,
        }
    }
}

/// A polygon given by its exterior ring. The ring does not need to repeat
/// its first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub ring: Vec<Point>,
}

impl Polygon {
    pub fn new(ring: Vec<Point>) -> Self {
        Self { ring }
    }

    /// Bounding box of the ring, or `None` for an empty ring.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let first = self.ring.first()?;
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for point in &self.ring[1..] {
            bbox.xmin = bbox.xmin.min(point.x);
            bbox.ymin = bbox.ymin.min(point.y);
            bbox.xmax = bbox.xmax.max(point.x);
            bbox.ymax = bbox.ymax.max(point.y);
        }
        Some(bbox)
    }

    /// Even-odd ray cast against the exterior ring.
    pub fn contains(&self, point: Point) -> bool {
        let ring = &self.ring;
        if ring.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[j];
            let crosses = (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Distance units accepted on spatially constrained queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    Meters,
    Kilometers,
    Miles,
}

impl DistanceUnits {
    /// Convert a distance in these units to map units (meters).
    pub fn to_map_units(self, distance: f64) -> f64 {
        match self {
            DistanceUnits::Meters => distance,
            DistanceUnits::Kilometers => distance * 1_000.0,
            DistanceUnits::Miles => distance * 1_609.344,
        }
    }
}

/// Geometry of a region or of a spatial query constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Point(Point),
    Bbox(BoundingBox),
    Polygon(Polygon),
}

impl Geometry {
    /// Bounding box of the geometry, or `None` for an empty polygon.
    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Point(point) => Some(BoundingBox::new(point.x, point.y, point.x, point.y)),
            Geometry::Bbox(bbox) => Some(*bbox),
            Geometry::Polygon(polygon) => polygon.bbox(),
        }
    }

    /// Whether the geometry, buffered by `margin` map units, covers `point`.
    ///
    /// The buffer expands the bounding box; ring containment is exact only
    /// when no buffer is in play.
    pub fn covers(&self, point: Point, margin: f64) -> bool {
        match self {
            Geometry::Point(center) => {
                BoundingBox::new(center.x, center.y, center.x, center.y)
                    .expand(margin)
                    .contains(point)
            }
            Geometry::Bbox(bbox) => bbox.expand(margin).contains(point),
            Geometry::Polygon(polygon) => {
                let Some(bbox) = polygon.bbox() else {
                    return false;
                };
                if !bbox.expand(margin).contains(point) {
                    return false;
                }
                if margin > 0.0 {
                    return true;
                }
                polygon.contains(point)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains_and_expand() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains(Point::new(5.0, 5.0)));
        assert!(bbox.contains(Point::new(0.0, 10.0)));
        assert!(!bbox.contains(Point::new(-0.1, 5.0)));
        assert!(bbox.expand(1.0).contains(Point::new(-0.5, 10.5)));
    }

    #[test]
    fn test_polygon_contains() {
        // L-shaped region
        let polygon = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 4.0),
        ]);
        assert!(polygon.contains(Point::new(1.0, 1.0)));
        assert!(polygon.contains(Point::new(1.0, 3.0)));
        assert!(!polygon.contains(Point::new(3.0, 3.0)));
        assert!(!polygon.contains(Point::new(5.0, 1.0)));
    }

    #[test]
    fn test_degenerate_polygon() {
        assert!(!Polygon::new(vec![]).contains(Point::new(0.0, 0.0)));
        assert!(Polygon::new(vec![]).bbox().is_none());
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(!line.contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_geometry_covers_with_buffer() {
        let geometry = Geometry::Bbox(BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert!(!geometry.covers(Point::new(12.0, 5.0), 0.0));
        assert!(geometry.covers(Point::new(12.0, 5.0), 2.0));

        let point_geom = Geometry::Point(Point::new(100.0, 100.0));
        assert!(!point_geom.covers(Point::new(101.0, 100.0), 0.0));
        assert!(point_geom.covers(Point::new(101.0, 100.0), 1.5));
    }

    #[test]
    fn test_distance_units() {
        assert_eq!(DistanceUnits::Meters.to_map_units(250.0), 250.0);
        assert_eq!(DistanceUnits::Kilometers.to_map_units(2.0), 2000.0);
        assert!((DistanceUnits::Miles.to_map_units(1.0) - 1609.344).abs() < 1e-9);
    }
}
