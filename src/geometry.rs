// 📍 Geometry - Points and geofence polygons
// Ray-casting (crossing-number) containment test over planar coordinates

use serde::{Deserialize, Serialize};

// ============================================================================
// POINT
// ============================================================================

/// A planar coordinate pair (longitude, latitude) in degrees.
///
/// Coordinates are used directly as Cartesian values by the containment
/// test. No geodesic correction is applied; at river-reach scale the
/// distortion does not change which side of a fence a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Point { lon, lat }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// The library's only failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceError {
    /// A polygon needs at least 3 vertices to enclose anything.
    InvalidPolygon { vertices: usize },
}

impl std::fmt::Display for GeofenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeofenceError::InvalidPolygon { vertices } => {
                write!(f, "invalid polygon: {} vertices (minimum 3)", vertices)
            }
        }
    }
}

impl std::error::Error for GeofenceError {}

// ============================================================================
// POLYGON
// ============================================================================

/// An ordered, closed vertex ring.
///
/// The last-to-first edge is implicit: callers do not repeat the first
/// vertex at the end. Winding order does not matter for containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from its vertex ring.
    ///
    /// Vertex count is NOT validated here; `contains` reports
    /// `InvalidPolygon` when asked to test against a degenerate ring,
    /// so a misconfigured fence fails at query time, not load time.
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Ray-casting containment test.
    ///
    /// Casts a horizontal ray from `point` toward +X and counts edge
    /// crossings; an odd count means inside. An edge is only considered
    /// when exactly one of its endpoints lies strictly above the query's
    /// Y, which is what keeps queries at a vertex's exact latitude
    /// consistent. Points exactly on an edge get whatever the float
    /// arithmetic decides; callers must not rely on boundary results.
    pub fn contains(&self, point: Point) -> Result<bool, GeofenceError> {
        if self.vertices.len() < 3 {
            return Err(GeofenceError::InvalidPolygon {
                vertices: self.vertices.len(),
            });
        }

        let mut inside = false;
        let mut j = self.vertices.len() - 1;

        for i in 0..self.vertices.len() {
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            // Exactly one endpoint strictly above the query's horizontal line.
            if (vi.lat > point.lat) != (vj.lat > point.lat) {
                let dy = vj.lat - vi.lat;

                // An edge that is horizontal to within float resolution
                // cannot cross the ray; skip it rather than divide by ~0.
                if dy.abs() > f64::EPSILON {
                    let x_cross = vi.lon + (point.lat - vi.lat) * (vj.lon - vi.lon) / dy;
                    if point.lon < x_cross {
                        inside = !inside;
                    }
                }
            }

            j = i;
        }

        Ok(inside)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_point_inside_unit_square() {
        let square = unit_square();
        assert!(square.contains(Point::new(0.5, 0.5)).unwrap());
        assert!(square.contains(Point::new(0.1, 0.9)).unwrap());
    }

    #[test]
    fn test_point_outside_unit_square() {
        let square = unit_square();
        assert!(!square.contains(Point::new(2.0, 2.0)).unwrap());
        assert!(!square.contains(Point::new(-0.5, 0.5)).unwrap());
        assert!(!square.contains(Point::new(0.5, -0.5)).unwrap());
    }

    #[test]
    fn test_translation_invariance() {
        let offsets = [(10.0, -3.5), (-87.0, 25.0), (0.001, 0.001)];
        let queries = [Point::new(0.5, 0.5), Point::new(2.0, 2.0), Point::new(0.9, 0.1)];

        for (dx, dy) in offsets {
            let shifted = Polygon::new(
                unit_square()
                    .vertices()
                    .iter()
                    .map(|v| Point::new(v.lon + dx, v.lat + dy))
                    .collect(),
            );
            for q in queries {
                let base = unit_square().contains(q).unwrap();
                let moved = shifted.contains(Point::new(q.lon + dx, q.lat + dy)).unwrap();
                assert_eq!(base, moved, "offset ({}, {}) changed result for {:?}", dx, dy, q);
            }
        }
    }

    #[test]
    fn test_winding_order_invariance() {
        let mut reversed_vertices = unit_square().vertices().to_vec();
        reversed_vertices.reverse();
        let reversed = Polygon::new(reversed_vertices);

        for q in [
            Point::new(0.5, 0.5),
            Point::new(2.0, 2.0),
            Point::new(-1.0, 0.5),
            Point::new(0.99, 0.99),
        ] {
            assert_eq!(
                unit_square().contains(q).unwrap(),
                reversed.contains(q).unwrap(),
                "winding order changed result for {:?}",
                q
            );
        }
    }

    #[test]
    fn test_concave_polygon() {
        // U-shape: the notch between the arms is outside.
        let u_shape = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(0.0, 3.0),
        ]);

        assert!(u_shape.contains(Point::new(0.5, 2.0)).unwrap()); // left arm
        assert!(u_shape.contains(Point::new(2.5, 2.0)).unwrap()); // right arm
        assert!(u_shape.contains(Point::new(1.5, 0.5)).unwrap()); // base
        assert!(!u_shape.contains(Point::new(1.5, 2.0)).unwrap()); // notch
    }

    #[test]
    fn test_river_danger_zone_scenario() {
        let zone = Polygon::new(vec![
            Point::new(87.010, 25.285),
            Point::new(87.040, 25.285),
            Point::new(87.040, 25.305),
            Point::new(87.010, 25.305),
        ]);

        assert!(zone.contains(Point::new(87.025, 25.295)).unwrap());
        assert!(!zone.contains(Point::new(86.000, 25.000)).unwrap());
    }

    #[test]
    fn test_two_vertex_polygon_is_invalid() {
        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(
            degenerate.contains(Point::new(0.5, 0.5)),
            Err(GeofenceError::InvalidPolygon { vertices: 2 })
        );
    }

    #[test]
    fn test_empty_polygon_is_invalid() {
        let empty = Polygon::new(Vec::new());
        assert_eq!(
            empty.contains(Point::new(0.0, 0.0)),
            Err(GeofenceError::InvalidPolygon { vertices: 0 })
        );
    }

    #[test]
    fn test_query_at_vertex_latitude() {
        // Query sharing a Y with two vertices of the square must still
        // resolve cleanly on both sides thanks to the strict comparison.
        let square = unit_square();
        assert!(square.contains(Point::new(0.5, 0.0000001)).unwrap());
        assert!(!square.contains(Point::new(5.0, 1.0)).unwrap());
    }
}
