//! Point-in-polygon test on the flat latitude/longitude plane
//!
//! Uses the even-odd (ray casting) rule. Latitude plays the role of `x` and
//! longitude the role of `y`; each edge whose longitude span straddles the
//! point and whose crossing lies at a greater latitude toggles the result.
//!
//! Edges of constant longitude never straddle a point and are skipped.
//! Points exactly on an edge or vertex get a deterministic but unspecified
//! verdict.

use crate::error::Result;
use crate::types::{GeoPoint, Polygon};

/// Test whether `point` lies inside `polygon`
pub fn contains(point: GeoPoint, polygon: &Polygon) -> bool {
    crossings_odd(point, polygon.edges())
}

/// Test against a raw vertex slice
///
/// # Errors
///
/// `InvalidPolygon` if fewer than three vertices are given.
pub fn contains_vertices(point: GeoPoint, vertices: &[GeoPoint]) -> Result<bool> {
    let polygon = Polygon::new(vertices.to_vec())?;
    Ok(contains(point, &polygon))
}

fn crossings_odd(point: GeoPoint, edges: impl Iterator<Item = (GeoPoint, GeoPoint)>) -> bool {
    let x = point.latitude();
    let y = point.longitude();

    let mut inside = false;
    for (vi, vj) in edges {
        let (xi, yi) = (vi.latitude(), vi.longitude());
        let (xj, yj) = (vj.latitude(), vj.longitude());

        // The first check guarantees yi != yj, so the division is safe
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
    }

    inside
}
