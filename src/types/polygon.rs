use crate::error::{Error, Result};
use crate::types::GeoPoint;

/// Minimum number of vertices for a closed polygon
pub const MIN_VERTICES: usize = 3;

/// An implicitly closed polygon
///
/// The last vertex connects back to the first. Vertex order (winding) is
/// preserved as given. Polygons are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<GeoPoint>,
}

impl Polygon {
    /// Create a polygon from at least three vertices
    pub fn new(vertices: Vec<GeoPoint>) -> Result<Self> {
        if vertices.len() < MIN_VERTICES {
            return Err(Error::InvalidPolygon {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`, a polygon has at least three vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the edges, including the closing edge `(last, first)`
    pub fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl TryFrom<Vec<GeoPoint>> for Polygon {
    type Error = Error;

    fn try_from(vertices: Vec<GeoPoint>) -> Result<Self> {
        Self::new(vertices)
    }
}
