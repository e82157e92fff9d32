//! Fence derivation from a center point

use crate::error::{Error, Result};
use crate::types::{GeoPoint, Polygon};

/// Default fence half size in degrees
///
/// The fence spans `2 * DEFAULT_HALF_SIZE` degrees on both axes, roughly
/// 11 km north-south.
pub const DEFAULT_HALF_SIZE: f64 = 0.05;

/// Build the square fence around `center`
///
/// The corners are offset by `±half_size` degrees on both axes and listed
/// as north-west, south-west, south-east, north-east.
///
/// # Errors
///
/// - `InvalidHalfSize` if `half_size` is not finite and positive
/// - `InvalidCoordinate` if a corner falls outside the valid coordinate range
pub fn build_fence(center: GeoPoint, half_size: f64) -> Result<Polygon> {
    if !half_size.is_finite() || half_size <= 0.0 {
        return Err(Error::InvalidHalfSize(half_size));
    }

    let h = half_size;
    Polygon::new(vec![
        center.offset(h, -h)?,  // NW
        center.offset(-h, -h)?, // SW
        center.offset(-h, h)?,  // SE
        center.offset(h, h)?,   // NE
    ])
}
