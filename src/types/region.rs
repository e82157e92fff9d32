use crate::error::{Error, Result};
use crate::types::GeoPoint;

/// A map viewport: a center point plus the visible span in degrees
///
/// Not used by the containment test. The presentation layer uses it to frame
/// the map around the current fence center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: GeoPoint,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Create a region, rejecting non-positive or non-finite deltas
    pub fn new(center: GeoPoint, latitude_delta: f64, longitude_delta: f64) -> Result<Self> {
        Self::validate_deltas(latitude_delta, longitude_delta)?;
        Ok(Self {
            center,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Move the viewport to a new center, keeping the current span
    pub fn with_center(&self, center: GeoPoint) -> Self {
        Self { center, ..*self }
    }

    pub(crate) fn validate_deltas(latitude_delta: f64, longitude_delta: f64) -> Result<()> {
        let valid = |d: f64| d.is_finite() && d > 0.0;
        if !valid(latitude_delta) || !valid(longitude_delta) {
            return Err(Error::InvalidRegionDelta {
                latitude_delta,
                longitude_delta,
            });
        }
        Ok(())
    }
}
