use crate::error::{Error, Result};

/// A geographic position in decimal degrees
///
/// Coordinates are validated on construction: latitude must lie within
/// `[-90, 90]` and longitude within `[-180, 180]`. Non-finite values are
/// rejected as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Construct without validation, for in-range constants only
    pub(crate) const fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Offset this point by the given deltas in degrees
    ///
    /// Fails with `InvalidCoordinate` if the result leaves the valid range.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Result<Self> {
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = Error;

    /// Convert from a `(latitude, longitude)` tuple
    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self> {
        Self::new(latitude, longitude)
    }
}
