//! Session configuration

use crate::error::Result;
use crate::fence::{DEFAULT_HALF_SIZE, build_fence};
use crate::types::{GeoPoint, PositionOptions, Region};

/// Center used until a real fix arrives, or for the whole session if
/// permission is denied or acquisition fails
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::from_degrees(30.04657135362574, 70.64823536124274);

/// Default viewport span in degrees, on both axes
pub const DEFAULT_REGION_DELTA: f64 = 0.1;

/// Text presented by the platform permission dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRationale {
    pub title: String,
    pub message: String,
    pub button_neutral: String,
    pub button_negative: String,
    pub button_positive: String,
}

impl Default for PermissionRationale {
    fn default() -> Self {
        Self {
            title: "Location Permission".into(),
            message: "This app requires access to your location.".into(),
            button_neutral: "Ask Me Later".into(),
            button_negative: "Cancel".into(),
            button_positive: "OK".into(),
        }
    }
}

/// Configuration for a geofence session
///
/// # Example
///
/// ```
/// use geofence_core::{GeoPoint, SessionConfig};
///
/// let mut config = SessionConfig::default();
/// config
///     .with_default_center(GeoPoint::new(48.8566, 2.3522).unwrap())
///     .with_half_size(0.02);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub default_center: GeoPoint,
    pub half_size: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    /// Options for the throwaway wake-up request
    pub wake_options: PositionOptions,
    /// Options for the fix that becomes the fence center
    pub precise_options: PositionOptions,
    pub permission_rationale: PermissionRationale,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            half_size: DEFAULT_HALF_SIZE,
            latitude_delta: DEFAULT_REGION_DELTA,
            longitude_delta: DEFAULT_REGION_DELTA,
            wake_options: PositionOptions::HIGH_ACCURACY,
            precise_options: PositionOptions::HIGH_ACCURACY,
            permission_rationale: PermissionRationale::default(),
        }
    }
}

impl SessionConfig {
    /// Override the fallback center
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_default_center(&mut self, center: GeoPoint) -> &mut Self {
        self.default_center = center;
        self
    }

    /// Override the fence half size in degrees
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_half_size(&mut self, half_size: f64) -> &mut Self {
        self.half_size = half_size;
        self
    }

    /// Override the viewport span
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_region_deltas(&mut self, latitude_delta: f64, longitude_delta: f64) -> &mut Self {
        self.latitude_delta = latitude_delta;
        self.longitude_delta = longitude_delta;
        self
    }

    /// Override the wake-up request options
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_wake_options(&mut self, options: PositionOptions) -> &mut Self {
        self.wake_options = options;
        self
    }

    /// Override the high-accuracy request options
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_precise_options(&mut self, options: PositionOptions) -> &mut Self {
        self.precise_options = options;
        self
    }

    /// Override the permission dialog text
    ///
    /// Returns `&mut self` to allow method chaining.
    pub fn with_permission_rationale(&mut self, rationale: PermissionRationale) -> &mut Self {
        self.permission_rationale = rationale;
        self
    }

    /// Check that the configuration describes a usable session
    pub fn validate(&self) -> Result<()> {
        Region::validate_deltas(self.latitude_delta, self.longitude_delta)?;
        build_fence(self.default_center, self.half_size)?;
        Ok(())
    }

    /// Viewport around `center` with the configured span
    pub fn region(&self, center: GeoPoint) -> Result<Region> {
        Region::new(center, self.latitude_delta, self.longitude_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use claims::{assert_matches, assert_ok};

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_center.latitude(), 30.04657135362574);
        assert_eq!(config.default_center.longitude(), 70.64823536124274);
        assert_eq!(config.half_size, 0.05);
        assert_eq!(config.precise_options.timeout_ms, 20_000);
        assert_eq!(config.precise_options.max_age_ms, 1_000);
        assert!(config.precise_options.high_accuracy);
        assert_ok!(config.validate());
    }

    #[test]
    fn builder_chaining() {
        let mut config = SessionConfig::default();
        config.with_half_size(0.01).with_region_deltas(0.5, 0.25);

        assert_eq!(config.half_size, 0.01);
        assert_eq!(config.latitude_delta, 0.5);
        assert_eq!(config.longitude_delta, 0.25);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = SessionConfig::default();
        config.with_half_size(0.0);
        assert_matches!(config.validate(), Err(Error::InvalidHalfSize(_)));

        let mut config = SessionConfig::default();
        config.with_region_deltas(0.1, 0.0);
        assert_matches!(config.validate(), Err(Error::InvalidRegionDelta { .. }));

        let mut config = SessionConfig::default();
        config.with_default_center(GeoPoint::new(-89.99, 0.0).unwrap());
        assert_matches!(config.validate(), Err(Error::InvalidCoordinate { .. }));
    }
}
