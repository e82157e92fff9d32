/// Errors raised by the geofence core
///
/// Geometric precondition errors (`InvalidCoordinate`, `InvalidPolygon`,
/// `InvalidHalfSize`, `InvalidRegionDelta`, `FenceNotInitialized`) are contract
/// violations by the caller. The remaining variants describe acquisition
/// outcomes that a session degrades from gracefully.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid polygon: {vertices} vertices (at least 3 required)")]
    InvalidPolygon { vertices: usize },

    #[error("Invalid fence half size: {0} (must be finite and > 0)")]
    InvalidHalfSize(f64),

    #[error("Invalid region deltas: {latitude_delta} x {longitude_delta} (must be finite and > 0)")]
    InvalidRegionDelta {
        latitude_delta: f64,
        longitude_delta: f64,
    },

    #[error("Fence not initialized")]
    FenceNotInitialized,

    #[error("Session closed")]
    SessionClosed,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location services disabled")]
    LocationServicesDisabled,

    #[error("Location request timed out")]
    AcquisitionTimeout,

    #[error("Location request failed: {0}")]
    AcquisitionError(String),

    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn display_messages() {
        let err = Error::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert_snapshot!(err.to_string(), @"Invalid coordinate: latitude 91, longitude 0");

        let err = Error::InvalidPolygon { vertices: 2 };
        assert_snapshot!(err.to_string(), @"Invalid polygon: 2 vertices (at least 3 required)");

        let err = Error::AcquisitionError("position unavailable".into());
        assert_snapshot!(err.to_string(), @"Location request failed: position unavailable");
    }
}
