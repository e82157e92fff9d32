//! Platform permission and location services consumed by the core

use crate::config::PermissionRationale;
use crate::types::{GeoPoint, PositionOptions};

/// Answer to a fine location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// The permission request itself could not be carried out
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

/// Position request failure, following the geolocation API error codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timeout")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl PositionError {
    /// Map a numeric geolocation error code (1, 2 or 3)
    pub fn from_code(code: u8, message: impl Into<String>) -> Self {
        match code {
            1 => PositionError::PermissionDenied,
            2 => PositionError::PositionUnavailable,
            3 => PositionError::Timeout,
            _ => PositionError::Other(message.into()),
        }
    }
}

/// Platform permission subsystem
pub trait PermissionService: Send + Sync {
    /// Ask the user for fine location access, once per session
    fn request_fine_location(
        &self,
        rationale: &PermissionRationale,
    ) -> impl Future<Output = Result<PermissionStatus, PlatformError>> + Send;
}

/// Platform location subsystem
pub trait LocationService: Send + Sync {
    /// Resolve a single fix with the given request parameters
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<GeoPoint, PositionError>> + Send;
}
