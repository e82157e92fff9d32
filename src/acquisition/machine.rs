use crate::acquisition::{PermissionStatus, PositionError};
use crate::config::SessionConfig;
use crate::error::Error;
use crate::types::{GeoPoint, PositionOptions};
use tracing::debug;

/// Where the acquisition flow currently stands
///
/// `PermissionDenied`, `Acquired` and `Failed` end the flow for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionState {
    Unrequested,
    PermissionDenied,
    AwaitingFix,
    Acquired(GeoPoint),
    Failed(AcquisitionFailure),
}

impl AcquisitionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AcquisitionState::PermissionDenied
                | AcquisitionState::Acquired(_)
                | AcquisitionState::Failed(_)
        )
    }
}

/// Why acquisition stopped without a fix
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionFailure {
    /// The wake-up request failed
    LocationServicesDisabled(PositionError),
    /// The high-accuracy request failed or timed out
    PreciseFix(PositionError),
    /// The permission request could not be carried out
    PermissionRequest(String),
}

impl From<&AcquisitionFailure> for Error {
    fn from(failure: &AcquisitionFailure) -> Self {
        match failure {
            AcquisitionFailure::LocationServicesDisabled(_) => Error::LocationServicesDisabled,
            AcquisitionFailure::PreciseFix(PositionError::Timeout) => Error::AcquisitionTimeout,
            AcquisitionFailure::PreciseFix(err) => Error::AcquisitionError(err.to_string()),
            AcquisitionFailure::PermissionRequest(msg) => Error::PermissionRequestFailed(msg.clone()),
        }
    }
}

/// Completion delivered by the platform
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionEvent {
    PermissionResolved(PermissionStatus),
    PermissionRequestFailed(String),
    WakeFixCompleted(Result<GeoPoint, PositionError>),
    PreciseFixCompleted(Result<GeoPoint, PositionError>),
}

/// Next step the caller must carry out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    RequestPermission,
    /// Issue the wake-up request, its fix is discarded
    RequestWakeFix(PositionOptions),
    RequestPreciseFix(PositionOptions),
    /// Rebuild the fence around this point
    Publish(GeoPoint),
    NotifyPermissionDenied,
    PromptLocationSettings,
    /// Log the failure held in the current state
    ReportFailure,
    /// Nothing to do
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Permission,
    WakeFix,
    PreciseFix,
}

/// Explicit state machine for permission and fix acquisition
///
/// The machine performs no I/O. [`start`](Self::start) and
/// [`handle`](Self::handle) return a [`Command`] for the caller to execute,
/// whose completion is fed back as an [`AcquisitionEvent`]. Events that do
/// not answer the outstanding request are ignored.
///
/// ```
/// use geofence_core::{AcquisitionEvent, Command, LocationAcquisition, PermissionStatus};
///
/// let mut machine = LocationAcquisition::default();
/// assert_eq!(machine.start(), Command::RequestPermission);
///
/// let command = machine.handle(AcquisitionEvent::PermissionResolved(PermissionStatus::Denied));
/// assert_eq!(command, Command::NotifyPermissionDenied);
/// assert!(machine.state().is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct LocationAcquisition {
    state: AcquisitionState,
    pending: Option<Pending>,
    wake_options: PositionOptions,
    precise_options: PositionOptions,
}

impl Default for LocationAcquisition {
    fn default() -> Self {
        Self::new(PositionOptions::HIGH_ACCURACY, PositionOptions::HIGH_ACCURACY)
    }
}

impl LocationAcquisition {
    pub fn new(wake_options: PositionOptions, precise_options: PositionOptions) -> Self {
        Self {
            state: AcquisitionState::Unrequested,
            pending: None,
            wake_options,
            precise_options,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.wake_options, config.precise_options)
    }

    pub fn state(&self) -> &AcquisitionState {
        &self.state
    }

    pub fn into_state(self) -> AcquisitionState {
        self.state
    }

    /// Begin the flow by requesting permission
    ///
    /// Returns `Idle` if the flow was already started.
    pub fn start(&mut self) -> Command {
        if self.state != AcquisitionState::Unrequested || self.pending.is_some() {
            debug!(state = ?self.state, "Acquisition already started");
            return Command::Idle;
        }
        self.pending = Some(Pending::Permission);
        Command::RequestPermission
    }

    /// Apply a platform completion and return the next step
    pub fn handle(&mut self, event: AcquisitionEvent) -> Command {
        use AcquisitionEvent::*;

        match (self.pending, event) {
            (Some(Pending::Permission), PermissionResolved(PermissionStatus::Granted)) => {
                self.transition(AcquisitionState::AwaitingFix, Some(Pending::WakeFix));
                Command::RequestWakeFix(self.wake_options)
            }
            (Some(Pending::Permission), PermissionResolved(PermissionStatus::Denied)) => {
                self.transition(AcquisitionState::PermissionDenied, None);
                Command::NotifyPermissionDenied
            }
            (Some(Pending::Permission), PermissionRequestFailed(msg)) => {
                let failure = AcquisitionFailure::PermissionRequest(msg);
                self.transition(AcquisitionState::Failed(failure), None);
                Command::ReportFailure
            }
            (Some(Pending::WakeFix), WakeFixCompleted(Ok(_))) => {
                self.transition(AcquisitionState::AwaitingFix, Some(Pending::PreciseFix));
                Command::RequestPreciseFix(self.precise_options)
            }
            (Some(Pending::WakeFix), WakeFixCompleted(Err(err))) => {
                let failure = AcquisitionFailure::LocationServicesDisabled(err);
                self.transition(AcquisitionState::Failed(failure), None);
                Command::PromptLocationSettings
            }
            (Some(Pending::PreciseFix), PreciseFixCompleted(Ok(point))) => {
                self.transition(AcquisitionState::Acquired(point), None);
                Command::Publish(point)
            }
            (Some(Pending::PreciseFix), PreciseFixCompleted(Err(err))) => {
                let failure = AcquisitionFailure::PreciseFix(err);
                self.transition(AcquisitionState::Failed(failure), None);
                Command::ReportFailure
            }
            (pending, event) => {
                debug!(?pending, ?event, "Ignoring unexpected acquisition event");
                Command::Idle
            }
        }
    }

    fn transition(&mut self, state: AcquisitionState, pending: Option<Pending>) {
        debug!(from = ?self.state, to = ?state, "Acquisition transition");
        self.state = state;
        self.pending = pending;
    }
}
