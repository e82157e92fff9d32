//! A single geofence session

use crate::acquisition::{
    AcquisitionFailure, AcquisitionState, LocationService, PermissionService, acquire,
};
use crate::config::SessionConfig;
use crate::controller::GeofenceController;
use crate::error::Result;
use crate::notify::{NotificationSink, PromptAction, SettingsEscalation};
use crate::types::{ContainmentVerdict, GeoPoint};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Ties the controller, the acquisition flow and the presentation hooks
/// together
///
/// The fence starts around the configured default center, so marker moves
/// are answered before any fix arrives.
pub struct GeofenceSession<S> {
    config: SessionConfig,
    controller: GeofenceController<S>,
    escalation: Option<Box<dyn SettingsEscalation>>,
    acquisition: Mutex<AcquisitionState>,
    started: AtomicBool,
}

impl<S: NotificationSink> GeofenceSession<S> {
    /// Create a session with the fence built around `config.default_center`
    pub fn new(config: SessionConfig, sink: S) -> Result<Self> {
        let controller = GeofenceController::new(&config, sink)?;
        controller.initialize(config.default_center)?;

        Ok(Self {
            config,
            controller,
            escalation: None,
            acquisition: Mutex::new(AcquisitionState::Unrequested),
            started: AtomicBool::new(false),
        })
    }

    /// Install the hook used when the user chooses "Open Settings"
    pub fn with_settings_escalation(mut self, hook: impl SettingsEscalation + 'static) -> Self {
        self.escalation = Some(Box::new(hook));
        self
    }

    /// Run permission and fix acquisition once
    ///
    /// Later calls return the current state without touching the platform.
    pub async fn start_acquisition<P, L>(&self, permissions: &P, location: &L) -> AcquisitionState
    where
        P: PermissionService,
        L: LocationService,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Acquisition already started for this session");
            return self.acquisition_state();
        }

        acquire(&self.controller, permissions, location, &self.config, |state| {
            *self.lock_acquisition() = state.clone();
        })
        .await
    }

    /// Marker placed by a map press or moved by a drag
    pub fn marker_moved(&self, position: GeoPoint) -> Result<ContainmentVerdict> {
        self.controller.on_marker_moved(position)
    }

    /// Handle the user's answer to the location settings prompt
    ///
    /// Ignored unless the wake-up fix failed, the only case that prompts.
    pub fn resolve_settings_prompt(&self, action: PromptAction) {
        let prompted = matches!(
            self.acquisition_state(),
            AcquisitionState::Failed(AcquisitionFailure::LocationServicesDisabled(_))
        );
        if !prompted {
            debug!(?action, "No settings prompt outstanding");
            return;
        }

        match action {
            PromptAction::OpenSettings => match &self.escalation {
                Some(hook) => hook.open_location_settings(),
                None => debug!("No settings escalation hook installed"),
            },
            PromptAction::Cancel => info!("Location settings prompt cancelled"),
        }
    }
}

impl<S> GeofenceSession<S> {
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn controller(&self) -> &GeofenceController<S> {
        &self.controller
    }

    pub fn acquisition_state(&self) -> AcquisitionState {
        self.lock_acquisition().clone()
    }

    /// End the session; pending completions become no-ops
    pub fn teardown(&self) {
        self.controller.close();
    }

    fn lock_acquisition(&self) -> std::sync::MutexGuard<'_, AcquisitionState> {
        self.acquisition
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
