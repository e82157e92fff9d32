use crate::acquisition::{
    AcquisitionEvent, AcquisitionState, Command, LocationAcquisition, LocationService,
    PermissionService,
};
use crate::config::SessionConfig;
use crate::controller::GeofenceController;
use crate::error::Error;
use crate::notify::{Dialog, Notice, NotificationSink, SettingsPrompt};
use tracing::{debug, info, warn};

/// Run the acquisition flow to completion against the platform services
///
/// Each state transition is reported to `observe`. A successful
/// high-accuracy fix re-initializes `controller` around that point; every
/// other outcome leaves the current center in effect. Completions arriving
/// after the controller was closed are discarded.
pub async fn acquire<S, P, L>(
    controller: &GeofenceController<S>,
    permissions: &P,
    location: &L,
    config: &SessionConfig,
    mut observe: impl FnMut(&AcquisitionState) + Send,
) -> AcquisitionState
where
    S: NotificationSink,
    P: PermissionService,
    L: LocationService,
{
    let mut machine = LocationAcquisition::from_config(config);
    let mut command = machine.start();

    loop {
        let event = match command {
            Command::RequestPermission => {
                debug!("Requesting fine location permission");
                match permissions
                    .request_fine_location(&config.permission_rationale)
                    .await
                {
                    Ok(status) => AcquisitionEvent::PermissionResolved(status),
                    Err(err) => AcquisitionEvent::PermissionRequestFailed(err.to_string()),
                }
            }
            Command::RequestWakeFix(options) => {
                debug!(?options, "Requesting wake-up fix");
                AcquisitionEvent::WakeFixCompleted(location.current_position(options).await)
            }
            Command::RequestPreciseFix(options) => {
                debug!(?options, "Requesting high-accuracy fix");
                AcquisitionEvent::PreciseFixCompleted(location.current_position(options).await)
            }
            Command::Publish(point) => {
                info!(
                    latitude = point.latitude(),
                    longitude = point.longitude(),
                    "Location acquired"
                );
                if let Err(err) = controller.initialize(point) {
                    warn!(error = %err, "Cannot build fence around acquired location");
                    fall_back(controller, config);
                }
                break;
            }
            Command::NotifyPermissionDenied => {
                warn!("Location permission denied, keeping default center");
                fall_back(controller, config);
                controller.notify(Notice::PermissionDenied(Dialog::PERMISSION_DENIED));
                break;
            }
            Command::PromptLocationSettings => {
                warn!("Wake-up fix failed, location services look disabled");
                fall_back(controller, config);
                controller.notify(Notice::LocationServicesDisabled(SettingsPrompt::default()));
                break;
            }
            Command::ReportFailure => {
                if let AcquisitionState::Failed(failure) = machine.state() {
                    warn!(error = %Error::from(failure), "Error getting location");
                }
                fall_back(controller, config);
                break;
            }
            Command::Idle => break,
        };

        if controller.is_closed() {
            debug!(?event, "Session closed, discarding completion");
            break;
        }

        command = machine.handle(event);
        observe(machine.state());
    }

    machine.into_state()
}

/// Make sure a fence exists, using the configured default center if needed
fn fall_back<S: NotificationSink>(controller: &GeofenceController<S>, config: &SessionConfig) {
    if controller.center().is_some() {
        return;
    }
    if let Err(err) = controller.initialize(config.default_center) {
        warn!(error = %err, "Cannot build fence around default center");
    }
}
