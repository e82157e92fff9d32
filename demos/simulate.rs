use geofence_core::{
    GeoPoint, GeofenceSession, LocationService, Notice, NotificationSink, PermissionRationale,
    PermissionService, PermissionStatus, PlatformError, PositionError, PositionOptions,
    PromptAction, SessionConfig, SettingsEscalation,
};
use std::env;
use tracing_subscriber::EnvFilter;

/// Prints notices the way a map screen would show alerts
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Verdict(verdict) => println!("Alert: {}", verdict.message()),
            Notice::FenceChanged { region, fence } => {
                println!(
                    "Fence around ({:.5}, {:.5}), {} vertices",
                    region.center.latitude(),
                    region.center.longitude(),
                    fence.len()
                );
            }
            Notice::PermissionDenied(dialog) => println!("{}: {}", dialog.title, dialog.message),
            Notice::LocationServicesDisabled(prompt) => {
                let actions: Vec<_> = prompt.actions.iter().map(|a| a.label()).collect();
                println!("{}: {} {:?}", prompt.title, prompt.message, actions);
            }
        }
    }
}

struct OpenSettings;

impl SettingsEscalation for OpenSettings {
    fn open_location_settings(&self) {
        println!("(opening system location settings)");
    }
}

struct SimulatedPermissions(PermissionStatus);

impl PermissionService for SimulatedPermissions {
    async fn request_fine_location(
        &self,
        rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, PlatformError> {
        println!("{}: {}", rationale.title, rationale.message);
        Ok(self.0)
    }
}

struct SimulatedLocation {
    services_enabled: bool,
    fix: GeoPoint,
}

impl LocationService for SimulatedLocation {
    async fn current_position(&self, _options: PositionOptions) -> Result<GeoPoint, PositionError> {
        if self.services_enabled {
            Ok(self.fix)
        } else {
            Err(PositionError::PositionUnavailable)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    let scenario = args.get(1).map(String::as_str).unwrap_or("granted");

    let (status, services_enabled) = match scenario {
        "granted" => (PermissionStatus::Granted, true),
        "denied" => (PermissionStatus::Denied, true),
        "disabled" => (PermissionStatus::Granted, false),
        _ => {
            eprintln!("Usage: {} [granted|denied|disabled]", args[0]);
            std::process::exit(1);
        }
    };

    let session = GeofenceSession::new(SessionConfig::default(), ConsoleSink)?
        .with_settings_escalation(OpenSettings);

    let permissions = SimulatedPermissions(status);
    let location = SimulatedLocation {
        services_enabled,
        fix: GeoPoint::new(31.5, 71.2)?,
    };

    let state = session.start_acquisition(&permissions, &location).await;
    println!("Acquisition finished: {state:?}");

    if scenario == "disabled" {
        session.resolve_settings_prompt(PromptAction::OpenSettings);
    }

    let center = session.controller().center().ok_or("fence not initialized")?;
    for (d_lat, d_lon) in [(0.0, 0.0), (0.03, -0.02), (0.08, 0.0), (0.0, -0.3)] {
        let position = center.offset(d_lat, d_lon)?;
        session.marker_moved(position)?;
    }

    session.teardown();
    Ok(())
}
