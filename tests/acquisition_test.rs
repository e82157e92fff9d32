use claims::assert_matches;
use geofence_core::{
    AcquisitionFailure, AcquisitionState, ContainmentVerdict, DEFAULT_CENTER, GeoPoint,
    GeofenceController, GeofenceSession, LocationService, Notice, NotificationSink,
    PermissionRationale, PermissionService, PermissionStatus, PlatformError, PositionError,
    PositionOptions, PromptAction, SessionConfig, SettingsEscalation, acquire, contains,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder(Mutex<Vec<Notice>>);

impl Recorder {
    fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }

    fn fence_centers(&self) -> Vec<GeoPoint> {
        self.notices()
            .into_iter()
            .filter_map(|notice| match notice {
                Notice::FenceChanged { region, .. } => Some(region.center),
                _ => None,
            })
            .collect()
    }
}

impl NotificationSink for Recorder {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

struct Permissions {
    answer: Result<PermissionStatus, PlatformError>,
    calls: AtomicUsize,
}

impl Permissions {
    fn new(answer: Result<PermissionStatus, PlatformError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PermissionService for Permissions {
    async fn request_fine_location(
        &self,
        _rationale: &PermissionRationale,
    ) -> Result<PermissionStatus, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Answers position requests from a script, in order
#[derive(Default)]
struct Location {
    script: Mutex<VecDeque<Result<GeoPoint, PositionError>>>,
    requests: Mutex<Vec<PositionOptions>>,
}

impl Location {
    fn new(script: impl IntoIterator<Item = Result<GeoPoint, PositionError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    fn requests(&self) -> Vec<PositionOptions> {
        self.requests.lock().unwrap().clone()
    }
}

impl LocationService for Location {
    async fn current_position(&self, options: PositionOptions) -> Result<GeoPoint, PositionError> {
        self.requests.lock().unwrap().push(options);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PositionError::PositionUnavailable))
    }
}

fn p(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn session() -> GeofenceSession<Arc<Recorder>> {
    GeofenceSession::new(SessionConfig::default(), Arc::new(Recorder::default())).unwrap()
}

#[tokio::test]
async fn permission_denied_keeps_default_center() {
    let session = session();
    let permissions = Permissions::new(Ok(PermissionStatus::Denied));
    let location = Location::default();

    let state = session.start_acquisition(&permissions, &location).await;

    assert_eq!(state, AcquisitionState::PermissionDenied);
    assert_eq!(session.acquisition_state(), AcquisitionState::PermissionDenied);
    assert!(location.requests().is_empty());

    let controller = session.controller();
    assert_eq!(controller.center(), Some(p(30.04657135362574, 70.64823536124274)));
    let fence = controller.fence().unwrap();
    assert!(contains(DEFAULT_CENTER, &fence));

    let sink = controller.sink();
    assert_eq!(sink.fence_centers(), vec![DEFAULT_CENTER]);
    assert_matches!(sink.notices().last(), Some(Notice::PermissionDenied(_)));
}

// A failed wake-up fix never reaches the high-accuracy request, see
// wake_failure_prompts_and_skips_precise_fix
#[tokio::test]
async fn precise_fix_replaces_default_fence() {
    let session = session();
    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    let location = Location::new([Ok(p(31.4, 71.1)), Ok(p(31.5, 71.2))]);

    let state = session.start_acquisition(&permissions, &location).await;

    assert_eq!(state, AcquisitionState::Acquired(p(31.5, 71.2)));
    assert_eq!(
        location.requests(),
        vec![PositionOptions::HIGH_ACCURACY, PositionOptions::HIGH_ACCURACY]
    );

    let controller = session.controller();
    assert_eq!(controller.center(), Some(p(31.5, 71.2)));
    assert_eq!(controller.marker(), Some(p(31.5, 71.2)));

    // Default fence first, then exactly one rebuild around the fix
    let centers = controller.sink().fence_centers();
    assert_eq!(centers, vec![DEFAULT_CENTER, p(31.5, 71.2)]);

    // The wake-up fix is never used
    assert!(!centers.contains(&p(31.4, 71.1)));

    assert_eq!(
        session.marker_moved(DEFAULT_CENTER).unwrap(),
        ContainmentVerdict::Outside
    );
    assert_eq!(
        session.marker_moved(p(31.52, 71.18)).unwrap(),
        ContainmentVerdict::Inside
    );
}

#[derive(Clone, Default)]
struct SettingsHook(Arc<AtomicUsize>);

impl SettingsEscalation for SettingsHook {
    fn open_location_settings(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn wake_failure_prompts_and_skips_precise_fix() {
    let hook = SettingsHook::default();
    let session = session().with_settings_escalation(hook.clone());
    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    let location = Location::new([Err(PositionError::Timeout), Ok(p(31.5, 71.2))]);

    let state = session.start_acquisition(&permissions, &location).await;

    assert_matches!(
        state,
        AcquisitionState::Failed(AcquisitionFailure::LocationServicesDisabled(
            PositionError::Timeout
        ))
    );
    assert_eq!(location.requests().len(), 1);
    assert_eq!(session.controller().center(), Some(DEFAULT_CENTER));
    assert_matches!(
        session.controller().sink().notices().last(),
        Some(Notice::LocationServicesDisabled(_))
    );

    session.resolve_settings_prompt(PromptAction::OpenSettings);
    assert_eq!(hook.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn precise_failure_keeps_current_center() {
    let session = session();
    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    let location = Location::new([Ok(p(31.4, 71.1)), Err(PositionError::Timeout)]);

    let state = session.start_acquisition(&permissions, &location).await;

    assert_matches!(
        state,
        AcquisitionState::Failed(AcquisitionFailure::PreciseFix(PositionError::Timeout))
    );
    assert_eq!(location.requests().len(), 2);
    assert_eq!(session.controller().center(), Some(DEFAULT_CENTER));

    // No prompt for a failed high-accuracy fix
    let notices = session.controller().sink().notices();
    assert!(
        !notices
            .iter()
            .any(|n| matches!(n, Notice::LocationServicesDisabled(_)))
    );
}

#[tokio::test]
async fn unbuildable_fence_keeps_default_center() {
    let session = session();
    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    // Too close to the pole for a 0.05 degree fence
    let location = Location::new([Ok(p(10.0, 10.0)), Ok(p(89.99, 0.0))]);

    let state = session.start_acquisition(&permissions, &location).await;

    assert_eq!(state, AcquisitionState::Acquired(p(89.99, 0.0)));
    assert_eq!(session.acquisition_state(), state);

    let controller = session.controller();
    assert_eq!(controller.center(), Some(DEFAULT_CENTER));
    assert_eq!(controller.marker(), Some(DEFAULT_CENTER));
    assert_eq!(controller.sink().fence_centers(), vec![DEFAULT_CENTER]);
    assert!(contains(DEFAULT_CENTER, &controller.fence().unwrap()));
}

#[tokio::test]
async fn permission_request_error_degrades() {
    let session = session();
    let permissions = Permissions::new(Err(PlatformError("no activity".into())));
    let location = Location::default();

    let state = session.start_acquisition(&permissions, &location).await;

    assert_eq!(
        state,
        AcquisitionState::Failed(AcquisitionFailure::PermissionRequest("no activity".into()))
    );
    assert_eq!(session.controller().center(), Some(DEFAULT_CENTER));
}

#[tokio::test]
async fn acquisition_runs_once_per_session() {
    let session = session();
    let permissions = Permissions::new(Ok(PermissionStatus::Denied));
    let location = Location::default();

    session.start_acquisition(&permissions, &location).await;
    let state = session.start_acquisition(&permissions, &location).await;

    assert_eq!(state, AcquisitionState::PermissionDenied);
    assert_eq!(permissions.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn standalone_driver_falls_back_to_default() {
    let config = SessionConfig::default();
    let controller = GeofenceController::new(&config, Recorder::default()).unwrap();
    let permissions = Permissions::new(Ok(PermissionStatus::Denied));
    let location = Location::default();

    let mut seen = Vec::new();
    let state = acquire(&controller, &permissions, &location, &config, |state| {
        seen.push(state.clone())
    })
    .await;

    assert_eq!(state, AcquisitionState::PermissionDenied);
    assert_eq!(seen, vec![AcquisitionState::PermissionDenied]);
    assert_eq!(controller.center(), Some(DEFAULT_CENTER));
}

#[tokio::test]
async fn observer_sees_every_transition() {
    let config = SessionConfig::default();
    let controller = GeofenceController::new(&config, Recorder::default()).unwrap();
    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    let location = Location::new([Ok(p(31.4, 71.1)), Ok(p(31.5, 71.2))]);

    let mut seen = Vec::new();
    acquire(&controller, &permissions, &location, &config, |state| {
        seen.push(state.clone())
    })
    .await;

    assert_eq!(
        seen,
        vec![
            AcquisitionState::AwaitingFix,
            AcquisitionState::AwaitingFix,
            AcquisitionState::Acquired(p(31.5, 71.2)),
        ]
    );
}

/// Closes the controller while its request is in flight
struct ClosingLocation<'a> {
    controller: &'a GeofenceController<Recorder>,
}

impl LocationService for ClosingLocation<'_> {
    async fn current_position(&self, _options: PositionOptions) -> Result<GeoPoint, PositionError> {
        self.controller.close();
        Ok(p(31.5, 71.2))
    }
}

#[tokio::test]
async fn completion_after_teardown_is_ignored() {
    let config = SessionConfig::default();
    let controller = GeofenceController::new(&config, Recorder::default()).unwrap();
    controller.initialize(DEFAULT_CENTER).unwrap();

    let permissions = Permissions::new(Ok(PermissionStatus::Granted));
    let location = ClosingLocation {
        controller: &controller,
    };

    let state = acquire(&controller, &permissions, &location, &config, |_| {}).await;

    assert_eq!(state, AcquisitionState::AwaitingFix);
    assert_eq!(controller.center(), Some(DEFAULT_CENTER));
    assert_eq!(controller.sink().fence_centers(), vec![DEFAULT_CENTER]);
}
