//! Session state: fence center, fence polygon and marker position

use crate::config::SessionConfig;
use crate::containment::contains;
use crate::error::{Error, Result};
use crate::fence::build_fence;
use crate::notify::{Notice, NotificationSink};
use crate::types::{ContainmentVerdict, GeoPoint, Polygon, Region};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Owner of the fence and marker for one session
///
/// All mutation goes through a single mutex, so a marker evaluation never
/// observes a partially rebuilt fence. The fence itself is swapped in as a
/// whole `Arc<Polygon>`.
///
/// Notices are delivered in the order their state changes were committed,
/// from whichever thread completed the triggering call. The state lock is
/// released before the sink runs, so a sink may read the controller, but it
/// must not call [`initialize`](Self::initialize) or
/// [`on_marker_moved`](Self::on_marker_moved) from `notify`.
pub struct GeofenceController<S> {
    sink: S,
    half_size: f64,
    region: Region,
    state: Mutex<State>,
    // Held from commit until the sink returns
    emission: Mutex<()>,
}

#[derive(Debug, Default)]
struct State {
    center: Option<GeoPoint>,
    fence: Option<Arc<Polygon>>,
    marker: Option<GeoPoint>,
    closed: bool,
}

impl<S: NotificationSink> GeofenceController<S> {
    /// Create an uninitialized controller
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: &SessionConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sink,
            half_size: config.half_size,
            region: config.region(config.default_center)?,
            state: Mutex::new(State::default()),
            emission: Mutex::new(()),
        })
    }

    /// (Re)build the fence around `center` and reset the marker onto it
    ///
    /// Applying the same center twice leaves the controller in the same
    /// state. On a closed controller this is a no-op.
    pub fn initialize(&self, center: GeoPoint) -> Result<()> {
        let fence = Arc::new(build_fence(center, self.half_size)?);

        let _emission = self.lock_emission();
        {
            let mut state = self.lock();
            if state.closed {
                debug!(?center, "Ignoring fence initialization on closed controller");
                return Ok(());
            }
            state.center = Some(center);
            state.fence = Some(fence.clone());
            state.marker = Some(center);
        }

        info!(
            latitude = center.latitude(),
            longitude = center.longitude(),
            half_size = self.half_size,
            "Fence built"
        );
        self.sink.notify(Notice::FenceChanged {
            region: self.region_around(center),
            fence,
        });
        Ok(())
    }

    /// Move the marker and classify its new position
    ///
    /// Emits exactly one [`Notice::Verdict`] on success.
    ///
    /// # Errors
    ///
    /// - `FenceNotInitialized` if [`initialize`](Self::initialize) never ran
    /// - `SessionClosed` after [`close`](Self::close)
    pub fn on_marker_moved(&self, position: GeoPoint) -> Result<ContainmentVerdict> {
        let _emission = self.lock_emission();
        let verdict = {
            let mut state = self.lock();
            if state.closed {
                return Err(Error::SessionClosed);
            }
            let Some(fence) = state.fence.as_ref() else {
                error!(?position, "Marker moved before the fence was initialized");
                return Err(Error::FenceNotInitialized);
            };
            let verdict = ContainmentVerdict::from_inside(contains(position, fence));
            state.marker = Some(position);
            verdict
        };

        info!(
            latitude = position.latitude(),
            longitude = position.longitude(),
            ?verdict,
            "Marker moved"
        );
        self.sink.notify(Notice::Verdict(verdict));
        Ok(verdict)
    }

    /// Deliver a notice that did not originate from controller state
    pub(crate) fn notify(&self, notice: Notice) {
        let _emission = self.lock_emission();
        if self.is_closed() {
            debug!(?notice, "Dropping notice for closed controller");
            return;
        }
        self.sink.notify(notice);
    }
}

impl<S> GeofenceController<S> {
    pub fn center(&self) -> Option<GeoPoint> {
        self.lock().center
    }

    pub fn fence(&self) -> Option<Arc<Polygon>> {
        self.lock().fence.clone()
    }

    pub fn marker(&self) -> Option<GeoPoint> {
        self.lock().marker
    }

    /// Viewport around the current center
    pub fn region(&self) -> Option<Region> {
        self.center().map(|center| self.region_around(center))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Stop accepting updates
    ///
    /// Later `initialize` calls are ignored and marker moves fail with
    /// `SessionClosed`.
    pub fn close(&self) {
        self.lock().closed = true;
        debug!("Controller closed");
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn region_around(&self, center: GeoPoint) -> Region {
        self.region.with_center(center)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is plain data and valid after any panic
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_emission(&self) -> MutexGuard<'_, ()> {
        self.emission.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
