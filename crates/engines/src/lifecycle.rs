//! Per-surface lifecycle state machine.
//!
//! ```text
//! Uninitialized --attach(capable)--> Active <--visibility--> Suspended
//!       |                              |                        |
//!       +--attach(!capable)--> Disabled|                        |
//!                                 \    v                        v
//!                                  +-> TornDown <---------------+
//! ```
//!
//! The host drives everything through [`HostBindings`]: frame scheduling and
//! listener registration. While Active or Suspended a frame is always
//! pending; only Active frames draw. Teardown cancels the pending frame
//! before removing any listener, and nothing leaves `TornDown`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fraction of the surface that must be on screen for it to draw.
pub const VISIBILITY_THRESHOLD: f64 = 0.08;

/// Upper bound applied to the host's device pixel ratio.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Clamps a device pixel ratio to `[1, 2]`; non-finite values become 1.
pub fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size for a CSS size at a device pixel ratio.
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = effective_dpr(dpr);
    let px = |v: f64| {
        if v.is_finite() && v > 0.0 {
            (v * dpr).round().min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    };
    (px(css_width), px(css_height))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceState {
    Uninitialized,
    Active,
    Suspended,
    /// Capability missing or GPU setup failed; renders nothing.
    Disabled,
    TornDown,
}

impl SurfaceState {
    /// Whether a frame loop is scheduled in this state.
    pub fn is_running(self) -> bool {
        matches!(self, Self::Active | Self::Suspended)
    }
}

/// Host signals a surface subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    PointerMove,
    PointerLeave,
    Resize,
    Visibility,
    Scroll,
}

impl Listener {
    pub const ALL: [Listener; 5] = [
        Listener::PointerMove,
        Listener::PointerLeave,
        Listener::Resize,
        Listener::Visibility,
        Listener::Scroll,
    ];
}

/// Opaque id of a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Frame scheduling and event registration supplied by the host.
pub trait HostBindings {
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
    fn listen(&mut self, listener: Listener);
    fn unlisten(&mut self, listener: Listener);
}

/// Lifecycle bookkeeping for one surface.
pub struct Lifecycle<H: HostBindings> {
    host: H,
    state: SurfaceState,
    pending: Option<FrameId>,
    listening: Vec<Listener>,
    threshold: f64,
}

impl<H: HostBindings> Lifecycle<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: SurfaceState::Uninitialized,
            pending: None,
            listening: Vec::new(),
            threshold: VISIBILITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether a frame callback is currently scheduled.
    pub fn frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// First attach. Without the drawing capability the surface goes
    /// straight to `Disabled` and schedules nothing. Later calls are ignored.
    pub fn attach(&mut self, capable: bool) -> SurfaceState {
        if self.state != SurfaceState::Uninitialized {
            return self.state;
        }
        if !capable {
            info!("drawing capability unavailable; surface disabled");
            self.state = SurfaceState::Disabled;
            return self.state;
        }
        for listener in Listener::ALL {
            self.host.listen(listener);
            self.listening.push(listener);
        }
        self.pending = Some(self.host.request_frame());
        self.transition(SurfaceState::Active);
        self.state
    }

    /// Disables a running surface after a late capability failure. Frames
    /// and listeners are released as in teardown.
    pub fn disable(&mut self) {
        if self.state.is_running() || self.state == SurfaceState::Uninitialized {
            self.release_host();
            self.transition(SurfaceState::Disabled);
        }
    }

    /// Applies an intersection ratio.
    pub fn set_visibility(&mut self, ratio: f64) {
        let visible = ratio >= self.threshold;
        match (self.state, visible) {
            (SurfaceState::Active, false) => self.transition(SurfaceState::Suspended),
            (SurfaceState::Suspended, true) => self.transition(SurfaceState::Active),
            _ => {}
        }
    }

    /// Call at the top of the frame callback. Reschedules the next frame
    /// while running and returns whether this frame should draw.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if !self.state.is_running() {
            return false;
        }
        self.pending = Some(self.host.request_frame());
        self.state == SurfaceState::Active
    }

    /// Cancels the pending frame, then removes every listener. Returns false
    /// when the surface was already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.state == SurfaceState::TornDown {
            return false;
        }
        self.release_host();
        self.transition(SurfaceState::TornDown);
        true
    }

    fn release_host(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
        }
        for listener in self.listening.drain(..) {
            self.host.unlisten(listener);
        }
    }

    fn transition(&mut self, next: SurfaceState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "surface state");
            self.state = next;
        }
    }
}

#[cfg(test)]
pub(crate) mod host {
    //! Recording host shared by the surface tests.

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Request(FrameId),
        Cancel(FrameId),
        Listen(Listener),
        Unlisten(Listener),
        /// Pushed by GPU mocks sharing the same log.
        Gpu(&'static str),
    }

    #[derive(Debug, Default, Clone)]
    pub struct RecordingHost {
        pub events: Rc<RefCell<Vec<Event>>>,
        next: i32,
    }

    impl RecordingHost {
        pub fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        pub fn listening(&self) -> usize {
            let events = self.events.borrow();
            let on = events.iter().filter(|e| matches!(e, Event::Listen(_))).count();
            let off = events.iter().filter(|e| matches!(e, Event::Unlisten(_))).count();
            on - off
        }
    }

    impl HostBindings for RecordingHost {
        fn request_frame(&mut self) -> FrameId {
            self.next += 1;
            let id = FrameId(self.next);
            self.events.borrow_mut().push(Event::Request(id));
            id
        }
        fn cancel_frame(&mut self, id: FrameId) {
            self.events.borrow_mut().push(Event::Cancel(id));
        }
        fn listen(&mut self, listener: Listener) {
            self.events.borrow_mut().push(Event::Listen(listener));
        }
        fn unlisten(&mut self, listener: Listener) {
            self.events.borrow_mut().push(Event::Unlisten(listener));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::host::{Event, RecordingHost};
    use super::*;

    fn active() -> Lifecycle<RecordingHost> {
        let mut lc = Lifecycle::new(RecordingHost::default());
        assert_eq!(lc.attach(true), SurfaceState::Active);
        lc
    }

    #[test]
    fn missing_capability_disables_without_scheduling() {
        let mut lc = Lifecycle::new(RecordingHost::default());
        assert_eq!(lc.attach(false), SurfaceState::Disabled);
        assert!(lc.host().events().is_empty());
        assert!(!lc.begin_frame());
    }

    #[test]
    fn attach_listens_and_schedules() {
        let lc = active();
        assert!(lc.frame_pending());
        assert_eq!(lc.host().listening(), Listener::ALL.len());
    }

    #[test]
    fn attach_only_happens_once() {
        let mut lc = active();
        let before = lc.host().events().len();
        assert_eq!(lc.attach(true), SurfaceState::Active);
        assert_eq!(lc.host().events().len(), before);
    }

    #[test]
    fn suspended_keeps_ticking_without_drawing() {
        let mut lc = active();
        lc.set_visibility(0.05);
        assert_eq!(lc.state(), SurfaceState::Suspended);
        assert!(!lc.begin_frame());
        assert!(lc.frame_pending());

        lc.set_visibility(0.08);
        assert_eq!(lc.state(), SurfaceState::Active);
        assert!(lc.begin_frame());
    }

    #[test]
    fn teardown_cancels_before_unlisten() {
        let mut lc = active();
        assert!(lc.teardown());
        let events = lc.host().events();
        let cancel = events.iter().position(|e| matches!(e, Event::Cancel(_))).unwrap();
        let first_unlisten = events.iter().position(|e| matches!(e, Event::Unlisten(_))).unwrap();
        assert!(cancel < first_unlisten);
        assert_eq!(lc.host().listening(), 0);
        assert!(!lc.frame_pending());
    }

    #[test]
    fn teardown_is_idempotent_and_final() {
        let mut lc = active();
        assert!(lc.teardown());
        let count = lc.host().events().len();
        assert!(!lc.teardown());
        lc.set_visibility(1.0);
        assert_eq!(lc.attach(true), SurfaceState::TornDown);
        assert!(!lc.begin_frame());
        assert_eq!(lc.host().events().len(), count);
    }

    #[test]
    fn stale_frame_after_teardown_does_not_reschedule() {
        let mut lc = active();
        lc.teardown();
        assert!(!lc.begin_frame());
        assert!(!lc.frame_pending());
    }

    #[test]
    fn disable_releases_host() {
        let mut lc = active();
        lc.disable();
        assert_eq!(lc.state(), SurfaceState::Disabled);
        assert_eq!(lc.host().listening(), 0);
        assert!(lc.teardown());
        assert_eq!(lc.state(), SurfaceState::TornDown);
    }

    #[test]
    fn dpr_is_capped() {
        assert_eq!(effective_dpr(3.0), 2.0);
        assert_eq!(effective_dpr(0.5), 1.0);
        assert_eq!(effective_dpr(f64::NAN), 1.0);
        assert_eq!(backing_size(300.0, 150.5, 3.0), (600, 301));
        assert_eq!(backing_size(0.0, 100.0, 1.0), (0, 100));
    }
}
