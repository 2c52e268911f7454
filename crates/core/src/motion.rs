//! Reduced-motion policy and the per-surface animation clock.
//!
//! The user's "reduce motion" preference is read once, when a surface is
//! created, and cached in a [`MotionPolicy`]. Under reduced motion:
//! time stops advancing, eased progress is forced to 1, and purely
//! decorative loops (twinkle, turbulence drift) are switched off.

use crate::progress::Progress;
use crate::pointer::PointerState;

/// Source of the host's reduced-motion preference.
///
/// Implemented by the embedding environment (a media query in browsers, a
/// CLI flag, a fixed value in tests). Queried exactly once per surface.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

/// Cached reduced-motion decision for one surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPolicy {
    reduced: bool,
}

impl MotionPolicy {
    /// Reads the preference once and caches it.
    pub fn detect(source: &dyn MotionPreference) -> Self {
        let reduced = source.prefers_reduced_motion();
        if reduced {
            tracing::debug!("reduced motion preferred; freezing animation");
        }
        Self { reduced }
    }

    pub fn full_motion() -> Self {
        Self { reduced: false }
    }

    pub fn reduced() -> Self {
        Self { reduced: true }
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Whether purely cosmetic loops should run at all.
    pub fn decorative_enabled(&self) -> bool {
        !self.reduced
    }

    /// Applies the policy to a raw progress value.
    pub fn progress(&self, raw: f64) -> Progress {
        Progress::from_raw(raw, self.reduced)
    }

    /// Pointer as effects should see it: velocity is dropped under reduced
    /// motion so a past move cannot keep the frame changing.
    pub fn pointer(&self, pointer: PointerState) -> PointerState {
        if self.reduced {
            pointer.at_rest()
        } else {
            pointer
        }
    }

    /// Frame delta after the policy: 0 under reduced motion.
    pub fn effective_dt(&self, dt: f64) -> f64 {
        if self.reduced {
            0.0
        } else {
            dt
        }
    }
}

/// Largest frame delta the clock accepts, in seconds.
///
/// Longer gaps (a backgrounded tab, a debugger pause) are treated as one
/// slow frame instead of a jump.
pub const MAX_FRAME_DT: f64 = 0.1;

/// Elapsed animation time for one surface, in seconds.
///
/// Advanced from host timestamps by [`PhaseClock::tick`]; frozen at zero
/// when the policy is reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseClock {
    time: f64,
    last_stamp: Option<f64>,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a host timestamp (seconds) and returns the applied delta.
    ///
    /// The first tick only records the stamp. Deltas are clamped to
    /// `[0, MAX_FRAME_DT]` and then filtered through the policy.
    pub fn tick(&mut self, now: f64, policy: MotionPolicy) -> f64 {
        let raw_dt = match self.last_stamp {
            Some(prev) if now.is_finite() => (now - prev).clamp(0.0, MAX_FRAME_DT),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last_stamp = Some(now);
        }
        let dt = policy.effective_dt(raw_dt);
        self.time += dt;
        dt
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}
