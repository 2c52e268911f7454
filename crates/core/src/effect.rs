//! The `Effect` trait every CPU-drawn ambient effect implements.
//!
//! The trait is object-safe so surfaces can hold `Box<dyn Effect>` and
//! switch effects at runtime from a registry name.

use crate::draw::DrawContext;
use crate::motion::MotionPolicy;
use crate::pointer::PointerState;
use crate::progress::Progress;
use crate::theme::Theme;
use serde_json::Value;

/// Everything an effect may read while drawing one frame.
///
/// Built fresh by the owning surface each tick; effects never hold on to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Surface size in CSS pixels.
    pub width: f64,
    pub height: f64,
    /// Elapsed animation time in seconds (frozen under reduced motion).
    pub time: f64,
    /// Delta applied this frame (0 under reduced motion).
    pub dt: f64,
    pub progress: Progress,
    pub pointer: PointerState,
    pub policy: MotionPolicy,
}

impl FrameInput {
    /// A frame at time zero, centered pointer, full motion.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            time: 0.0,
            dt: 0.0,
            progress: Progress::default(),
            pointer: PointerState::default(),
            policy: MotionPolicy::full_motion(),
        }
    }

    pub fn with_time(mut self, time: f64, dt: f64) -> Self {
        self.time = time;
        self.dt = dt;
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_pointer(mut self, pointer: PointerState) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_policy(mut self, policy: MotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// True when there is nothing to draw on.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// An ambient effect drawn through a [`DrawContext`].
///
/// One-time layout (points, branches) is generated from the seed at
/// construction. `render` may integrate per-frame state by `frame.dt` and
/// must issue no draw calls at all for a degenerate frame.
pub trait Effect {
    /// Registry name of the effect.
    fn name(&self) -> &'static str;

    /// Variant tag the effect was built with.
    fn variant(&self) -> &str;

    /// Draws one frame, clearing first.
    fn render(&mut self, ctx: &mut dyn DrawContext, frame: &FrameInput);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Replaces the theming input without touching generated layout.
    fn set_theme(&mut self, theme: Theme);
}
