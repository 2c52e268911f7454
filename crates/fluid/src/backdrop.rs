//! Animated parameters for an SVG turbulence/displacement backdrop.

use ambient_fx_core::MotionPolicy;
use serde::{Deserialize, Serialize};

/// Scroll distance over which the displacement ramps to full strength.
pub const SCROLL_RAMP: f64 = 900.0;

/// One frame of `feTurbulence` + `feDisplacementMap` settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbulenceParams {
    pub base_frequency: (f64, f64),
    pub seed: u32,
    pub scale: f64,
}

impl TurbulenceParams {
    /// Parameters at time `t` seconds with the page scrolled `scroll_y` pixels.
    pub fn at(t: f64, scroll_y: f64) -> Self {
        let base_frequency = (
            0.008 + (t * 0.35).sin() * 0.0015,
            0.014 + (t * 0.27).cos() * 0.0018,
        );
        let step = (t * 2.0).floor().max(0.0);
        let seed = (2 + (step as u64 % 999) as u32) % 999;
        let ramp = (scroll_y.max(0.0) / SCROLL_RAMP).min(1.0);
        let scale = 18.0 + ramp * 14.0 + (t * 0.6).sin() * 2.0;
        Self {
            base_frequency,
            seed,
            scale,
        }
    }

    /// Like [`at`](Self::at), but `None` when decorative motion is off: the
    /// backdrop is then left unanimated.
    pub fn animated(t: f64, scroll_y: f64, policy: MotionPolicy) -> Option<Self> {
        policy.decorative_enabled().then(|| Self::at(t, scroll_y))
    }

    /// Attribute strings as an SVG filter expects them.
    pub fn svg_attributes(&self) -> [(&'static str, String); 3] {
        [
            (
                "baseFrequency",
                format!("{:.5} {:.5}", self.base_frequency.0, self.base_frequency.1),
            ),
            ("seed", self.seed.to_string()),
            ("scale", format!("{:.2}", self.scale)),
        ]
    }
}
