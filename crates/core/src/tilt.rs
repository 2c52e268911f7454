//! Scroll-position tilt for depth-on-scroll elements.
//!
//! An element rotates away from the viewport center as it scrolls and
//! lifts toward the viewer near the middle. Pure function of geometry; the
//! host applies the result as a CSS-style transform.

use crate::motion::MotionPolicy;
use crate::pointer::ClientRect;
use serde::{Deserialize, Serialize};

/// Maximum rotations and lift for a tilting element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltLimits {
    /// Degrees around the horizontal axis.
    pub max_rotate_x: f64,
    /// Degrees around the vertical axis.
    pub max_rotate_y: f64,
    /// Pixels of lift at the viewport center.
    pub z_max: f64,
}

impl Default for TiltLimits {
    fn default() -> Self {
        Self {
            max_rotate_x: 14.0,
            max_rotate_y: 12.0,
            z_max: 24.0,
        }
    }
}

/// Resolved tilt transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub lift: f64,
}

/// Computes the tilt of an element from its client rect and the viewport size.
///
/// Reduced motion (or a degenerate viewport) yields the identity tilt.
pub fn scroll_tilt(
    rect: ClientRect,
    viewport_width: f64,
    viewport_height: f64,
    limits: TiltLimits,
    policy: MotionPolicy,
) -> Tilt {
    if policy.is_reduced() || viewport_width <= 0.0 || viewport_height <= 0.0 {
        return Tilt::default();
    }
    let center_y = rect.top + rect.height / 2.0;
    let center_x = rect.left + rect.width / 2.0;
    let half_h = viewport_height / 2.0;
    let half_w = viewport_width / 2.0;

    let dy = ((center_y - half_h) / half_h).clamp(-1.0, 1.0);
    let dx = ((center_x - half_w) / half_w).clamp(-1.0, 1.0);

    let proximity = 1.0 - dy.abs().min(1.0);
    Tilt {
        rotate_x: (-dy * limits.max_rotate_x).clamp(-limits.max_rotate_x, limits.max_rotate_x),
        rotate_y: (dx * limits.max_rotate_y).clamp(-limits.max_rotate_y, limits.max_rotate_y),
        lift: (proximity * limits.z_max).round(),
    }
}
