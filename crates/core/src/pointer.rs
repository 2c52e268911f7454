//! Damped pointer state owned by one surface.

use serde::{Deserialize, Serialize};

/// Fraction of a move's displacement that becomes velocity.
pub const VELOCITY_GAIN: f64 = 0.12;

/// Per-frame velocity decay.
pub const VELOCITY_DECAY: f64 = 0.92;

/// Client-space rectangle of the surface's element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalizes a client-space point into this rect.
    ///
    /// Width and height below one pixel are treated as one so a collapsed
    /// element never divides by zero.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (
            (client_x - self.left) / self.width.max(1.0),
            (client_y - self.top) / self.height.max(1.0),
        )
    }
}

/// Pointer position in normalized surface coordinates plus a damped velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Default for PointerState {
    /// Centered and at rest.
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

impl PointerState {
    /// Records a move to normalized `(nx, ny)`.
    ///
    /// Velocity becomes `VELOCITY_GAIN` times the displacement from the
    /// previous position; non-finite input is ignored.
    pub fn move_to(&mut self, nx: f64, ny: f64) {
        if !nx.is_finite() || !ny.is_finite() {
            return;
        }
        self.vx = (nx - self.x) * VELOCITY_GAIN;
        self.vy = (ny - self.y) * VELOCITY_GAIN;
        self.x = nx;
        self.y = ny;
    }

    /// Records a move given in client coordinates.
    pub fn move_client(&mut self, client_x: f64, client_y: f64, rect: ClientRect) {
        let (nx, ny) = rect.normalize(client_x, client_y);
        self.move_to(nx, ny);
    }

    /// Applies one frame of exponential velocity decay.
    pub fn damp(&mut self) {
        self.vx *= VELOCITY_DECAY;
        self.vy *= VELOCITY_DECAY;
    }

    /// Same position, zero velocity.
    pub fn at_rest(self) -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            ..self
        }
    }

    /// Back to centered and at rest (pointer left the surface).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Position clamped into `[0, 1]`.
    pub fn clamped(&self) -> (f64, f64) {
        (self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_centered_at_rest() {
        let p = PointerState::default();
        assert_eq!((p.x, p.y, p.vx, p.vy), (0.5, 0.5, 0.0, 0.0));
    }

    #[test]
    fn move_sets_velocity_from_displacement() {
        let mut p = PointerState::default();
        p.move_to(1.0, 0.0);
        assert!((p.vx - 0.06).abs() < 1e-12);
        assert!((p.vy + 0.06).abs() < 1e-12);
        assert_eq!((p.x, p.y), (1.0, 0.0));
    }

    #[test]
    fn move_client_normalizes_against_rect() {
        let mut p = PointerState::default();
        p.move_client(150.0, 75.0, ClientRect::new(100.0, 50.0, 200.0, 100.0));
        assert!((p.x - 0.25).abs() < 1e-12);
        assert!((p.y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn collapsed_rect_does_not_divide_by_zero() {
        let (nx, ny) = ClientRect::new(0.0, 0.0, 0.0, 0.0).normalize(0.5, 0.5);
        assert!(nx.is_finite() && ny.is_finite());
    }

    #[test]
    fn damp_decays_geometrically() {
        let mut p = PointerState::default();
        p.move_to(1.0, 0.5);
        let v0 = p.vx;
        for _ in 0..10 {
            p.damp();
        }
        assert!((p.vx - v0 * VELOCITY_DECAY.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_default() {
        let mut p = PointerState::default();
        p.move_to(0.9, 0.1);
        p.reset();
        assert_eq!(p, PointerState::default());
    }

    #[test]
    fn non_finite_moves_are_ignored() {
        let mut p = PointerState::default();
        p.move_to(f64::NAN, 0.2);
        assert_eq!(p, PointerState::default());
    }
}
