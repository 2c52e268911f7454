//! Harmonic radius function and outline sampling.
//!
//! Everything here is a pure function of `(profile, p, t)`.

use crate::stage::StageProfile;
use ambient_fx_core::DVec2;
use std::f64::consts::TAU;

/// Time rates of the base wobble and the four harmonics.
pub const TIME_RATES: [f64; 5] = [0.6, 0.9, 0.7, 1.1, 0.5];

/// Amplitude of the always-on base wobble.
pub const BASE_WOBBLE: f64 = 0.03;

/// Extra horizontal spread of mirrored stages at full progress.
pub const MIRROR_SPREAD: f64 = 0.18;

/// Radius at angle `theta` before any axis scaling.
///
/// ```text
/// base     = 1 + 0.03 sin(θ + t k0)
/// harmonic = a1 sin(θ + t k1) + a2 sin(2θ - t k2) + a3 sin(3θ + t k3) + a4 sin(4θ - t k4)
/// r        = baseRadius (base + p harmonic)
/// ```
pub fn radius(profile: &StageProfile, theta: f64, p: f64, t: f64) -> f64 {
    let [k0, k1, k2, k3, k4] = TIME_RATES;
    let [a1, a2, a3, a4] = profile.amplitudes;
    let base = 1.0 + BASE_WOBBLE * (theta + t * k0).sin();
    let harmonic = a1 * (theta + t * k1).sin()
        + a2 * (2.0 * theta - t * k2).sin()
        + a3 * (3.0 * theta + t * k3).sin()
        + a4 * (4.0 * theta - t * k4).sin();
    profile.base_radius * (base + p * harmonic)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Outline point at angle `theta`, centered on the origin.
///
/// The radius is scaled per axis by `lerp(1, scale, p)`; mirrored profiles
/// additionally widen x by `1 + p * 0.18 * |sin θ|`.
pub fn outline_point(profile: &StageProfile, theta: f64, p: f64, t: f64) -> DVec2 {
    let p = p.clamp(0.0, 1.0);
    let r = radius(profile, theta, p, t);
    let mut sx = lerp(1.0, profile.scale_x, p);
    let sy = lerp(1.0, profile.scale_y, p);
    if profile.mirror {
        sx *= 1.0 + p * MIRROR_SPREAD * theta.sin().abs();
    }
    DVec2::new(theta.cos() * r * sx, theta.sin() * r * sy)
}

/// `n` outline points at evenly spaced angles starting from 0.
pub fn sample_outline(profile: &StageProfile, n: usize, p: f64, t: f64) -> Vec<DVec2> {
    (0..n)
        .map(|i| outline_point(profile, TAU * i as f64 / n as f64, p, t))
        .collect()
}
