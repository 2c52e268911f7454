//! Seeded twinkling star field. Purely decorative.

use ambient_fx_core::draw::{DrawContext, Paint};
use ambient_fx_core::{DVec2, FrameInput, Mulberry32, Theme};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Diameter in CSS pixels, 1..2.6.
    pub size: f64,
    /// Twinkle period in seconds, 5..22.
    pub period: f64,
    /// Phase delay in seconds.
    pub delay: f64,
    /// Base opacity, 0.25..0.9.
    pub opacity: f64,
}

impl Star {
    /// Twinkle amount in `[0, 1]` at `time`: 0 at rest, 1 at the peak.
    pub fn pulse(&self, time: f64) -> f64 {
        let phase = ((time + self.delay) / self.period).rem_euclid(1.0);
        0.5 - 0.5 * (phase * TAU).cos()
    }
}

pub fn generate_stars(rng: &mut Mulberry32, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.next_f64(),
            y: rng.next_f64(),
            size: rng.next_range(1.0, 2.6),
            period: rng.next_range(5.0, 22.0),
            delay: rng.next_range(0.0, 13.0),
            opacity: rng.next_range(0.25, 0.9),
        })
        .collect()
}

pub fn draw(ctx: &mut dyn DrawContext, frame: &FrameInput, theme: &Theme, stars: &[Star], alpha: f64) {
    let ink = theme.ink();
    for star in stars {
        let w = star.pulse(frame.time);
        let a = star.opacity * (0.2 + 0.75 * w) * alpha;
        let r = star.size * 0.5 * (1.0 + 0.7 * w);
        let center = DVec2::new(star.x * frame.width, star.y * frame.height);
        ctx.fill_circle(center, r, &Paint::Solid(ink.with_alpha(a)));
    }
}
