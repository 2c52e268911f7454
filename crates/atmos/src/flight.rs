//! Seeded butterflies crossing the surface. Purely decorative.
//!
//! Each butterfly loops across the full width on its own period, even
//! indices flying left to right and odd ones right to left, with a vertical
//! wiggle and flapping wings.

use ambient_fx_core::draw::{DrawContext, GradientStop, Paint, Path};
use ambient_fx_core::{DVec2, FrameInput, Mulberry32, Srgb, Theme};
use std::f64::consts::TAU;

/// Icon edge length in CSS pixels at scale 1.
pub const ICON_SIZE: f64 = 24.0;
/// Wing beats per second.
const FLAP_RATE: f64 = 3.0;
/// Wiggle cycles per crossing.
const WIGGLE_CYCLES: f64 = 2.0;

/// Left wing outline on a 64-unit icon grid centered on the body:
/// a start point and three cubic segments `(c1, c2, end)`.
const WING_START: DVec2 = DVec2::new(-0.5, 0.0);
const WING: [(DVec2, DVec2, DVec2); 3] = [
    (DVec2::new(-6.5, 7.8), DVec2::new(-14.3, 15.1), DVec2::new(-21.9, 12.8)),
    (DVec2::new(-27.6, 11.1), DVec2::new(-28.1, 3.0), DVec2::new(-24.6, -4.9)),
    (DVec2::new(-21.0, -13.3), DVec2::new(-11.0, -20.8), DVec2::new(-0.5, -6.5)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Butterfly {
    /// Vertical lane in `[0.08, 0.88)` of the surface height.
    pub top: f64,
    /// Start offset in seconds, 0..6.
    pub delay: f64,
    /// Seconds per crossing, 9..19.
    pub duration: f64,
    /// Icon scale, 0.75..2.1.
    pub scale: f64,
    /// Vertical wiggle amplitude in CSS pixels, 8..24.
    pub wiggle: f64,
    /// 0.25..0.85.
    pub opacity: f64,
    pub heading: Heading,
}

impl Butterfly {
    /// Crossing progress in `[0, 1)` at `time`.
    pub fn phase(&self, time: f64) -> f64 {
        ((time + self.delay) / self.duration).rem_euclid(1.0)
    }

    /// Body center at `time` on a `width` x `height` surface. The icon
    /// starts and ends fully outside the horizontal edges.
    pub fn position(&self, time: f64, width: f64, height: f64) -> DVec2 {
        let phase = self.phase(time);
        let margin = ICON_SIZE * self.scale;
        let travel = phase * (width + 2.0 * margin) - margin;
        let x = match self.heading {
            Heading::LeftToRight => travel,
            Heading::RightToLeft => width - travel,
        };
        let y = self.top * height + (phase * WIGGLE_CYCLES * TAU).sin() * self.wiggle;
        DVec2::new(x, y)
    }

    /// Horizontal wing spread in `[0.55, 1]`.
    pub fn spread(&self, time: f64) -> f64 {
        0.55 + 0.45 * ((time + self.delay) * FLAP_RATE * TAU).cos().abs()
    }
}

pub fn generate_butterflies(rng: &mut Mulberry32, count: usize) -> Vec<Butterfly> {
    (0..count)
        .map(|i| Butterfly {
            top: rng.next_range(0.08, 0.88),
            delay: rng.next_range(0.0, 6.0),
            duration: rng.next_range(9.0, 19.0),
            scale: rng.next_range(0.75, 2.1),
            wiggle: rng.next_range(8.0, 24.0),
            opacity: rng.next_range(0.25, 0.85),
            heading: if i % 2 == 0 {
                Heading::LeftToRight
            } else {
                Heading::RightToLeft
            },
        })
        .collect()
}

fn wing(center: DVec2, unit: DVec2) -> Path {
    let at = |p: DVec2| center + p * unit;
    let mut path = Path::new();
    path.move_to(at(WING_START));
    for (c1, c2, end) in WING {
        path.cubic_to(at(c1), at(c2), at(end));
    }
    path.close();
    path
}

/// Two gradient wings and a body dot per butterfly.
pub fn draw(ctx: &mut dyn DrawContext, frame: &FrameInput, theme: &Theme, flock: &[Butterfly], alpha: f64) {
    let white = Srgb::from_u8(255, 255, 255);
    for b in flock {
        let a = b.opacity * alpha;
        let center = b.position(frame.time, frame.width, frame.height);
        let size = ICON_SIZE * b.scale;
        let unit = size / 64.0;
        let spread = b.spread(frame.time);
        let half = DVec2::splat(size * 0.5);
        let paint = Paint::Linear {
            from: center - half,
            to: center + half,
            stops: vec![
                GradientStop::new(0.0, theme.accent2.with_alpha(0.95 * a)),
                GradientStop::new(0.55, theme.accent.with_alpha(0.92 * a)),
                GradientStop::new(1.0, white.with_alpha(0.35 * a)),
            ],
        };
        ctx.fill_path(&wing(center, DVec2::new(unit * spread, unit)), &paint);
        ctx.fill_path(&wing(center, DVec2::new(-unit * spread, unit)), &paint);
        ctx.fill_circle(center, 3.2 * unit, &Paint::Solid(white.with_alpha(0.8 * a)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_fx_core::draw::Recorder;

    fn sample() -> Butterfly {
        Butterfly {
            top: 0.5,
            delay: 0.0,
            duration: 10.0,
            scale: 1.0,
            wiggle: 10.0,
            opacity: 0.5,
            heading: Heading::LeftToRight,
        }
    }

    #[test]
    fn generated_ranges_hold_and_headings_alternate() {
        let flock = generate_butterflies(&mut Mulberry32::new(11), 120);
        for b in &flock {
            assert!((0.08..0.88).contains(&b.top));
            assert!((9.0..19.0).contains(&b.duration));
            assert!((0.75..2.1).contains(&b.scale));
            assert!((8.0..24.0).contains(&b.wiggle));
            assert!((0.25..0.85).contains(&b.opacity));
        }
        assert_eq!(flock[0].heading, Heading::LeftToRight);
        assert_eq!(flock[1].heading, Heading::RightToLeft);
    }

    #[test]
    fn crossing_starts_and_ends_off_surface() {
        let b = sample();
        assert_eq!(b.position(0.0, 300.0, 100.0), DVec2::new(-ICON_SIZE, 50.0));
        let late = b.position(9.999, 300.0, 100.0);
        assert!(late.x > 300.0, "{late:?}");

        let back = Butterfly { heading: Heading::RightToLeft, ..b };
        assert_eq!(back.position(0.0, 300.0, 100.0).x, 300.0 + ICON_SIZE);
        assert!((b.phase(3.0) - b.phase(13.0)).abs() < 1e-12);
    }

    #[test]
    fn wings_flap_within_bounds() {
        let b = sample();
        for i in 0..40 {
            let s = b.spread(i as f64 * 0.037);
            assert!(s >= 0.55 && s <= 1.0 + 1e-12, "{s}");
        }
        assert!((b.spread(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn each_butterfly_is_two_wings_and_a_body() {
        let mut rec = Recorder::new();
        let flock = generate_butterflies(&mut Mulberry32::new(3), 4);
        draw(&mut rec, &FrameInput::new(200.0, 120.0), &Theme::default(), &flock, 1.0);
        assert_eq!(rec.draw_calls(), 12);
    }
}
