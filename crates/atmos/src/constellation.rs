//! Drifting point set linked into a constellation graph.

use ambient_fx_core::draw::{DrawContext, GradientStop, Paint, Path};
use ambient_fx_core::{DVec2, FrameInput, Mulberry32, Theme};

/// Lower wrap bound in normalized coordinates.
pub const WRAP_MIN: f64 = -0.05;
/// Upper wrap bound in normalized coordinates.
pub const WRAP_MAX: f64 = 1.05;

/// Largest drift speed on either axis, in normalized units per second.
const MAX_DRIFT: f64 = 0.012;

/// One drifting point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePoint {
    pub x: f64,
    pub y: f64,
    /// Core radius in CSS pixels.
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
}

impl ParticlePoint {
    /// Draws one point from the stream: position, radius, then drift.
    fn generate(rng: &mut Mulberry32) -> Self {
        Self {
            x: rng.next_f64(),
            y: rng.next_f64(),
            radius: rng.next_range(0.8, 2.2),
            vx: rng.next_range(-MAX_DRIFT, MAX_DRIFT),
            vy: rng.next_range(-MAX_DRIFT, MAX_DRIFT),
        }
    }

    /// Integrates drift over `dt` seconds and wraps into `[WRAP_MIN, WRAP_MAX]`.
    pub fn advance(&mut self, dt: f64) {
        self.x = wrap(self.x + self.vx * dt);
        self.y = wrap(self.y + self.vy * dt);
    }
}

fn wrap(v: f64) -> f64 {
    if v < WRAP_MIN {
        WRAP_MAX
    } else if v > WRAP_MAX {
        WRAP_MIN
    } else {
        v
    }
}

/// Generates `count` points from `rng`.
pub fn generate_points(rng: &mut Mulberry32, count: usize) -> Vec<ParticlePoint> {
    (0..count).map(|_| ParticlePoint::generate(rng)).collect()
}

/// Link radius after progress scaling: 60% at rest, full once revealed.
pub fn link_radius(base: f64, eased: f64) -> f64 {
    base * (0.6 + 0.4 * eased.clamp(0.0, 1.0))
}

/// Alpha of a link between points `distance` apart, or `None` if out of range.
///
/// `(1 - distance / radius) * base_alpha * progress_factor`.
pub fn link_alpha(distance: f64, radius: f64, base_alpha: f64, progress_factor: f64) -> Option<f64> {
    if radius <= 0.0 || distance >= radius {
        return None;
    }
    Some((1.0 - distance / radius) * base_alpha * progress_factor)
}

/// Link fade-in from progress: a faint web at rest, full strength once revealed.
fn progress_factor(eased: f64) -> f64 {
    0.25 + 0.75 * eased.clamp(0.0, 1.0)
}

/// Draws links for every in-range pair, then glows and cores for each point.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &FrameInput,
    theme: &Theme,
    points: &[ParticlePoint],
    base_radius: f64,
    base_alpha: f64,
    alpha: f64,
) {
    let (w, h) = (frame.width, frame.height);
    let eased = frame.progress.eased();
    let radius = link_radius(base_radius, eased);
    let factor = progress_factor(eased) * alpha;
    let ink = theme.ink();

    let px: Vec<DVec2> = points.iter().map(|p| DVec2::new(p.x * w, p.y * h)).collect();

    for (i, a) in px.iter().enumerate() {
        for b in &px[i + 1..] {
            if let Some(link) = link_alpha(a.distance(*b), radius, base_alpha, factor) {
                let paint = Paint::Solid(ink.with_alpha(link));
                ctx.stroke_path(&Path::polyline(&[*a, *b]), &paint, 0.6);
            }
        }
    }

    for (p, center) in points.iter().zip(&px) {
        let glow_r = p.radius * 5.0;
        let glow = Paint::Radial {
            center: *center,
            inner_radius: 0.0,
            outer_radius: glow_r,
            stops: vec![
                GradientStop::new(0.0, theme.accent.with_alpha(0.28 * factor)),
                GradientStop::new(1.0, theme.accent.with_alpha(0.0)),
            ],
        };
        ctx.fill_circle(*center, glow_r, &glow);
        ctx.fill_circle(*center, p.radius, &Paint::Solid(ink.with_alpha(0.75 * alpha)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_fx_core::draw::{DrawCommand, Recorder};

    #[test]
    fn generates_exact_count_in_unit_square() {
        let mut rng = Mulberry32::new(7);
        let pts = generate_points(&mut rng, 56);
        assert_eq!(pts.len(), 56);
        for p in &pts {
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y), "{p:?}");
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = generate_points(&mut Mulberry32::new(99), 20);
        let b = generate_points(&mut Mulberry32::new(99), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn advance_wraps_past_margins() {
        let mut p = ParticlePoint {
            x: 1.049,
            y: -0.049,
            radius: 1.0,
            vx: 0.01,
            vy: -0.01,
        };
        p.advance(1.0);
        assert_eq!(p.x, WRAP_MIN);
        assert_eq!(p.y, WRAP_MAX);
    }

    #[test]
    fn zero_dt_leaves_points_in_place() {
        let mut pts = generate_points(&mut Mulberry32::new(3), 10);
        let before = pts.clone();
        pts.iter_mut().for_each(|p| p.advance(0.0));
        assert_eq!(pts, before);
    }

    #[test]
    fn link_alpha_falls_off_linearly() {
        assert_eq!(link_alpha(0.0, 100.0, 0.2, 1.0), Some(0.2));
        assert!((link_alpha(50.0, 100.0, 0.2, 0.5).unwrap() - 0.05).abs() < 1e-12);
        assert_eq!(link_alpha(100.0, 100.0, 0.2, 1.0), None);
        assert_eq!(link_alpha(1.0, 0.0, 0.2, 1.0), None);
    }

    #[test]
    fn close_pair_is_linked_distant_pair_is_not() {
        let pts = [
            ParticlePoint { x: 0.1, y: 0.1, radius: 1.0, vx: 0.0, vy: 0.0 },
            ParticlePoint { x: 0.12, y: 0.1, radius: 1.0, vx: 0.0, vy: 0.0 },
            ParticlePoint { x: 0.9, y: 0.9, radius: 1.0, vx: 0.0, vy: 0.0 },
        ];
        let mut rec = Recorder::new();
        draw(&mut rec, &FrameInput::new(1000.0, 1000.0), &Theme::default(), &pts, 120.0, 0.2, 1.0);
        let strokes = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { .. }))
            .count();
        let circles = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(strokes, 1);
        assert_eq!(circles, 6);
    }
}
