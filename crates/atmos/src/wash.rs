//! Radial washes: the pointer glow underneath everything, the drifting
//! cloud glows above it, and the vignette on top.

use ambient_fx_core::draw::{DrawContext, GradientStop, Paint};
use ambient_fx_core::{DVec2, FrameInput, Mulberry32, Rgba, Theme};

/// Fixed anchor of the secondary glow, in normalized coordinates.
pub const SECONDARY_ANCHOR: DVec2 = DVec2::new(0.86, 0.72);

/// Seeded alpha jitter for the two glows, each in `[0, 0.08)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowShift {
    pub a: f64,
    pub b: f64,
}

impl GlowShift {
    pub fn generate(rng: &mut Mulberry32) -> Self {
        Self {
            a: rng.next_f64() * 0.08,
            b: rng.next_f64() * 0.08,
        }
    }

    /// Peak alpha of the pointer glow.
    pub fn primary_alpha(&self) -> f64 {
        0.20 + self.a * 0.06
    }

    /// Peak alpha of the anchored glow.
    pub fn secondary_alpha(&self) -> f64 {
        0.14 + self.b * 0.06
    }
}

/// Pointer-centered accent glow plus an anchored accent2 glow.
pub fn draw_glow(ctx: &mut dyn DrawContext, frame: &FrameInput, theme: &Theme, shift: GlowShift, alpha: f64) {
    let (w, h) = (frame.width, frame.height);
    let reach = w.max(h);
    let (px, py) = frame.pointer.clamped();

    let primary = Paint::Radial {
        center: DVec2::new(px * w, py * h),
        inner_radius: 20.0,
        outer_radius: reach * 0.8,
        stops: vec![
            GradientStop::new(0.0, theme.accent.with_alpha(shift.primary_alpha() * alpha)),
            GradientStop::new(0.45, theme.accent.with_alpha(0.06 * alpha)),
            GradientStop::new(1.0, Rgba::TRANSPARENT),
        ],
    };
    let secondary = Paint::Radial {
        center: SECONDARY_ANCHOR * DVec2::new(w, h),
        inner_radius: 30.0,
        outer_radius: reach * 0.85,
        stops: vec![
            GradientStop::new(0.0, theme.accent2.with_alpha(shift.secondary_alpha() * alpha)),
            GradientStop::new(0.5, theme.accent2.with_alpha(0.05 * alpha)),
            GradientStop::new(1.0, Rgba::TRANSPARENT),
        ],
    };
    ctx.fill_rect(0.0, 0.0, w, h, &primary);
    ctx.fill_rect(0.0, 0.0, w, h, &secondary);
}

/// One soft cloud glow that drifts out and back on its own period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    /// Rest center in normalized coordinates.
    pub anchor: DVec2,
    /// Outer radius in CSS pixels, blur included.
    pub radius: f64,
    /// Peak offset in CSS pixels, reached halfway through the period.
    pub drift: DVec2,
    pub period: f64,
    pub alpha: f64,
}

/// Top-left, right and bottom clouds, tinted accent, accent2 and a mix.
pub const CLOUDS: [Cloud; 3] = [
    Cloud {
        anchor: DVec2::new(0.05, 0.06),
        radius: 224.0,
        drift: DVec2::new(100.0, 18.0),
        period: 22.0,
        alpha: 0.20,
    },
    Cloud {
        anchor: DVec2::new(0.95, 0.3),
        radius: 256.0,
        drift: DVec2::new(-120.0, 28.0),
        period: 30.0,
        alpha: 0.18,
    },
    Cloud {
        anchor: DVec2::new(0.45, 0.9),
        radius: 288.0,
        drift: DVec2::new(85.0, -22.0),
        period: 36.0,
        alpha: 0.16,
    },
];

impl Cloud {
    /// Drift offset at `time`, eased in and out. Zero under reduced motion.
    pub fn offset(&self, time: f64, reduced: bool) -> DVec2 {
        if reduced {
            return DVec2::ZERO;
        }
        let phase = (time / self.period).rem_euclid(1.0);
        self.drift * (0.5 - 0.5 * (phase * std::f64::consts::TAU).cos())
    }
}

pub fn draw_clouds(ctx: &mut dyn DrawContext, frame: &FrameInput, theme: &Theme, alpha: f64) {
    let tints = [theme.accent, theme.accent2, theme.accent.mix(theme.accent2, 0.5)];
    let size = DVec2::new(frame.width, frame.height);
    for (cloud, tint) in CLOUDS.iter().zip(tints) {
        let center = cloud.anchor * size + cloud.offset(frame.time, frame.policy.is_reduced());
        let paint = Paint::Radial {
            center,
            inner_radius: 0.0,
            outer_radius: cloud.radius,
            stops: vec![
                GradientStop::new(0.0, tint.with_alpha(cloud.alpha * alpha)),
                GradientStop::new(0.6, tint.with_alpha(cloud.alpha * 0.35 * alpha)),
                GradientStop::new(1.0, Rgba::TRANSPARENT),
            ],
        };
        ctx.fill_circle(center, cloud.radius, &paint);
    }
}

/// Edge darkening; strength comes from the theme's mode.
pub fn draw_vignette(ctx: &mut dyn DrawContext, frame: &FrameInput, theme: &Theme, alpha: f64) {
    let (w, h) = (frame.width, frame.height);
    let paint = Paint::Radial {
        center: DVec2::new(w * 0.5, h * 0.4),
        inner_radius: 20.0,
        outer_radius: w.max(h),
        stops: vec![
            GradientStop::new(0.0, Rgba::TRANSPARENT),
            GradientStop::new(1.0, Rgba { a: theme.vignette_strength() * alpha, ..Rgba::TRANSPARENT }),
        ],
    };
    ctx.fill_rect(0.0, 0.0, w, h, &paint);
}
