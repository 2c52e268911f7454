//! Branch curves that grow in a staggered cascade as progress increases.
//!
//! Geometry is generated once from the seed; how much of each curve is drawn
//! is a pure function of the current progress, so scrolling back up
//! un-reveals branches without any stored state.

use ambient_fx_core::draw::{DrawContext, Paint, Path};
use ambient_fx_core::progress::reveal_window;
use ambient_fx_core::{DVec2, FrameInput, Mulberry32, Theme};

/// Sub-branches sprouting from each branch.
pub const SUB_BRANCHES: usize = 2;

/// Quadratic curve in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub start: DVec2,
    pub control: DVec2,
    pub end: DVec2,
}

impl Curve {
    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// `samples` points from parameter 0 to `reveal`, in normalized space.
    pub fn sample_to(&self, reveal: f64, samples: usize) -> Vec<DVec2> {
        let last = samples.max(2) - 1;
        (0..=last)
            .map(|j| self.point_at(reveal * j as f64 / last as f64))
            .collect()
    }
}

/// A twig attached to a parent branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubBranch {
    /// Parent parameter the twig sprouts at, in `[0.45, 0.75)`.
    pub t0: f64,
    pub curve: Curve,
    pub stroke_width: f64,
}

/// A growing branch and its twigs.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub curve: Curve,
    pub stroke_width: f64,
    pub subs: Vec<SubBranch>,
}

fn clamp_unit(p: DVec2) -> DVec2 {
    p.clamp(DVec2::ZERO, DVec2::ONE)
}

impl Branch {
    fn generate(rng: &mut Mulberry32) -> Self {
        let start = DVec2::new(rng.next_range(0.08, 0.92), rng.next_range(0.92, 1.0));
        let end = clamp_unit(DVec2::new(
            start.x + rng.next_range(-0.25, 0.25),
            rng.next_range(0.12, 0.55),
        ));
        let mid = (start + end) * 0.5;
        let control = clamp_unit(mid + DVec2::new(rng.next_range(-0.2, 0.2), rng.next_range(-0.1, 0.1)));
        let curve = Curve {
            start,
            control,
            end,
        };
        let stroke_width = rng.next_range(0.8, 2.2);

        let subs = (0..SUB_BRANCHES)
            .map(|k| {
                let t0 = rng.next_range(0.45, 0.75);
                let side = if k % 2 == 0 { -1.0 } else { 1.0 };
                let len = rng.next_range(0.08, 0.18);
                let origin = curve.point_at(t0);
                let tip = clamp_unit(origin + DVec2::new(side * len * 0.8, -len * 0.6));
                let bend = clamp_unit((origin + tip) * 0.5 + DVec2::new(0.0, -len * 0.25));
                SubBranch {
                    t0,
                    curve: Curve {
                        start: origin,
                        control: bend,
                        end: tip,
                    },
                    stroke_width: stroke_width * 0.6,
                }
            })
            .collect();

        Self {
            curve,
            stroke_width,
            subs,
        }
    }
}

/// Generates `count` branches from `rng`.
pub fn generate_branches(rng: &mut Mulberry32, count: usize) -> Vec<Branch> {
    (0..count).map(|_| Branch::generate(rng)).collect()
}

/// Reveal fraction of branch `index` of `count` at eased progress `eased`.
///
/// The cascade is stretched by `1 + stagger * (count - 1)` so the last branch
/// completes exactly at full progress.
pub fn branch_reveal(eased: f64, index: usize, count: usize, stagger: f64) -> f64 {
    let span = 1.0 + stagger * count.saturating_sub(1) as f64;
    let grow = eased.clamp(0.0, 1.0) * span;
    (grow - index as f64 * stagger).clamp(0.0, 1.0)
}

/// Reveal of a twig given its parent's reveal.
pub fn sub_reveal(parent_reveal: f64, t0: f64) -> f64 {
    reveal_window(parent_reveal, t0, 1.0 - t0)
}

/// Draws every branch up to its current reveal.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &FrameInput,
    theme: &Theme,
    branches: &[Branch],
    stagger: f64,
    samples: usize,
    alpha: f64,
) {
    let scale = DVec2::new(frame.width, frame.height);
    let n = branches.len();
    let last = n.max(2) - 1;

    for (i, branch) in branches.iter().enumerate() {
        let reveal = branch_reveal(frame.progress.eased(), i, n, stagger);
        if reveal <= 0.0 {
            continue;
        }
        let color = theme.accent.mix(theme.accent2, i as f64 / last as f64);
        let paint = Paint::Solid(color.with_alpha(0.5 * alpha));
        let pts: Vec<DVec2> = branch.curve.sample_to(reveal, samples).into_iter().map(|p| p * scale).collect();
        ctx.stroke_path(&Path::polyline(&pts), &paint, branch.stroke_width);

        for sub in &branch.subs {
            let r = sub_reveal(reveal, sub.t0);
            if r <= 0.0 {
                continue;
            }
            let twig: Vec<DVec2> = sub.curve.sample_to(r, samples / 2).into_iter().map(|p| p * scale).collect();
            ctx.stroke_path(&Path::polyline(&twig), &paint, sub.stroke_width);
        }
    }
}
