#![deny(unsafe_code)]
//! Layered 2D atmosphere effect.
//!
//! Each frame composites, bottom to top: a pointer-following glow, drifting
//! cloud glows, rippling flow-line bands, a drifting constellation graph,
//! branch curves that grow with scroll progress, a twinkling star field,
//! butterflies crossing the surface, and a vignette. Point, branch, star and
//! butterfly layouts are generated once from the seed; only particle
//! positions change between frames.

pub mod constellation;
pub mod flight;
pub mod flow;
pub mod growth;
pub mod layers;
pub mod params;
pub mod twinkle;
pub mod wash;

use ambient_fx_core::{DrawContext, Effect, FrameInput, FxError, Mulberry32, SurfaceConfig, Theme};
use serde_json::Value;

pub use constellation::ParticlePoint;
pub use flight::Butterfly;
pub use growth::Branch;
pub use layers::{LayerKind, LayerStack};
pub use params::{AtmosParams, Variant};
pub use twinkle::Star;
pub use wash::GlowShift;

/// Registry name of this effect.
pub const NAME: &str = "atmos";

/// The atmosphere effect for one surface.
pub struct AtmosRenderer {
    variant: Variant,
    seed: u32,
    theme: Theme,
    params: AtmosParams,
    layers: LayerStack,
    shift: GlowShift,
    points: Vec<ParticlePoint>,
    branches: Vec<Branch>,
    stars: Vec<Star>,
    flock: Vec<Butterfly>,
}

impl AtmosRenderer {
    /// Builds the renderer and generates its layout from `seed`.
    ///
    /// The stream is consumed in a fixed order (glow shift, points, branches,
    /// stars, butterflies) so equal inputs always produce equal layouts.
    pub fn new(variant: Variant, seed: u32, theme: Theme, params: AtmosParams, layers: LayerStack) -> Self {
        let mut rng = Mulberry32::new(seed);
        let shift = GlowShift::generate(&mut rng);
        let points = constellation::generate_points(&mut rng, params.points);
        let branches = growth::generate_branches(&mut rng, params.branches);
        let stars = twinkle::generate_stars(&mut rng, params.stars);
        let flock = flight::generate_butterflies(&mut rng, params.butterflies);
        tracing::debug!(
            variant = variant.name(),
            seed,
            points = points.len(),
            branches = branches.len(),
            stars = stars.len(),
            butterflies = flock.len(),
            "atmos layout generated"
        );
        Self {
            variant,
            seed,
            theme,
            params,
            layers,
            shift,
            points,
            branches,
            stars,
            flock,
        }
    }

    /// Builds the renderer from a surface config.
    ///
    /// # Errors
    ///
    /// Returns `FxError::UnknownVariant` for an unknown variant tag, or the
    /// config's validation error.
    pub fn from_config(config: &SurfaceConfig, theme: Theme) -> Result<Self, FxError> {
        config.validate()?;
        let variant = Variant::from_name(&config.variant)?;
        let params = AtmosParams::from_json(variant, &config.params).with_intensity(config.intensity);
        let layers = LayerStack::from_params(&config.params);
        Ok(Self::new(variant, config.seed, theme, params, layers))
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn points(&self) -> &[ParticlePoint] {
        &self.points
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn butterflies(&self) -> &[Butterfly] {
        &self.flock
    }

    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }
}

impl Effect for AtmosRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variant(&self) -> &str {
        self.variant.name()
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, frame: &FrameInput) {
        if frame.is_degenerate() {
            return;
        }
        for p in &mut self.points {
            p.advance(frame.dt);
        }

        ctx.clear();
        let p = &self.params;
        for (kind, opacity) in self.layers.active(frame.policy.decorative_enabled()) {
            let alpha = opacity * p.intensity;
            match kind {
                LayerKind::Glow => wash::draw_glow(ctx, frame, &self.theme, self.shift, alpha),
                LayerKind::Clouds => wash::draw_clouds(ctx, frame, &self.theme, alpha),
                LayerKind::FlowLines => {
                    flow::draw(ctx, frame, &self.theme, p.bands, p.amplitude, p.speed, alpha)
                }
                LayerKind::Constellation => constellation::draw(
                    ctx,
                    frame,
                    &self.theme,
                    &self.points,
                    p.link_radius,
                    p.link_alpha,
                    alpha,
                ),
                LayerKind::Growth => growth::draw(
                    ctx,
                    frame,
                    &self.theme,
                    &self.branches,
                    p.stagger,
                    p.branch_samples,
                    alpha,
                ),
                LayerKind::Twinkle => twinkle::draw(ctx, frame, &self.theme, &self.stars, alpha),
                LayerKind::Butterflies => flight::draw(ctx, frame, &self.theme, &self.flock, alpha),
                LayerKind::Vignette => wash::draw_vignette(ctx, frame, &self.theme, alpha),
            }
        }
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        params::param_schema()
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_fx_core::draw::{DrawCommand, Recorder};
    use ambient_fx_core::{MotionPolicy, PointerState, Progress};
    use serde_json::json;

    fn renderer(variant: &str, seed: u32) -> AtmosRenderer {
        AtmosRenderer::from_config(&SurfaceConfig::new(NAME, variant, seed), Theme::default()).unwrap()
    }

    #[test]
    fn dense_seed_7_generates_56_points_in_unit_square() {
        let r = renderer("dense", 7);
        assert_eq!(r.points().len(), 56);
        for p in r.points() {
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y), "{p:?}");
        }
    }

    #[test]
    fn same_seed_and_variant_reproduce_layout() {
        let a = renderer("journey", 1234);
        let b = renderer("journey", 1234);
        assert_eq!(a.points(), b.points());
        assert_eq!(a.branches(), b.branches());
        assert_eq!(a.stars(), b.stars());
        assert_ne!(renderer("journey", 1235).points(), a.points());
    }

    #[test]
    fn butterflies_follow_the_earlier_layout() {
        let base = renderer("hero", 77);
        assert_eq!(base.butterflies().len(), params::DEFAULT_BUTTERFLIES);
        let config = SurfaceConfig::new(NAME, "hero", 77).with_params(json!({"butterflies": 0}));
        let none = AtmosRenderer::from_config(&config, Theme::default()).unwrap();
        assert!(none.butterflies().is_empty());
        assert_eq!(none.points(), base.points());
        assert_eq!(none.stars(), base.stars());
    }

    #[test]
    fn butterflies_cross_over_time() {
        let params = json!({"bands": 0, "points": 0, "branches": 0, "stars": 0, "butterflies": 2,
                            "layers": {"glow": false, "clouds": false, "vignette": false}});
        let config = SurfaceConfig::new(NAME, "journey", 4).with_params(params);
        let mut r = AtmosRenderer::from_config(&config, Theme::default()).unwrap();
        let mut early = Recorder::new();
        let mut late = Recorder::new();
        r.render(&mut early, &FrameInput::new(400.0, 300.0).with_time(1.0, 0.016));
        r.render(&mut late, &FrameInput::new(400.0, 300.0).with_time(4.0, 0.016));
        assert_eq!(early.draw_calls(), 1 + 6);
        assert_ne!(early.commands(), late.commands());
    }

    #[test]
    fn zero_width_issues_no_draw_calls() {
        let mut r = renderer("hero", 1);
        let mut rec = Recorder::new();
        r.render(&mut rec, &FrameInput::new(0.0, 300.0).with_time(1.0, 0.016));
        assert_eq!(rec.draw_calls(), 0);
    }

    #[test]
    fn frame_starts_with_clear_and_ends_with_vignette() {
        let mut r = renderer("hero", 1);
        let mut rec = Recorder::new();
        r.render(&mut rec, &FrameInput::new(320.0, 200.0));
        let cmds = rec.commands();
        assert_eq!(cmds.first(), Some(&DrawCommand::Clear));
        assert!(matches!(cmds.last(), Some(DrawCommand::FillRect { .. })));
        let clears = cmds.iter().filter(|c| **c == DrawCommand::Clear).count();
        assert_eq!(clears, 1);
    }

    #[test]
    fn reduced_motion_frames_are_identical() {
        let mut r = renderer("dense", 7);
        let frame = FrameInput::new(640.0, 360.0)
            .with_policy(MotionPolicy::reduced())
            .with_progress(MotionPolicy::reduced().progress(0.2));
        let mut first = Recorder::new();
        let mut second = Recorder::new();
        r.render(&mut first, &frame);
        r.render(&mut second, &frame);
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn reduced_motion_skips_stars_and_butterflies() {
        let params = json!({"bands": 0, "points": 0, "branches": 0, "stars": 12, "butterflies": 3,
                            "layers": {"glow": false, "clouds": false, "vignette": false}});
        let config = SurfaceConfig::new(NAME, "hero", 3).with_params(params);
        let mut r = AtmosRenderer::from_config(&config, Theme::default()).unwrap();

        let mut full = Recorder::new();
        r.render(&mut full, &FrameInput::new(100.0, 100.0));
        assert_eq!(full.draw_calls(), 1 + 12 + 3 * 3);

        let mut reduced = Recorder::new();
        r.render(&mut reduced, &FrameInput::new(100.0, 100.0).with_policy(MotionPolicy::reduced()));
        assert_eq!(reduced.draw_calls(), 1);
    }

    #[test]
    fn particles_drift_with_time_but_not_with_zero_dt() {
        let mut r = renderer("hero", 9);
        let before = r.points().to_vec();
        let mut rec = Recorder::new();
        r.render(&mut rec, &FrameInput::new(100.0, 100.0));
        assert_eq!(r.points(), &before[..]);
        r.render(&mut rec, &FrameInput::new(100.0, 100.0).with_time(0.1, 0.1));
        assert_ne!(r.points(), &before[..]);
    }

    #[test]
    fn more_progress_draws_more_growth() {
        let config = SurfaceConfig::new(NAME, "dense", 5).with_params(json!({
            "bands": 0, "points": 0, "stars": 0, "butterflies": 0,
            "layers": {"glow": false, "clouds": false, "vignette": false}
        }));
        let mut r = AtmosRenderer::from_config(&config, Theme::default()).unwrap();
        let count = |r: &mut AtmosRenderer, raw: f64| {
            let mut rec = Recorder::new();
            let frame = FrameInput::new(200.0, 200.0).with_progress(Progress::from_raw(raw, false));
            r.render(&mut rec, &frame);
            rec.draw_calls()
        };
        assert_eq!(count(&mut r, 0.0), 1);
        assert!(count(&mut r, 1.0) > count(&mut r, 0.3));
    }

    #[test]
    fn pointer_velocity_wobbles_flow_lines() {
        let config = SurfaceConfig::new(NAME, "hero", 2).with_params(json!({
            "points": 0, "branches": 0, "stars": 0, "butterflies": 0,
            "layers": {"glow": false, "clouds": false, "vignette": false}
        }));
        let mut r = AtmosRenderer::from_config(&config, Theme::default()).unwrap();
        let mut still = Recorder::new();
        let mut moving = Recorder::new();
        let frame = FrameInput::new(300.0, 200.0);
        r.render(&mut still, &frame);
        let pointer = PointerState { vx: 0.5, ..PointerState::default() };
        r.render(&mut moving, &frame.with_pointer(pointer));
        assert_ne!(still.commands(), moving.commands());
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let config = SurfaceConfig::new(NAME, "nebula", 1);
        assert!(matches!(
            AtmosRenderer::from_config(&config, Theme::default()),
            Err(FxError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn intensity_is_reported_in_params() {
        let config = SurfaceConfig::new(NAME, "hero", 1).with_intensity(0.4);
        let r = AtmosRenderer::from_config(&config, Theme::default()).unwrap();
        assert_eq!(r.params()["intensity"], 0.4);
        assert!(r.param_schema().get("bands").is_some());
    }
}
