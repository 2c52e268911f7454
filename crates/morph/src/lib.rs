#![deny(unsafe_code)]
//! Harmonic shape-morph effect.
//!
//! A closed blob whose radius at each angle is a sum of time-dependent
//! harmonics, scaled in by scroll progress and shaped per [`Stage`]. The
//! outline is sampled at a handful of angles and connected with a closed
//! Catmull-Rom spline, then filled and stroked.

pub mod shape;
pub mod spline;
pub mod stage;

use ambient_fx_core::draw::{GradientStop, Paint};
use ambient_fx_core::params::ParamReader;
use ambient_fx_core::progress::{reveal_window, stage_index};
use ambient_fx_core::{DVec2, DrawContext, Effect, FrameInput, FxError, SurfaceConfig, Theme};
use serde_json::{json, Value};

pub use shape::{outline_point, radius, sample_outline};
pub use spline::{closed_catmull_rom, CubicSegment};
pub use stage::{Stage, StageProfile};

/// Registry name of this effect.
pub const NAME: &str = "morph";

/// Variant tag that walks through every stage as progress advances.
pub const JOURNEY: &str = "journey";

const DEFAULT_SAMPLES: usize = 12;
const DEFAULT_SIZE: f64 = 0.3;
const DEFAULT_OUTLINE_WIDTH: f64 = 2.0;

/// Which stage a morph surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphMode {
    Fixed(Stage),
    /// Stage chosen from progress with [`stage_index`].
    Journey,
}

impl MorphMode {
    pub fn from_name(name: &str) -> Result<Self, FxError> {
        if name == JOURNEY {
            return Ok(Self::Journey);
        }
        Stage::from_name(name).map(Self::Fixed).map_err(|_| FxError::UnknownVariant {
            effect: NAME.into(),
            variant: name.into(),
        })
    }

    /// Stage shown at eased progress `p`.
    pub fn stage_at(self, p: f64) -> Stage {
        match self {
            Self::Fixed(stage) => stage,
            Self::Journey => Stage::ALL[stage_index(p, Stage::ALL.len())],
        }
    }
}

/// Tunables for the morph effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphParams {
    /// Outline sample count (at least 3).
    pub samples: usize,
    /// Shape radius as a fraction of the shorter surface side.
    pub size: f64,
    pub outline_width: f64,
    pub intensity: f64,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            size: DEFAULT_SIZE,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            intensity: 1.0,
        }
    }
}

impl MorphParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let r = ParamReader::new(params);
        Self {
            samples: r.count("samples", DEFAULT_SAMPLES, 256).max(3),
            size: r.f64_in("size", DEFAULT_SIZE, 0.01, 1.0),
            outline_width: r.f64_in("outline_width", DEFAULT_OUTLINE_WIDTH, 0.0, 32.0),
            intensity: 1.0,
        }
    }
}

/// Parameter schema shared by every stage.
pub fn param_schema() -> Value {
    json!({
        "samples": {
            "type": "integer",
            "default": DEFAULT_SAMPLES,
            "min": 3,
            "max": 256,
            "description": "Outline sample count connected by the spline"
        },
        "size": {
            "type": "number",
            "default": DEFAULT_SIZE,
            "min": 0.01,
            "max": 1.0,
            "description": "Shape radius as a fraction of the shorter surface side"
        },
        "outline_width": {
            "type": "number",
            "default": DEFAULT_OUTLINE_WIDTH,
            "min": 0.0,
            "max": 32.0,
            "description": "Outline stroke width in CSS pixels"
        }
    })
}

/// The morph effect for one surface.
pub struct MorphRenderer {
    mode: MorphMode,
    variant: String,
    theme: Theme,
    params: MorphParams,
}

impl MorphRenderer {
    pub fn new(mode: MorphMode, theme: Theme, params: MorphParams) -> Self {
        let variant = match mode {
            MorphMode::Fixed(stage) => stage.name().to_string(),
            MorphMode::Journey => JOURNEY.to_string(),
        };
        tracing::debug!(variant = %variant, samples = params.samples, "morph renderer built");
        Self {
            mode,
            variant,
            theme,
            params,
        }
    }

    /// Builds the renderer from a surface config. The seed is unused: the
    /// shape is fully determined by stage, progress, and time.
    pub fn from_config(config: &SurfaceConfig, theme: Theme) -> Result<Self, FxError> {
        config.validate()?;
        let mode = MorphMode::from_name(&config.variant)?;
        let params = MorphParams {
            intensity: config.intensity,
            ..MorphParams::from_json(&config.params)
        };
        Ok(Self::new(mode, theme, params))
    }

    pub fn mode(&self) -> MorphMode {
        self.mode
    }

    /// Outline segments in unit space for a given progress and time.
    pub fn outline(&self, p: f64, t: f64) -> Vec<CubicSegment> {
        let profile = self.mode.stage_at(p).profile();
        closed_catmull_rom(&sample_outline(profile, self.params.samples, p, t))
    }
}

impl Effect for MorphRenderer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variant(&self) -> &str {
        &self.variant
    }

    fn render(&mut self, ctx: &mut dyn DrawContext, frame: &FrameInput) {
        if frame.is_degenerate() {
            return;
        }
        ctx.clear();

        let p = frame.progress.eased();
        let segments = self.outline(p, frame.time);
        let center = DVec2::new(frame.width * 0.5, frame.height * 0.5);
        let scale = frame.width.min(frame.height) * self.params.size;
        let path = spline::to_path(&segments, |q| center + q * scale);

        let alpha = self.params.intensity;
        let fill_a = 0.28 * reveal_window(p, 0.18, 0.42) * alpha;
        let line_a = (0.35 + 0.65 * reveal_window(p, 0.02, 0.30)) * alpha;

        if fill_a > 0.0 {
            let fill = Paint::Radial {
                center,
                inner_radius: 0.0,
                outer_radius: scale * 1.6,
                stops: vec![
                    GradientStop::new(0.0, self.theme.accent.with_alpha(fill_a)),
                    GradientStop::new(1.0, self.theme.accent2.with_alpha(fill_a * 0.4)),
                ],
            };
            ctx.fill_path(&path, &fill);
        }
        let stroke = Paint::Linear {
            from: center - DVec2::splat(scale),
            to: center + DVec2::splat(scale),
            stops: vec![
                GradientStop::new(0.0, self.theme.accent.with_alpha(line_a)),
                GradientStop::new(1.0, self.theme.accent2.with_alpha(line_a)),
            ],
        };
        ctx.stroke_path(&path, &stroke, self.params.outline_width);
    }

    fn params(&self) -> Value {
        json!({
            "samples": self.params.samples,
            "size": self.params.size,
            "outline_width": self.params.outline_width,
            "intensity": self.params.intensity,
        })
    }

    fn param_schema(&self) -> Value {
        param_schema()
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
