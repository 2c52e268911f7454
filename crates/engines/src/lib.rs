#![deny(unsafe_code)]
//! Effect registry, surface lifecycle, and CPU-side snapshot rendering.
//!
//! This crate sits between `ambient-fx-core` (which defines the `Effect`
//! trait and the drawing seams) and the effect crates (`ambient-fx-atmos`,
//! `ambient-fx-morph`, `ambient-fx-fluid`). Both the CLI and the WASM
//! bindings depend on it to share dispatch and lifecycle logic.

pub mod lifecycle;
pub mod pixel;
pub mod raster;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

pub use lifecycle::{FrameId, HostBindings, Lifecycle, Listener, SurfaceState};
pub use raster::Raster;
pub use surface::{CanvasSurface, GpuSurface};

use ambient_fx_core::{Effect, FxError, SurfaceConfig, Theme};
use serde_json::Value;

/// All registered effect names.
const EFFECT_NAMES: &[&str] = &[
    ambient_fx_atmos::NAME,
    ambient_fx_morph::NAME,
    ambient_fx_fluid::NAME,
];

const ATMOS_VARIANTS: &[&str] = &["hero", "journey", "dense"];
const MORPH_VARIANTS: &[&str] = &["context", "egg", "larva", "pupa", "butterfly", "contact", "journey"];
const FLUID_VARIANTS: &[&str] = &[ambient_fx_fluid::DEFAULT_VARIANT];

/// The available ambient effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Layered 2D atmosphere: glows, flow lines, constellation, growth, stars, butterflies, vignette.
    Atmos,
    /// Harmonic blob morphing through stage profiles.
    Morph,
    /// GPU value-noise swirl.
    Fluid,
}

impl EffectKind {
    /// Looks an effect up by registry name.
    ///
    /// Returns `FxError::UnknownEffect` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FxError> {
        match name {
            ambient_fx_atmos::NAME => Ok(Self::Atmos),
            ambient_fx_morph::NAME => Ok(Self::Morph),
            ambient_fx_fluid::NAME => Ok(Self::Fluid),
            _ => Err(FxError::UnknownEffect(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Atmos => ambient_fx_atmos::NAME,
            Self::Morph => ambient_fx_morph::NAME,
            Self::Fluid => ambient_fx_fluid::NAME,
        }
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }

    pub fn variants(self) -> &'static [&'static str] {
        match self {
            Self::Atmos => ATMOS_VARIANTS,
            Self::Morph => MORPH_VARIANTS,
            Self::Fluid => FLUID_VARIANTS,
        }
    }

    /// Whether the effect draws through the GPU seam rather than a 2D context.
    pub fn requires_gpu(self) -> bool {
        self == Self::Fluid
    }

    pub fn param_schema(self) -> Value {
        match self {
            Self::Atmos => ambient_fx_atmos::params::param_schema(),
            Self::Morph => ambient_fx_morph::param_schema(),
            Self::Fluid => ambient_fx_fluid::param_schema(),
        }
    }

    /// Builds a 2D effect from a surface config.
    ///
    /// Returns `FxError::GpuRequired` for GPU effects, which are mounted on a
    /// [`GpuSurface`] instead.
    pub fn build(config: &SurfaceConfig, theme: Theme) -> Result<Box<dyn Effect>, FxError> {
        match Self::from_name(&config.effect)? {
            Self::Atmos => Ok(Box::new(ambient_fx_atmos::AtmosRenderer::from_config(config, theme)?)),
            Self::Morph => Ok(Box::new(ambient_fx_morph::MorphRenderer::from_config(config, theme)?)),
            Self::Fluid => Err(FxError::GpuRequired(config.effect.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_fx_core::{FrameInput, Recorder};
    use serde_json::json;

    #[test]
    fn from_name_resolves_every_listed_effect() {
        for name in EffectKind::list_effects() {
            assert_eq!(EffectKind::from_name(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        assert!(matches!(
            EffectKind::from_name("nonexistent"),
            Err(FxError::UnknownEffect(_))
        ));
    }

    #[test]
    fn every_cpu_variant_builds() {
        for kind in [EffectKind::Atmos, EffectKind::Morph] {
            for variant in kind.variants() {
                let config = SurfaceConfig::new(kind.name(), variant, 7);
                let effect = EffectKind::build(&config, Theme::default()).unwrap();
                assert_eq!(effect.name(), kind.name());
                assert_eq!(effect.variant(), *variant);
            }
        }
    }

    #[test]
    fn fluid_requires_gpu() {
        let config = SurfaceConfig::new("fluid", "default", 1);
        assert!(EffectKind::Fluid.requires_gpu());
        assert!(matches!(
            EffectKind::build(&config, Theme::default()),
            Err(FxError::GpuRequired(_))
        ));
    }

    #[test]
    fn unknown_variant_is_reported() {
        let config = SurfaceConfig::new("atmos", "sparkly", 1);
        assert!(matches!(
            EffectKind::build(&config, Theme::default()),
            Err(FxError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn schemas_are_objects() {
        for name in EffectKind::list_effects() {
            assert!(EffectKind::from_name(name).unwrap().param_schema().is_object());
        }
    }

    #[test]
    fn dense_scenario_through_registry() {
        let config = SurfaceConfig::new("atmos", "dense", 7).with_params(json!({"points": 56}));
        let mut effect = EffectKind::build(&config, Theme::default()).unwrap();
        assert_eq!(effect.params()["points"], 56);

        let mut rec = Recorder::new();
        effect.render(&mut rec, &FrameInput::new(0.0, 300.0));
        assert_eq!(rec.draw_calls(), 0);
    }

    #[test]
    fn object_safety() {
        let config = SurfaceConfig::new("morph", "egg", 1);
        let boxed: Box<dyn Effect> = EffectKind::build(&config, Theme::default()).unwrap();
        assert_eq!(boxed.name(), "morph");
    }
}
