#![deny(unsafe_code)]
//! GPU fluid/noise effect.
//!
//! [`FluidRenderer`] runs a single fullscreen fragment pass over the
//! [`GpuApi`](ambient_fx_core::GpuApi) seam: value noise warped by a swirl
//! around the pointer, composited at low alpha. [`reference`] evaluates the
//! same fragment math on the CPU, and [`backdrop`] animates the parameters of
//! an SVG turbulence filter that pairs with it.

pub mod backdrop;
pub mod reference;
pub mod renderer;
pub mod shaders;

pub use backdrop::TurbulenceParams;
pub use renderer::FluidRenderer;

use ambient_fx_core::{FxError, SurfaceConfig};
use serde_json::{json, Value};

/// Registry name of this effect.
pub const NAME: &str = "fluid";

/// The only variant.
pub const DEFAULT_VARIANT: &str = "default";

/// Validated construction input for a fluid surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidParams {
    pub intensity: f64,
}

impl FluidParams {
    /// Checks the config and extracts the intensity. The seed is unused.
    pub fn from_config(config: &SurfaceConfig) -> Result<Self, FxError> {
        config.validate()?;
        if config.variant != DEFAULT_VARIANT {
            return Err(FxError::UnknownVariant {
                effect: NAME.into(),
                variant: config.variant.clone(),
            });
        }
        Ok(Self {
            intensity: config.intensity,
        })
    }
}

pub fn param_schema() -> Value {
    json!({
        "intensity": {
            "type": "number",
            "default": 1.0,
            "min": 0.0,
            "description": "Swirl strength; the layer is composited at 0.22x this alpha"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variant_is_accepted() {
        let config = SurfaceConfig::new(NAME, DEFAULT_VARIANT, 0).with_intensity(0.6);
        assert_eq!(FluidParams::from_config(&config).unwrap().intensity, 0.6);
    }

    #[test]
    fn other_variants_are_rejected() {
        let config = SurfaceConfig::new(NAME, "hero", 0);
        assert!(matches!(
            FluidParams::from_config(&config),
            Err(FxError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn negative_intensity_is_rejected() {
        let config = SurfaceConfig::new(NAME, DEFAULT_VARIANT, 0).with_intensity(-1.0);
        assert!(matches!(
            FluidParams::from_config(&config),
            Err(FxError::InvalidIntensity(_))
        ));
    }
}
