//! Construction parameters for one effect surface.
//!
//! A [`SurfaceConfig`] captures everything needed to recreate a surface's
//! one-time layout: effect name, variant tag, seed, intensity, and tuning
//! params. Two surfaces built from equal configs generate identical point
//! sets and branch geometry.

use crate::error::FxError;
use crate::params::json_type_name;
use serde::{Deserialize, Serialize};

fn default_intensity() -> f64 {
    1.0
}

fn default_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Reproducible construction parameters for an effect surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceConfig {
    pub effect: String,
    pub variant: String,
    pub seed: u32,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    #[serde(default = "default_params")]
    pub params: serde_json::Value,
}

impl SurfaceConfig {
    /// Creates a config with intensity `1.0` and empty params.
    pub fn new(effect: &str, variant: &str, seed: u32) -> Self {
        Self {
            effect: effect.to_string(),
            variant: variant.to_string(),
            seed,
            intensity: default_intensity(),
            params: default_params(),
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Checks that intensity is finite and non-negative and that params is
    /// an object (or null).
    pub fn validate(&self) -> Result<(), FxError> {
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(FxError::InvalidIntensity(self.intensity));
        }
        if !(self.params.is_object() || self.params.is_null()) {
            return Err(FxError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: json_type_name(&self.params).into(),
            });
        }
        Ok(())
    }

    /// The identity-defining part of the config.
    ///
    /// A host rebuilds a surface only when this changes; intensity and
    /// params edits can be applied to a live surface.
    pub fn identity(&self) -> (&str, &str, u32) {
        (&self.effect, &self.variant, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_uses_unit_intensity_and_empty_params() {
        let c = SurfaceConfig::new("atmos", "dense", 7);
        assert_eq!(c.intensity, 1.0);
        assert_eq!(c.params, json!({}));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn json_round_trip_with_params() {
        let c = SurfaceConfig::new("morph", "larva", 3)
            .with_intensity(0.6)
            .with_params(json!({"samples": 16}));
        let json = serde_json::to_string(&c).unwrap();
        let back: SurfaceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let c: SurfaceConfig =
            serde_json::from_value(json!({"effect": "fluid", "variant": "hero", "seed": 1}))
                .unwrap();
        assert_eq!(c.intensity, 1.0);
        assert_eq!(c.params, json!({}));
    }

    #[test]
    fn validate_rejects_negative_and_nan_intensity() {
        let c = SurfaceConfig::new("fluid", "hero", 1).with_intensity(-0.5);
        assert!(matches!(c.validate(), Err(FxError::InvalidIntensity(_))));
        let c = SurfaceConfig::new("fluid", "hero", 1).with_intensity(f64::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_object_params() {
        let c = SurfaceConfig::new("atmos", "hero", 1).with_params(json!([1, 2]));
        match c.validate() {
            Err(FxError::ParamTypeMismatch { got, .. }) => assert_eq!(got, "array"),
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn identity_ignores_intensity_and_params() {
        let a = SurfaceConfig::new("atmos", "hero", 9);
        let b = a.clone().with_intensity(0.2).with_params(json!({"bands": 20}));
        assert_eq!(a.identity(), b.identity());
        let c = SurfaceConfig::new("atmos", "hero", 10);
        assert_ne!(a.identity(), c.identity());
    }
}
