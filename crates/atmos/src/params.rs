//! Variant table and tunable constants for the atmosphere effect.

use ambient_fx_core::params::ParamReader;
use ambient_fx_core::FxError;
use serde_json::{json, Value};

/// Upper bound for any count that drives per-frame work.
pub const MAX_COUNT: usize = 240;

/// Default branch reveal stagger, in progress units per branch.
pub const DEFAULT_STAGGER: f64 = 0.012;
/// Default curve samples per branch.
pub const DEFAULT_BRANCH_SAMPLES: usize = 26;
/// Default butterfly count, the same for every variant.
pub const DEFAULT_BUTTERFLIES: usize = 10;
/// Default constellation link radius in CSS pixels at full progress.
pub const DEFAULT_LINK_RADIUS: f64 = 120.0;
/// Default peak alpha of a constellation link.
pub const DEFAULT_LINK_ALPHA: f64 = 0.22;

/// Preset selecting counts, amplitude and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Hero,
    Journey,
    Dense,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Hero, Variant::Journey, Variant::Dense];

    /// Parses a variant tag.
    ///
    /// # Errors
    ///
    /// Returns `FxError::UnknownVariant` for anything but `hero`, `journey`
    /// or `dense`.
    pub fn from_name(name: &str) -> Result<Self, FxError> {
        match name {
            "hero" => Ok(Self::Hero),
            "journey" => Ok(Self::Journey),
            "dense" => Ok(Self::Dense),
            other => Err(FxError::UnknownVariant {
                effect: "atmos".into(),
                variant: other.into(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Journey => "journey",
            Self::Dense => "dense",
        }
    }

    /// `(bands, points, branches, stars, amplitude px, speed rad/s)`.
    fn table(self) -> (usize, usize, usize, usize, f64, f64) {
        match self {
            Self::Hero => (18, 42, 5, 40, 18.0, 1.08),
            Self::Journey => (22, 48, 7, 30, 14.0, 0.84),
            Self::Dense => (16, 56, 9, 70, 12.0, 0.72),
        }
    }
}

/// Resolved parameters for one atmosphere surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosParams {
    pub bands: usize,
    pub points: usize,
    pub branches: usize,
    pub stars: usize,
    pub butterflies: usize,
    /// Flow-line amplitude in CSS pixels.
    pub amplitude: f64,
    /// Flow-line phase speed in radians per second.
    pub speed: f64,
    pub stagger: f64,
    pub branch_samples: usize,
    pub link_radius: f64,
    pub link_alpha: f64,
    /// Global alpha multiplier from the surface config.
    pub intensity: f64,
}

impl AtmosParams {
    /// Variant defaults with intensity 1.
    pub fn for_variant(variant: Variant) -> Self {
        let (bands, points, branches, stars, amplitude, speed) = variant.table();
        Self {
            bands,
            points,
            branches,
            stars,
            butterflies: DEFAULT_BUTTERFLIES,
            amplitude,
            speed,
            stagger: DEFAULT_STAGGER,
            branch_samples: DEFAULT_BRANCH_SAMPLES,
            link_radius: DEFAULT_LINK_RADIUS,
            link_alpha: DEFAULT_LINK_ALPHA,
            intensity: 1.0,
        }
    }

    /// Variant defaults overridden by any keys present in `params`.
    pub fn from_json(variant: Variant, params: &Value) -> Self {
        let base = Self::for_variant(variant);
        let r = ParamReader::new(params);
        Self {
            bands: r.count("bands", base.bands, MAX_COUNT),
            points: r.count("points", base.points, MAX_COUNT),
            branches: r.count("branches", base.branches, MAX_COUNT),
            stars: r.count("stars", base.stars, MAX_COUNT),
            butterflies: r.count("butterflies", base.butterflies, MAX_COUNT),
            amplitude: r.f64_in("amplitude", base.amplitude, 0.0, 200.0),
            speed: r.f64_in("speed", base.speed, 0.0, 20.0),
            stagger: r.f64_in("stagger", base.stagger, 0.0, 1.0),
            branch_samples: r.count("branch_samples", base.branch_samples, 512).max(2),
            link_radius: r.f64_in("link_radius", base.link_radius, 0.0, 2000.0),
            link_alpha: r.f64_in("link_alpha", base.link_alpha, 0.0, 1.0),
            intensity: base.intensity,
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity.max(0.0);
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "bands": self.bands,
            "points": self.points,
            "branches": self.branches,
            "stars": self.stars,
            "butterflies": self.butterflies,
            "amplitude": self.amplitude,
            "speed": self.speed,
            "stagger": self.stagger,
            "branch_samples": self.branch_samples,
            "link_radius": self.link_radius,
            "link_alpha": self.link_alpha,
            "intensity": self.intensity,
        })
    }
}

/// Parameter schema shared by every atmosphere variant.
pub fn param_schema() -> Value {
    json!({
        "bands": {
            "type": "integer", "default": 18, "min": 0, "max": MAX_COUNT,
            "description": "Number of flow-line bands (variant default: hero 18, journey 22, dense 16)"
        },
        "points": {
            "type": "integer", "default": 42, "min": 0, "max": MAX_COUNT,
            "description": "Constellation point count (hero 42, journey 48, dense 56)"
        },
        "branches": {
            "type": "integer", "default": 5, "min": 0, "max": MAX_COUNT,
            "description": "Growth branch count (hero 5, journey 7, dense 9)"
        },
        "stars": {
            "type": "integer", "default": 40, "min": 0, "max": MAX_COUNT,
            "description": "Twinkle star count (hero 40, journey 30, dense 70)"
        },
        "butterflies": {
            "type": "integer", "default": DEFAULT_BUTTERFLIES, "min": 0, "max": MAX_COUNT,
            "description": "Butterflies crossing the surface; hidden under reduced motion"
        },
        "amplitude": {
            "type": "number", "default": 18.0, "min": 0.0, "max": 200.0,
            "description": "Flow-line amplitude in CSS pixels"
        },
        "speed": {
            "type": "number", "default": 1.08, "min": 0.0, "max": 20.0,
            "description": "Flow-line phase speed in radians per second"
        },
        "stagger": {
            "type": "number", "default": DEFAULT_STAGGER, "min": 0.0, "max": 1.0,
            "description": "Progress offset between successive branch reveals"
        },
        "branch_samples": {
            "type": "integer", "default": DEFAULT_BRANCH_SAMPLES, "min": 2, "max": 512,
            "description": "Curve samples per branch"
        },
        "link_radius": {
            "type": "number", "default": DEFAULT_LINK_RADIUS, "min": 0.0, "max": 2000.0,
            "description": "Constellation link radius in CSS pixels at full progress"
        },
        "link_alpha": {
            "type": "number", "default": DEFAULT_LINK_ALPHA, "min": 0.0, "max": 1.0,
            "description": "Peak alpha of a constellation link"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_table_matches_presets() {
        let dense = AtmosParams::for_variant(Variant::Dense);
        assert_eq!((dense.bands, dense.points, dense.branches, dense.stars), (16, 56, 9, 70));
        let journey = AtmosParams::for_variant(Variant::Journey);
        assert_eq!(journey.bands, 22);
        assert_eq!(journey.amplitude, 14.0);
    }

    #[test]
    fn variant_names_round_trip() {
        for v in Variant::ALL {
            assert_eq!(Variant::from_name(v.name()).unwrap(), v);
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        match Variant::from_name("galaxy") {
            Err(FxError::UnknownVariant { effect, variant }) => {
                assert_eq!(effect, "atmos");
                assert_eq!(variant, "galaxy");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_json_overrides_and_clamps() {
        let p = AtmosParams::from_json(
            Variant::Hero,
            &json!({"points": 56, "bands": 10_000, "stagger": "x", "branch_samples": 0}),
        );
        assert_eq!(p.points, 56);
        assert_eq!(p.bands, MAX_COUNT);
        assert_eq!(p.stagger, DEFAULT_STAGGER);
        assert_eq!(p.branch_samples, 2);
    }

    #[test]
    fn schema_lists_every_param() {
        let schema = param_schema();
        let p = AtmosParams::for_variant(Variant::Hero).to_json();
        for key in p.as_object().unwrap().keys().filter(|k| *k != "intensity") {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }
}
