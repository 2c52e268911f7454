//! Error types for the ambient-fx core.

use thiserror::Error;

/// Errors produced while configuring or constructing an effect surface.
///
/// Frame-time failures never surface as errors: a surface that cannot draw
/// degrades to rendering nothing. These variants cover the construction
/// paths (registry lookups, configuration validation, snapshots).
#[derive(Debug, Error)]
pub enum FxError {
    /// Width or height was zero where a drawable area is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The requested effect name is not registered.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// The variant tag is not known to the selected effect.
    #[error("unknown variant '{variant}' for effect '{effect}'")]
    UnknownVariant { effect: String, variant: String },

    /// A stage name or letter did not match any stage profile.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// The construction intensity was negative or not finite.
    #[error("invalid intensity: {0}")]
    InvalidIntensity(f64),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The effect needs a GPU context and none is available on this path.
    #[error("effect '{0}' requires a GPU context")]
    GpuRequired(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
