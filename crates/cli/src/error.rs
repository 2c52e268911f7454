//! CLI failures and their process exit codes.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | argument error, reported by clap |
//! | 10   | effect error: unknown effect/variant/stage, GPU-only effect, bad size |
//! | 11   | snapshot could not be written |
//! | 12   | bad user value: color, intensity, pointer, params JSON |
//! | 13   | JSON output could not be produced |

use ambient_fx_core::FxError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Effect(FxError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Effect(_) => 10,
            Self::Io(_) => 11,
            Self::Input(_) => 12,
            Self::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect(e) => write!(f, "{e}"),
            Self::Io(msg) | Self::Input(msg) | Self::Serialization(msg) => f.write_str(msg),
        }
    }
}

impl From<FxError> for CliError {
    /// Write failures and rejected user values get their own codes; the rest
    /// are effect errors.
    fn from(e: FxError) -> Self {
        match e {
            FxError::Io(msg) => Self::Io(msg),
            FxError::InvalidColor(_) | FxError::InvalidIntensity(_) | FxError::ParamTypeMismatch { .. } => {
                Self::Input(e.to_string())
            }
            other => Self::Effect(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
