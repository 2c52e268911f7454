//! Stage enum and the immutable profile table.

use ambient_fx_core::FxError;
use serde::{Deserialize, Serialize};

/// One named mood of the morph shape, in journey order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Context,
    Egg,
    Larva,
    Pupa,
    Butterfly,
    Contact,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Context,
        Stage::Egg,
        Stage::Larva,
        Stage::Pupa,
        Stage::Butterfly,
        Stage::Contact,
    ];

    /// Parses a stage name (`larva`) or letter (`C`, case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, FxError> {
        let stage = match name.to_ascii_lowercase().as_str() {
            "context" | "a" => Self::Context,
            "egg" | "b" => Self::Egg,
            "larva" | "c" => Self::Larva,
            "pupa" | "d" => Self::Pupa,
            "butterfly" | "e" => Self::Butterfly,
            "contact" | "f" => Self::Contact,
            _ => return Err(FxError::UnknownStage(name.to_string())),
        };
        Ok(stage)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Egg => "egg",
            Self::Larva => "larva",
            Self::Pupa => "pupa",
            Self::Butterfly => "butterfly",
            Self::Contact => "contact",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Context => 'A',
            Self::Egg => 'B',
            Self::Larva => 'C',
            Self::Pupa => 'D',
            Self::Butterfly => 'E',
            Self::Contact => 'F',
        }
    }

    pub fn profile(self) -> &'static StageProfile {
        &PROFILES[self as usize]
    }
}

/// Harmonic tuning for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageProfile {
    /// Amplitudes of the 1st..4th harmonics.
    pub amplitudes: [f64; 4],
    pub base_radius: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Widens the shape near the vertical axis for wing-like stages.
    pub mirror: bool,
}

impl StageProfile {
    /// Copy with anisotropic scale removed.
    pub fn isotropic(&self) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            ..*self
        }
    }
}

const PROFILES: [StageProfile; 6] = [
    StageProfile {
        amplitudes: [0.04, 0.03, 0.02, 0.01],
        base_radius: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
        mirror: false,
    },
    StageProfile {
        amplitudes: [0.02, 0.06, 0.01, 0.0],
        base_radius: 0.9,
        scale_x: 0.86,
        scale_y: 1.12,
        mirror: false,
    },
    StageProfile {
        amplitudes: [0.05, 0.04, 0.08, 0.02],
        base_radius: 1.0,
        scale_x: 1.45,
        scale_y: 0.7,
        mirror: true,
    },
    StageProfile {
        amplitudes: [0.03, 0.09, 0.02, 0.03],
        base_radius: 0.95,
        scale_x: 0.8,
        scale_y: 1.3,
        mirror: false,
    },
    StageProfile {
        amplitudes: [0.06, 0.12, 0.05, 0.08],
        base_radius: 1.05,
        scale_x: 1.35,
        scale_y: 0.9,
        mirror: true,
    },
    StageProfile {
        amplitudes: [0.08, 0.05, 0.06, 0.04],
        base_radius: 1.1,
        scale_x: 1.1,
        scale_y: 1.1,
        mirror: false,
    },
];
