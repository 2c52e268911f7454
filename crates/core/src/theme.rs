//! Theme inputs supplied by the host page.
//!
//! Renderers never read theme state from anywhere else: the two accents and
//! the light/dark flag arrive through a [`Theme`] value at construction and
//! can be swapped with `set_theme` on the owning surface.

use crate::color::Srgb;
use serde::{Deserialize, Serialize};

/// Light or dark page mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

/// Opaque theming input: two accents and a mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub accent: Srgb,
    pub accent2: Srgb,
    #[serde(default)]
    pub mode: ThemeMode,
}

impl Default for Theme {
    /// Cyan and rose accents on a dark page.
    fn default() -> Self {
        Self {
            accent: Srgb::from_u8(34, 211, 238),
            accent2: Srgb::from_u8(251, 113, 133),
            mode: ThemeMode::Dark,
        }
    }
}

impl Theme {
    /// Returns a copy with the given mode.
    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Edge alpha of the vignette layer. Light pages get a gentler falloff.
    pub fn vignette_strength(&self) -> f64 {
        match self.mode {
            ThemeMode::Dark => 0.22,
            ThemeMode::Light => 0.10,
        }
    }

    /// Base color of the flow lines and particle cores.
    ///
    /// White reads on dark pages; on light pages a deep ink is used instead.
    pub fn ink(&self) -> Srgb {
        match self.mode {
            ThemeMode::Dark => Srgb::WHITE,
            ThemeMode::Light => Srgb::from_u8(15, 23, 42),
        }
    }
}
