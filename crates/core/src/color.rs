//! Color types for the ambient-fx renderers.
//!
//! [`Srgb`] is the opaque color the theming collaborator hands in (parsed
//! from and serialized to `#rrggbb`). [`Rgba`] is what draw commands carry:
//! an sRGB color plus straight (non-premultiplied) alpha.

use crate::error::FxError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip quantizes to
/// 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color with straight alpha, all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `FxError::InvalidColor` if the input is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, FxError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FxError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| FxError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_u8(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes each channel to 8 bits with rounding.
    pub fn to_u8(self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Attaches an alpha value, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation in sRGB space; `t` is clamped to [0, 1].
    pub fn mix(self, other: Srgb, t: f64) -> Srgb {
        let t = t.clamp(0.0, 1.0);
        Srgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Returns the color part without alpha.
    pub fn rgb(self) -> Srgb {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Multiplies alpha by `factor`, clamping the result to [0, 1].
    pub fn fade(self, factor: f64) -> Rgba {
        Rgba {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise interpolation including alpha; `t` is clamped to [0, 1].
    pub fn mix(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// CSS `rgba(...)` notation, as 2D canvas backends expect.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.rgb().to_u8();
        format!("rgba({r},{g},{b},{:.4})", self.a.clamp(0.0, 1.0))
    }
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
