#![deny(unsafe_code)]
//! Core types and traits for the ambient-fx effect system.
//!
//! Provides the `Effect` trait and `FrameInput`, the `DrawContext` 2D seam
//! with its `Recorder`, the `GpuApi` seam with shader helpers, the
//! `Mulberry32` PRNG, scroll `Progress` and the reduced-motion policy,
//! pointer state, scroll tilt, colors and theme inputs, surface
//! configuration, and parameter helpers.

pub mod color;
pub mod config;
pub mod draw;
pub mod effect;
pub mod error;
pub mod gpu;
pub mod motion;
pub mod params;
pub mod pointer;
pub mod prng;
pub mod progress;
pub mod theme;
pub mod tilt;

pub use color::{Rgba, Srgb};
pub use config::SurfaceConfig;
pub use draw::{DrawCommand, DrawContext, GradientStop, Paint, Path, Recorder};
pub use effect::{Effect, FrameInput};
pub use error::FxError;
pub use gpu::{GpuApi, ShaderError, ShaderStage};
pub use motion::{MotionPolicy, MotionPreference, PhaseClock};
pub use params::ParamReader;
pub use pointer::{ClientRect, PointerState};
pub use prng::Mulberry32;
pub use progress::{Progress, RegionRect};
pub use theme::{Theme, ThemeMode};
pub use tilt::{scroll_tilt, Tilt, TiltLimits};

/// Re-exported so downstream crates share one vector type.
pub use glam::DVec2;
