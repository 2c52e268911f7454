//! Pure-computation frame rendering to an RGBA8 buffer.
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and the WASM `ImageData` path can share it. 2D effects are
//! rasterized with [`Raster`]; the fluid effect is evaluated with its CPU
//! reference shader.

use crate::lifecycle::{backing_size, effective_dpr};
use crate::raster::{self, Raster};
use crate::EffectKind;
use ambient_fx_core::{Effect, FrameInput, FxError, MotionPolicy, PhaseClock, PointerState, SurfaceConfig, Theme};
use ambient_fx_fluid::FluidParams;
use serde::{Deserialize, Serialize};

/// Frame interval used when stepping a snapshot forward.
pub const SNAPSHOT_FRAME_DT: f64 = 1.0 / 60.0;

/// How a snapshot frame is produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotOptions {
    /// CSS width of the surface.
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
    /// Frames rendered before the captured one, at 60 fps.
    pub frames: u32,
    /// Raw scroll progress in `[0, 1]`.
    pub progress: f64,
    pub reduced_motion: bool,
    /// Normalized pointer position.
    pub pointer: (f64, f64),
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: 512.0,
            height: 320.0,
            dpr: 1.0,
            frames: 0,
            progress: 1.0,
            reduced_motion: false,
            pointer: (0.5, 0.5),
        }
    }
}

/// A rendered frame, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Renders the effect named by `config` as it looks after `opts.frames`
/// ticks.
///
/// # Errors
///
/// Returns `FxError::InvalidDimensions` for an empty or oversized backing
/// store (see [`raster::MAX_PIXELS`]), and registry errors for bad configs.
pub fn render_frame(config: &SurfaceConfig, theme: Theme, opts: &SnapshotOptions) -> Result<Frame, FxError> {
    let (width, height) = backing_size(opts.width, opts.height, opts.dpr);
    if width == 0 || height == 0 {
        return Err(FxError::InvalidDimensions);
    }
    raster::pixel_count(width, height)?;
    let policy = if opts.reduced_motion {
        MotionPolicy::reduced()
    } else {
        MotionPolicy::full_motion()
    };

    let mut clock = PhaseClock::new();
    let mut tick = |i: u32| {
        let dt = clock.tick(f64::from(i) * SNAPSHOT_FRAME_DT, policy);
        (clock.time(), dt)
    };

    if EffectKind::from_name(&config.effect)?.requires_gpu() {
        let params = FluidParams::from_config(config)?;
        let (mut time, _) = tick(0);
        for i in 1..=opts.frames {
            time = tick(i).0;
        }
        let rgba = ambient_fx_fluid::reference::render_rgba(width, height, time, opts.pointer, params.intensity);
        return Ok(Frame { width, height, rgba });
    }

    let mut effect = EffectKind::build(config, theme)?;
    let mut raster = Raster::new(width, height, effective_dpr(opts.dpr))?;
    let mut pointer = PointerState::default();
    pointer.move_to(opts.pointer.0, opts.pointer.1);
    let progress = policy.progress(opts.progress);

    for i in 0..=opts.frames {
        let (time, dt) = tick(i);
        pointer.damp();
        let frame = FrameInput::new(opts.width, opts.height)
            .with_time(time, dt)
            .with_progress(progress)
            .with_pointer(policy.pointer(pointer))
            .with_policy(policy);
        effect.render(&mut raster, &frame);
    }
    Ok(Frame {
        width,
        height,
        rgba: raster.to_rgba8(),
    })
}

/// Renders one frame of an already-built effect into a fresh raster.
///
/// # Errors
///
/// Returns `FxError::InvalidDimensions` for an oversized backing store.
pub fn rasterize(effect: &mut dyn Effect, frame: &FrameInput, dpr: f64) -> Result<Raster, FxError> {
    let (w, h) = backing_size(frame.width, frame.height, dpr);
    let mut raster = Raster::new(w, h, effective_dpr(dpr))?;
    effect.render(&mut raster, frame);
    Ok(raster)
}
