//! Flow-line bands: horizontal gradient strokes that ripple with time,
//! scroll progress, and pointer motion.

use ambient_fx_core::draw::{DrawContext, GradientStop, Paint, Path};
use ambient_fx_core::{DVec2, FrameInput, Theme};

/// Horizontal distance between samples along a band, in CSS pixels.
const SAMPLE_STEP: f64 = 18.0;
/// Bands extend this far past both edges so their ends stay hidden.
const OVERSCAN: f64 = 20.0;
/// Per-band phase offset.
const BAND_PHASE: f64 = 0.22;
/// Pointer-height tilt in pixels at the top or bottom edge.
const POINTER_TILT: f64 = 22.0;
/// Horizontal pointer velocity to wobble, in pixels per normalized unit.
const POINTER_WOBBLE: f64 = 55.0 * 0.08;

/// Vertical offset of a whole band at `phase`.
pub fn band_offset(phase: f64, amp: f64) -> f64 {
    phase.sin() * amp + (phase * 1.12).cos() * amp * 0.55
}

/// Phase of band `index` at `time` seconds.
pub fn band_phase(time: f64, speed: f64, index: usize) -> f64 {
    time * speed + index as f64 * BAND_PHASE
}

/// Amplitude after progress scaling: 55% at rest, full once revealed.
pub fn effective_amplitude(amp: f64, eased: f64) -> f64 {
    amp * (0.55 + 0.45 * eased.clamp(0.0, 1.0))
}

/// Stroke alpha of band `index`; later bands read slightly brighter.
fn band_alpha(index: usize) -> f64 {
    (0.08 + index as f64 * 0.012).min(0.4)
}

/// Draws `bands` flow lines across the frame.
pub fn draw(
    ctx: &mut dyn DrawContext,
    frame: &FrameInput,
    theme: &Theme,
    bands: usize,
    amplitude: f64,
    speed: f64,
    alpha: f64,
) {
    if bands == 0 {
        return;
    }
    let (w, h) = (frame.width, frame.height);
    let amp = effective_amplitude(amplitude, frame.progress.eased());
    let tilt = (frame.pointer.y - 0.5) * POINTER_TILT;
    let wobble = frame.pointer.vx * POINTER_WOBBLE;
    let last = (bands.max(2) - 1) as f64;

    for i in 0..bands {
        let y_base = if bands == 1 { h * 0.5 } else { i as f64 / last * h };
        let phase = band_phase(frame.time, speed, i);
        let offset = band_offset(phase, amp) + tilt + wobble;

        let mut points = Vec::new();
        let mut x = -OVERSCAN;
        while x <= w + OVERSCAN {
            let k = x / w;
            let ripple = (k * 6.0 + phase).sin() * amp * 0.35
                + (k * 3.6 - phase * 1.15).cos() * amp * 0.2;
            points.push(DVec2::new(x, y_base + offset + ripple));
            x += SAMPLE_STEP;
        }

        let a = band_alpha(i) * alpha;
        let mid = theme.accent.mix(theme.accent2, i as f64 / last);
        let paint = Paint::Linear {
            from: DVec2::new(0.0, 0.0),
            to: DVec2::new(w, 0.0),
            stops: vec![
                GradientStop::new(0.0, theme.accent.with_alpha(0.0)),
                GradientStop::new(0.18, theme.accent.with_alpha(a)),
                GradientStop::new(0.5, mid.with_alpha(a)),
                GradientStop::new(0.82, theme.accent2.with_alpha(a)),
                GradientStop::new(1.0, theme.accent2.with_alpha(0.0)),
            ],
        };
        ctx.stroke_path(&Path::polyline(&points), &paint, 1.0);
    }
}
