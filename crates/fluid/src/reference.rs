//! CPU evaluation of the fluid fragment stage.
//!
//! Mirrors [`crate::shaders::FLUID_FRAGMENT_SHADER`] in `f64` so the pass can
//! be tested without a device and rendered to PNG from the command line.

use ambient_fx_core::DVec2;

const C1: [f64; 3] = [0.12, 0.85, 0.95];
const C2: [f64; 3] = [0.98, 0.35, 0.52];
const C3: [f64; 3] = [0.75, 0.95, 0.25];

/// Alpha of the composited layer per unit intensity.
pub const ALPHA_PER_INTENSITY: f64 = 0.22;

fn fract(x: f64) -> f64 {
    x - x.floor()
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// GLSL `smoothstep`, including the reversed-edge form.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Cheap 2D hash into `[0, 1)`.
pub fn hash(p: DVec2) -> f64 {
    let mut q = DVec2::new(fract(p.x * 123.34), fract(p.y * 456.21));
    let d = q.dot(q + 78.233);
    q += DVec2::splat(d);
    fract(q.x * q.y)
}

/// Smooth value noise over the integer lattice.
pub fn value_noise(p: DVec2) -> f64 {
    let i = p.floor();
    let f = p - i;
    let a = hash(i);
    let b = hash(i + DVec2::X);
    let c = hash(i + DVec2::Y);
    let d = hash(i + DVec2::ONE);
    let u = f * f * (DVec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Straight-alpha color of one fragment.
///
/// `frag` is in window pixels with a bottom-left origin, like
/// `gl_FragCoord`; `mouse` is the already-flipped uniform value.
pub fn shade(frag: DVec2, resolution: DVec2, time: f64, mouse: DVec2, intensity: f64) -> [f64; 4] {
    let p = (frag - 0.5 * resolution) / resolution.x.min(resolution.y);
    let m = mouse * 2.0 - DVec2::ONE;
    let t = time * 0.55;

    let off = p - m * 0.25;
    let r = off.length();
    let mut a = off.y.atan2(off.x);
    a += (0.25 * intensity / (0.35 + r)) * (t + r * 6.0).sin();
    let q = DVec2::new(a.cos(), a.sin()) * r;

    let n = value_noise(q * 3.0 + DVec2::splat(t * 0.75));
    let bands = ((q.x * 3.2 + q.y * 2.1) * 2.0 + t * 2.0).sin() * 0.5 + 0.5;
    let f = mix(n, bands, 0.6);

    let glow = smoothstep(0.85, 0.15, r) * 0.45;
    let tint = 0.12 * (t + f * 6.28).sin() + 0.12;
    let mut out = [0.0; 4];
    for k in 0..3 {
        let col = mix(mix(C1[k], C2[k], f), C3[k], tint) + glow * (0.25 + 0.75 * f);
        out[k] = col.clamp(0.0, 1.0);
    }
    out[3] = (ALPHA_PER_INTENSITY * intensity).clamp(0.0, 1.0);
    out
}

/// Renders a full frame as top-down RGBA8 rows.
///
/// `pointer` is normalized with y growing downward, as the GPU renderer
/// takes it.
pub fn render_rgba(width: u32, height: u32, time: f64, pointer: (f64, f64), intensity: f64) -> Vec<u8> {
    let res = DVec2::new(f64::from(width), f64::from(height));
    let mouse = DVec2::new(pointer.0, 1.0 - pointer.1);
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for row in 0..height {
        let fy = f64::from(height - 1 - row) + 0.5;
        for col in 0..width {
            let rgba = shade(DVec2::new(f64::from(col) + 0.5, fy), res, time, mouse, intensity);
            out.extend(rgba.iter().map(|c| (c * 255.0).round() as u8));
        }
    }
    out
}
