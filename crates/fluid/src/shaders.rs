//! GLSL sources for the fluid pass.
//!
//! The vertex stage is the shared fullscreen-quad pass-through; the fragment
//! stage is below. [`crate::reference`] mirrors it on the CPU and the two must
//! be kept in step.

pub use ambient_fx_core::gpu::QUAD_VERTEX_SHADER as FLUID_VERTEX_SHADER;

/// Attribute carrying the quad's clip-space position.
pub const POSITION_ATTRIBUTE: &str = "a_pos";

pub const U_RESOLUTION: &str = "u_res";
pub const U_TIME: &str = "u_time";
pub const U_MOUSE: &str = "u_mouse";
pub const U_INTENSITY: &str = "u_intensity";

/// Value noise warped by a pointer-centered swirl, at low constant alpha.
pub const FLUID_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec2 u_res;
uniform float u_time;
uniform vec2 u_mouse;
uniform float u_intensity;

out vec4 frag_color;

float hash(vec2 p) {
    p = fract(p * vec2(123.34, 456.21));
    p += dot(p, p + 78.233);
    return fract(p.x * p.y);
}

float noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    float a = hash(i);
    float b = hash(i + vec2(1.0, 0.0));
    float c = hash(i + vec2(0.0, 1.0));
    float d = hash(i + vec2(1.0, 1.0));
    vec2 u = f * f * (3.0 - 2.0 * f);
    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

void main() {
    vec2 p = (gl_FragCoord.xy - 0.5 * u_res) / min(u_res.x, u_res.y);
    vec2 m = u_mouse * 2.0 - 1.0;
    float t = u_time * 0.55;

    float r = length(p - m * 0.25);
    float a = atan(p.y - m.y * 0.25, p.x - m.x * 0.25);
    a += (0.25 * u_intensity / (0.35 + r)) * sin(t + r * 6.0);
    vec2 q = vec2(cos(a), sin(a)) * r;

    float n = noise(q * 3.0 + t * 0.75);
    float bands = sin((q.x * 3.2 + q.y * 2.1) * 2.0 + t * 2.0) * 0.5 + 0.5;
    float f = mix(n, bands, 0.6);

    vec3 c1 = vec3(0.12, 0.85, 0.95);
    vec3 c2 = vec3(0.98, 0.35, 0.52);
    vec3 c3 = vec3(0.75, 0.95, 0.25);

    float glow = smoothstep(0.85, 0.15, r) * 0.45;
    vec3 col = mix(c1, c2, f);
    col = mix(col, c3, 0.12 * sin(t + f * 6.28) + 0.12);
    col += glow * (0.25 + 0.75 * f);

    frag_color = vec4(col, 0.22 * u_intensity);
}
"#;
