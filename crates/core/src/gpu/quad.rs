//! Fullscreen quad for single-pass fragment effects.
//!
//! Two triangles in clip space covering the whole viewport, fed through a
//! pass-through vertex stage with one `vec2` attribute, `a_pos`.

/// Clip-space positions of two triangles covering the viewport.
pub const FULLSCREEN_QUAD: [f32; 12] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    1.0, 1.0,
];

/// Vertex count passed to the draw call for [`FULLSCREEN_QUAD`].
pub const QUAD_VERTEX_COUNT: i32 = 6;

/// GLSL ES 3.0 pass-through vertex stage for [`FULLSCREEN_QUAD`].
pub const QUAD_VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_pos;
void main() {
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space_corners() {
        let verts: Vec<(f32, f32)> = FULLSCREEN_QUAD.chunks(2).map(|c| (c[0], c[1])).collect();
        assert_eq!(verts.len() as i32, QUAD_VERTEX_COUNT);
        for corner in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            assert!(verts.contains(&corner), "missing corner {corner:?}");
        }
    }

    #[test]
    fn quad_vertex_shader_declares_position_attribute() {
        assert!(QUAD_VERTEX_SHADER.contains("#version 300 es"));
        assert!(QUAD_VERTEX_SHADER.contains("in vec2 a_pos;"));
        assert!(QUAD_VERTEX_SHADER.contains("gl_Position"));
    }
}
