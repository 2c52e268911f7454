//! Narrow GPU seam used by GPU-backed effects.
//!
//! [`GpuApi`] exposes exactly the calls a single-program fullscreen effect
//! needs: shader and program objects, one static vertex buffer, uniforms,
//! viewport, and a draw. The `render` feature implements it for
//! `glow::Context`; tests implement it with a recording mock so resource
//! ownership can be asserted without a device.
//!
//! # Module overview
//!
//! - [`shader`] -- Compile and link helpers plus error formatting.
//! - [`quad`] -- Fullscreen quad geometry and the pass-through vertex stage.
//! - `glow_backend` -- `GpuApi` for `glow::Context` (feature `render`).
//! - [`mock`] -- Recording `GpuApi` for tests (feature `test-utils`).

#[cfg(feature = "render")]
mod glow_backend;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod quad;
pub mod shader;

pub use quad::{FULLSCREEN_QUAD, QUAD_VERTEX_COUNT, QUAD_VERTEX_SHADER};
pub use shader::{compile_program, compile_shader, format_shader_error, link_program, ShaderError, ShaderProgram};

use std::fmt::Debug;

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimal immediate-mode GPU interface.
///
/// Methods take `&self` to mirror GL's context model. Creation calls return
/// `Err` with the driver's message when the object cannot be allocated.
pub trait GpuApi {
    type Shader: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;
    type Buffer: Copy + Debug + PartialEq;
    type UniformLocation: Clone + Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Self::Program);
    fn delete_program(&self, program: Self::Program);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Binds `buffer` as the array buffer and uploads `data` with static usage.
    fn upload_static_vertices(&self, buffer: Self::Buffer, data: &[f32]);
    /// Binds `buffer` and points attribute `location` at tightly packed
    /// `components`-wide float vectors.
    fn bind_vertex_attribute(&self, buffer: Self::Buffer, location: u32, components: i32);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn uniform_1f(&self, location: Option<&Self::UniformLocation>, x: f32);
    fn uniform_2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);

    fn viewport(&self, width: i32, height: i32);
    /// Clears the color buffer to transparent and enables source-over alpha blending.
    fn clear_transparent(&self);
    fn draw_triangles(&self, first: i32, count: i32);
}
