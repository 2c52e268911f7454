//! The fluid pass over [`GpuApi`].
//!
//! A [`FluidRenderer`] owns its context and every object it creates. Setup
//! failures are logged and leave the renderer inert; it then draws nothing
//! and holds no GPU objects. Teardown is idempotent and also runs on drop.

use crate::shaders::{
    FLUID_FRAGMENT_SHADER, FLUID_VERTEX_SHADER, POSITION_ATTRIBUTE, U_INTENSITY, U_MOUSE, U_RESOLUTION, U_TIME,
};
use ambient_fx_core::gpu::{compile_program, ShaderError, ShaderProgram, FULLSCREEN_QUAD, QUAD_VERTEX_COUNT};
use ambient_fx_core::GpuApi;
use tracing::{debug, warn};

/// Every object the pass created, released together.
struct Resources<G: GpuApi> {
    shader: ShaderProgram<G>,
    buffer: G::Buffer,
    position: u32,
    u_res: Option<G::UniformLocation>,
    u_time: Option<G::UniformLocation>,
    u_mouse: Option<G::UniformLocation>,
    u_intensity: Option<G::UniformLocation>,
}

impl<G: GpuApi> Resources<G> {
    fn create(gl: &G) -> Result<Self, ShaderError> {
        let shader = compile_program(gl, FLUID_VERTEX_SHADER, FLUID_FRAGMENT_SHADER)?;
        let buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(log) => {
                shader.delete(gl);
                return Err(ShaderError::LinkError(format!("vertex buffer: {log}")));
            }
        };
        gl.upload_static_vertices(buffer, &FULLSCREEN_QUAD);

        let program = shader.program;
        let position = gl.attrib_location(program, POSITION_ATTRIBUTE).unwrap_or(0);
        Ok(Self {
            shader,
            buffer,
            position,
            u_res: gl.uniform_location(program, U_RESOLUTION),
            u_time: gl.uniform_location(program, U_TIME),
            u_mouse: gl.uniform_location(program, U_MOUSE),
            u_intensity: gl.uniform_location(program, U_INTENSITY),
        })
    }

    fn release(self, gl: &G) {
        self.shader.delete(gl);
        gl.delete_buffer(self.buffer);
    }
}

/// The fluid/noise layer bound to one GPU context.
pub struct FluidRenderer<G: GpuApi> {
    gl: G,
    resources: Option<Resources<G>>,
    viewport: (u32, u32),
    intensity: f64,
}

impl<G: GpuApi> FluidRenderer<G> {
    /// Compiles the program and uploads the quad.
    ///
    /// On failure the error is logged with `warn!` and the returned renderer
    /// is inert: [`is_ready`](Self::is_ready) is false and nothing was left
    /// allocated.
    pub fn setup(gl: G, intensity: f64) -> Self {
        let resources = match Resources::create(&gl) {
            Ok(res) => {
                debug!("fluid program ready");
                Some(res)
            }
            Err(e) => {
                warn!(error = %e, "fluid setup aborted");
                None
            }
        };
        Self {
            gl,
            resources,
            viewport: (0, 0),
            intensity: intensity.max(0.0),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.resources.is_some()
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity.max(0.0);
    }

    /// Current viewport in device pixels.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Updates the viewport for a new backing size. The program is kept.
    /// Returns whether the size changed.
    pub fn resize(&mut self, px_width: u32, px_height: u32) -> bool {
        if self.viewport == (px_width, px_height) {
            return false;
        }
        self.viewport = (px_width, px_height);
        if self.resources.is_some() {
            self.gl.viewport(to_i32(px_width), to_i32(px_height));
        }
        true
    }

    /// Draws one frame.
    ///
    /// `pointer` is the normalized pointer with y growing downward; it is
    /// flipped into GL's bottom-up convention here. Inert renderers and empty
    /// viewports draw nothing. Returns whether a draw was issued.
    pub fn render(&self, time: f64, pointer: (f64, f64)) -> bool {
        let Some(res) = &self.resources else {
            return false;
        };
        let (w, h) = self.viewport;
        if w == 0 || h == 0 {
            return false;
        }
        let gl = &self.gl;
        gl.use_program(res.shader.program);
        gl.bind_vertex_attribute(res.buffer, res.position, 2);
        gl.uniform_2f(res.u_res.as_ref(), w as f32, h as f32);
        gl.uniform_1f(res.u_time.as_ref(), time as f32);
        gl.uniform_2f(res.u_mouse.as_ref(), pointer.0 as f32, (1.0 - pointer.1) as f32);
        gl.uniform_1f(res.u_intensity.as_ref(), self.intensity as f32);
        gl.clear_transparent();
        gl.draw_triangles(0, QUAD_VERTEX_COUNT);
        true
    }

    /// Deletes the program, both shader stages, and the vertex buffer.
    /// Calling it again does nothing.
    pub fn teardown(&mut self) {
        if let Some(res) = self.resources.take() {
            res.release(&self.gl);
            debug!("fluid resources released");
        }
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }
}

impl<G: GpuApi> Drop for FluidRenderer<G> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
