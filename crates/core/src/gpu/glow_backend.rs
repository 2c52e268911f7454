//! [`GpuApi`] for `glow::Context` (WebGL2 / OpenGL ES 3).

use super::{GpuApi, ShaderStage};
use glow::HasContext;

type Gl = glow::Context;

// SAFETY (applies to every block below): glow marks raw GL calls unsafe.
// Handles passed in were all created by this same context through the
// `create_*` methods, and the vertex data pointer is a live slice for the
// duration of the upload call.
#[allow(unsafe_code)]
impl GpuApi for Gl {
    type Shader = <Gl as HasContext>::Shader;
    type Program = <Gl as HasContext>::Program;
    type Buffer = <Gl as HasContext>::Buffer;
    type UniformLocation = <Gl as HasContext>::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, kind) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Self::Program) {
        unsafe { HasContext::use_program(self, Some(program)) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn upload_static_vertices(&self, buffer: Self::Buffer, data: &[f32]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_ne_bytes()).collect();
        unsafe {
            self.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.buffer_data_u8_slice(glow::ARRAY_BUFFER, &bytes, glow::STATIC_DRAW);
        }
    }

    fn bind_vertex_attribute(&self, buffer: Self::Buffer, location: u32, components: i32) {
        unsafe {
            self.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.enable_vertex_attrib_array(location);
            self.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, 0, 0);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_1f(&self, location: Option<&Self::UniformLocation>, x: f32) {
        unsafe { self.uniform_1_f32(location, x) }
    }

    fn uniform_2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32) {
        unsafe { self.uniform_2_f32(location, x, y) }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, 0, 0, width, height) }
    }

    fn clear_transparent(&self) {
        unsafe {
            self.clear_color(0.0, 0.0, 0.0, 0.0);
            self.clear(glow::COLOR_BUFFER_BIT);
            self.enable(glow::BLEND);
            self.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { self.draw_arrays(glow::TRIANGLES, first, count) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_context_implements_gpu_api() {
        fn assert_gpu<T: GpuApi>() {}
        assert_gpu::<glow::Context>();
    }
}
