//! Shader compilation and linking over [`GpuApi`].
//!
//! Failures come back as [`ShaderError`] with the offending stage and a
//! line-numbered copy of the source, so a caller can log one message and
//! give up on GPU setup without panicking.

use super::{GpuApi, ShaderStage};
use thiserror::Error;

/// Errors that can occur during shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    CompileError {
        /// The shader stage that failed (e.g. "vertex", "fragment").
        stage: String,
        /// The driver's info log describing the error.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    LinkError(String),
}

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`. Either may be empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles a single shader stage.
///
/// The shader object is deleted again when compilation fails.
///
/// # Errors
///
/// Returns `ShaderError::CompileError` if the object cannot be created or
/// the source fails to compile.
pub fn compile_shader<G: GpuApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl.create_shader(stage).map_err(|log| ShaderError::CompileError {
        stage: stage.name().to_string(),
        log,
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compile_status(shader) {
        Ok(shader)
    } else {
        let info_log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        Err(ShaderError::CompileError {
            stage: stage.name().to_string(),
            log: format_shader_error(source, &info_log),
        })
    }
}

/// Links a vertex and fragment shader into a program.
///
/// The program object is deleted when linking fails; the shaders are left
/// for the caller to release.
///
/// # Errors
///
/// Returns `ShaderError::LinkError` if linking fails.
pub fn link_program<G: GpuApi>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, ShaderError> {
    let program = gl.create_program().map_err(ShaderError::LinkError)?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if gl.program_link_status(program) {
        Ok(program)
    } else {
        let info_log = gl.program_info_log(program);
        gl.delete_program(program);
        Err(ShaderError::LinkError(info_log))
    }
}

/// A linked program together with the two stage objects it was built from.
///
/// The stage handles are kept so teardown can release every object that was
/// created, not just the program.
pub struct ShaderProgram<G: GpuApi> {
    pub program: G::Program,
    pub vertex: G::Shader,
    pub fragment: G::Shader,
}

impl<G: GpuApi> Clone for ShaderProgram<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: GpuApi> Copy for ShaderProgram<G> {}

impl<G: GpuApi> std::fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl<G: GpuApi> ShaderProgram<G> {
    /// Deletes the program and both stages.
    pub fn delete(self, gl: &G) {
        gl.delete_program(self.program);
        gl.delete_shader(self.vertex);
        gl.delete_shader(self.fragment);
    }
}

/// Compiles both stages and links them.
///
/// On any failure every object created so far is deleted before the error
/// is returned, so a failed setup leaves nothing allocated.
///
/// # Errors
///
/// Returns `ShaderError::CompileError` if either shader fails to compile,
/// or `ShaderError::LinkError` if linking fails.
pub fn compile_program<G: GpuApi>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ShaderProgram<G>, ShaderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    match link_program(gl, vertex, fragment) {
        Ok(program) => Ok(ShaderProgram {
            program,
            vertex,
            fragment,
        }),
        Err(e) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            Err(e)
        }
    }
}
