//! Recording [`GpuApi`] for tests (feature `test-utils`).
//!
//! Handles are plain `u32`s. The mock tracks which objects are still alive,
//! logs every state-changing call, and can be told to fail a shader stage,
//! the link step, or buffer creation. An optional observer sees each call as
//! it happens, so callers can interleave GPU calls with their own events.

use super::{GpuApi, ShaderStage};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CreateProgram(u32),
    CreateBuffer(u32),
    Link(u32),
    Upload(usize),
    Viewport(i32, i32),
    Uniform1(f32),
    Uniform2(f32, f32),
    Clear,
    Draw(i32, i32),
    DeleteShader(u32),
    DeleteProgram(u32),
    DeleteBuffer(u32),
}

impl Call {
    /// Short call name, e.g. `"delete_shader"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateShader(..) => "create_shader",
            Self::CreateProgram(_) => "create_program",
            Self::CreateBuffer(_) => "create_buffer",
            Self::Link(_) => "link",
            Self::Upload(_) => "upload",
            Self::Viewport(..) => "viewport",
            Self::Uniform1(_) => "uniform_1f",
            Self::Uniform2(..) => "uniform_2f",
            Self::Clear => "clear",
            Self::Draw(..) => "draw",
            Self::DeleteShader(_) => "delete_shader",
            Self::DeleteProgram(_) => "delete_program",
            Self::DeleteBuffer(_) => "delete_buffer",
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::DeleteShader(_) | Self::DeleteProgram(_) | Self::DeleteBuffer(_))
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub calls: Vec<Call>,
    pub live: BTreeSet<u32>,
    next: u32,
    stages: Vec<(u32, ShaderStage)>,
}

/// Callback invoked with every logged call.
#[derive(Clone)]
pub struct Observer(Rc<dyn Fn(&Call)>);

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Observer")
    }
}

#[derive(Debug, Default, Clone)]
pub struct MockGpu {
    pub state: Rc<RefCell<State>>,
    pub fail_stage: Option<ShaderStage>,
    pub fail_link: bool,
    pub fail_buffer: bool,
    pub observer: Option<Observer>,
}

impl MockGpu {
    /// Calls `f` with each call as it is logged.
    pub fn observed(mut self, f: impl Fn(&Call) + 'static) -> Self {
        self.observer = Some(Observer(Rc::new(f)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Number of objects created and not yet deleted.
    pub fn live(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn count(&self, name: &str) -> usize {
        self.state.borrow().calls.iter().filter(|c| c.name() == name).count()
    }

    fn push(&self, call: Call) {
        if let Some(Observer(f)) = &self.observer {
            f(&call);
        }
        self.state.borrow_mut().calls.push(call);
    }

    fn alloc(&self) -> u32 {
        let mut s = self.state.borrow_mut();
        s.next += 1;
        let id = s.next;
        s.live.insert(id);
        id
    }

    fn free(&self, id: u32, call: Call) {
        self.state.borrow_mut().live.remove(&id);
        self.push(call);
    }
}

impl GpuApi for MockGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.alloc();
        self.state.borrow_mut().stages.push((id, stage));
        self.push(Call::CreateShader(stage, id));
        Ok(id)
    }
    fn shader_source(&self, _: u32, _: &str) {}
    fn compile_shader(&self, _: u32) {}
    fn shader_compile_status(&self, shader: u32) -> bool {
        let s = self.state.borrow();
        let stage = s.stages.iter().find(|(id, _)| *id == shader).map(|(_, st)| *st);
        self.fail_stage.is_none() || stage != self.fail_stage
    }
    fn shader_info_log(&self, _: u32) -> String {
        "0:12: 'frag_colour' : undeclared identifier".into()
    }
    fn delete_shader(&self, shader: u32) {
        self.free(shader, Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.alloc();
        self.push(Call::CreateProgram(id));
        Ok(id)
    }
    fn attach_shader(&self, _: u32, _: u32) {}
    fn link_program(&self, program: u32) {
        self.push(Call::Link(program));
    }
    fn program_link_status(&self, _: u32) -> bool {
        !self.fail_link
    }
    fn program_info_log(&self, _: u32) -> String {
        "varying mismatch".into()
    }
    fn use_program(&self, _: u32) {}
    fn delete_program(&self, program: u32) {
        self.free(program, Call::DeleteProgram(program));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffer {
            return Err("out of memory".into());
        }
        let id = self.alloc();
        self.push(Call::CreateBuffer(id));
        Ok(id)
    }
    fn upload_static_vertices(&self, _: u32, data: &[f32]) {
        self.push(Call::Upload(data.len()));
    }
    fn bind_vertex_attribute(&self, _: u32, _: u32, _: i32) {}
    fn delete_buffer(&self, buffer: u32) {
        self.free(buffer, Call::DeleteBuffer(buffer));
    }

    fn attrib_location(&self, _: u32, _: &str) -> Option<u32> {
        Some(0)
    }
    fn uniform_location(&self, _: u32, _: &str) -> Option<u32> {
        Some(1)
    }
    fn uniform_1f(&self, _: Option<&u32>, x: f32) {
        self.push(Call::Uniform1(x));
    }
    fn uniform_2f(&self, _: Option<&u32>, x: f32, y: f32) {
        self.push(Call::Uniform2(x, y));
    }

    fn viewport(&self, width: i32, height: i32) {
        self.push(Call::Viewport(width, height));
    }
    fn clear_transparent(&self) {
        self.push(Call::Clear);
    }
    fn draw_triangles(&self, first: i32, count: i32) {
        self.push(Call::Draw(first, count));
    }
}
