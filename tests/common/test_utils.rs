use std::collections::{HashMap, HashSet};

use box_ngin::{
    cgmath::{Matrix4, Vector3},
    context::{
        BufferHandle, BufferKind, GraphicsContext, ProgramHandle, ShaderHandle, ShaderStage,
    },
    data_structures::geometry::AttributeLayout,
    wgpu,
};

/// Everything a [`RecordingContext`] was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Compile(ShaderStage),
    Link(Vec<ShaderHandle>),
    DeleteShader(ShaderHandle),
    Upload(BufferKind, usize),
    UniformMatrix(ProgramHandle, String, Matrix4<f32>),
    UniformVec3(ProgramHandle, String, Vector3<f32>),
    Resize(u32, u32),
    Clear,
    Draw {
        program: ProgramHandle,
        position_offset: Option<u64>,
        color_offset: Option<u64>,
        index_count: u32,
    },
    Swap,
}

/// In-memory [`GraphicsContext`].
///
/// A vertex source compiles when it contains `@vertex`, a fragment source
/// when it contains `@fragment`. Linking needs a vertex stage and known,
/// undeleted shaders.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub calls: Vec<Call>,
    live_shaders: HashMap<ShaderHandle, ShaderStage>,
    pub programs: HashSet<ProgramHandle>,
    next_id: u32,
    pub fail_link: bool,
    /// `request_redraw` takes `&self`, so it is counted instead of recorded.
    pub redraws: std::cell::Cell<u32>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn live_shaders(&self) -> usize {
        self.live_shaders.len()
    }

    /// How often `shader` was deleted.
    pub fn deletions_of(&self, shader: ShaderHandle) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == Call::DeleteShader(shader))
            .count()
    }

    pub fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Draw { .. }))
            .collect()
    }

    /// The last value set for the matrix uniform `name`.
    pub fn last_matrix(&self, name: &str) -> Option<Matrix4<f32>> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::UniformMatrix(_, n, m) if n == name => Some(*m),
            _ => None,
        })
    }

    /// Every matrix set for `name`, in order.
    pub fn matrices(&self, name: &str) -> Vec<Matrix4<f32>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::UniformMatrix(_, n, m) if n == name => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Names of the calls, e.g. `["Clear", "Draw", "Swap"]`.
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls
            .iter()
            .map(|call| match call {
                Call::Compile(_) => "Compile",
                Call::Link(_) => "Link",
                Call::DeleteShader(_) => "DeleteShader",
                Call::Upload(..) => "Upload",
                Call::UniformMatrix(..) => "UniformMatrix",
                Call::UniformVec3(..) => "UniformVec3",
                Call::Resize(..) => "Resize",
                Call::Clear => "Clear",
                Call::Draw { .. } => "Draw",
                Call::Swap => "Swap",
            })
            .collect()
    }
}

impl GraphicsContext for RecordingContext {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, String> {
        self.calls.push(Call::Compile(stage));
        let marker = match stage {
            ShaderStage::Vertex => "@vertex",
            ShaderStage::Fragment => "@fragment",
        };
        if !source.contains(marker) {
            return Err(format!("error: no {marker} entry point"));
        }
        let handle = ShaderHandle(self.next_id());
        self.live_shaders.insert(handle, stage);
        Ok(handle)
    }

    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle, String> {
        self.calls.push(Call::Link(shaders.to_vec()));
        if self.fail_link {
            return Err("error: link failed".to_string());
        }
        let mut has_vertex = false;
        for shader in shaders {
            match self.live_shaders.get(shader) {
                Some(ShaderStage::Vertex) => has_vertex = true,
                Some(ShaderStage::Fragment) => {}
                None => return Err(format!("error: unknown shader {:?}", shader)),
            }
        }
        if !has_vertex {
            return Err("error: program has no vertex stage".to_string());
        }
        let handle = ProgramHandle(self.next_id());
        self.programs.insert(handle);
        Ok(handle)
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::DeleteShader(shader));
        self.live_shaders.remove(&shader);
    }

    fn upload_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle {
        self.calls.push(Call::Upload(kind, contents.len()));
        BufferHandle(self.next_id())
    }

    fn set_uniform_matrix(&mut self, program: ProgramHandle, name: &str, matrix: Matrix4<f32>) {
        self.calls
            .push(Call::UniformMatrix(program, name.to_string(), matrix));
    }

    fn set_uniform_vec3(&mut self, program: ProgramHandle, name: &str, vector: Vector3<f32>) {
        self.calls
            .push(Call::UniformVec3(program, name.to_string(), vector));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn clear(&mut self, _colour: wgpu::Color) {
        self.calls.push(Call::Clear);
    }

    fn draw_indexed(&mut self, program: ProgramHandle, layout: &AttributeLayout, index_count: u32) {
        self.calls.push(Call::Draw {
            program,
            position_offset: layout.base_offset(AttributeLayout::POSITION),
            color_offset: layout.base_offset(AttributeLayout::COLOR),
            index_count,
        });
    }

    fn swap_buffers(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::Swap);
        Ok(())
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

pub const VERTEX_SOURCE: &str = "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(); }";
pub const FRAGMENT_SOURCE: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(); }";
