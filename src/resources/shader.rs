//! Shader loading and program linking.
//!
//! Compile and link failures are logged and handed back to the caller as a
//! [`ShaderError`]; nothing is retried. Per-stage shader objects are owned by a
//! drop guard while a program is being built, so they are released exactly
//! once whether linking succeeds or not.

use std::path::Path;

use anyhow::Context as _;
use thiserror::Error;

use crate::{
    context::{GraphicsContext, ProgramHandle, ShaderHandle, ShaderStage},
    resources::load_string,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader: {message}")]
    Compile { stage: ShaderStage, message: String },
    #[error("failed to link program: {message}")]
    Link { message: String },
}

/// Compile `source` for `stage`.
pub fn load_shader<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderHandle, ShaderError> {
    ctx.compile_shader(stage, source).map_err(|message| {
        log::error!("Shader load error ({stage} stage)\n{message}");
        ShaderError::Compile { stage, message }
    })
}

/// Read a shader from the asset directory and compile it.
pub fn load_shader_file<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    stage: ShaderStage,
    file_name: impl AsRef<Path>,
) -> anyhow::Result<ShaderHandle> {
    let file_name = file_name.as_ref();
    let source = load_string(file_name)?;
    let shader = load_shader(ctx, stage, &source)
        .with_context(|| format!("while loading {}", file_name.display()))?;
    Ok(shader)
}

/// Link `shaders` into a program. The shaders are released either way.
pub fn create_program<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    shaders: Vec<ShaderHandle>,
) -> Result<ProgramHandle, ShaderError> {
    StageGuard { ctx, shaders }.link()
}

/// Owns compiled stages until they are released on drop.
struct StageGuard<'a, C: GraphicsContext + ?Sized> {
    ctx: &'a mut C,
    shaders: Vec<ShaderHandle>,
}

impl<C: GraphicsContext + ?Sized> StageGuard<'_, C> {
    fn link(self) -> Result<ProgramHandle, ShaderError> {
        self.ctx.link_program(&self.shaders).map_err(|message| {
            log::error!("Program link error\n{message}");
            ShaderError::Link { message }
        })
    }
}

impl<C: GraphicsContext + ?Sized> Drop for StageGuard<'_, C> {
    fn drop(&mut self) {
        for shader in self.shaders.drain(..) {
            self.ctx.delete_shader(shader);
        }
    }
}

/// A linked program built from shader files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    pub handle: ProgramHandle,
}

impl ShaderProgram {
    /// Load every `(stage, file)` pair and link the result.
    ///
    /// Stages compiled before a failing one are released as well.
    pub fn from_files<C, P>(ctx: &mut C, stages: &[(ShaderStage, P)]) -> anyhow::Result<Self>
    where
        C: GraphicsContext + ?Sized,
        P: AsRef<Path>,
    {
        let mut guard = StageGuard {
            ctx,
            shaders: Vec::with_capacity(stages.len()),
        };
        for (stage, file_name) in stages {
            let shader = load_shader_file(&mut *guard.ctx, *stage, file_name)?;
            guard.shaders.push(shader);
        }
        let handle = guard.link()?;
        log::info!("Linked program {:?} from {} stages", handle, stages.len());
        Ok(Self { handle })
    }

    /// Compile every `(stage, source)` pair and link the result.
    pub fn from_sources<C>(ctx: &mut C, stages: &[(ShaderStage, &str)]) -> Result<Self, ShaderError>
    where
        C: GraphicsContext + ?Sized,
    {
        let mut guard = StageGuard {
            ctx,
            shaders: Vec::with_capacity(stages.len()),
        };
        for (stage, source) in stages {
            let shader = load_shader(&mut *guard.ctx, *stage, source)?;
            guard.shaders.push(shader);
        }
        let handle = guard.link()?;
        Ok(Self { handle })
    }
}
