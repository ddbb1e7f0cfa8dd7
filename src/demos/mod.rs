//! The tutorial programs, each a [`crate::flow::GraphicsFlow`].
//!
//! - `wedges` draws two objects out of one vertex buffer with a fixed frustum
//! - `stack` animates a parent and a child cube through the transform stack

pub mod stack;
pub mod wedges;

use crate::{
    context::{GraphicsContext, ShaderStage},
    config::DemoConfig,
    resources::shader::ShaderProgram,
};

/// Build the vertex + fragment program named by `config`.
pub(crate) fn load_program(
    ctx: &mut dyn GraphicsContext,
    config: &DemoConfig,
) -> anyhow::Result<ShaderProgram> {
    ShaderProgram::from_files(
        ctx,
        &[
            (ShaderStage::Vertex, config.vertex_shader.as_path()),
            (ShaderStage::Fragment, config.fragment_shader.as_path()),
        ],
    )
}
