//! Two wedges, one buffer.
//!
//! Both objects live in a single vertex buffer and share the index buffer;
//! each is drawn through its own [`AttributeLayout`]. The second one is pushed
//! one unit further away through the `offset` uniform.

use cgmath::{Matrix4, SquareMatrix, Vector3};
use instant::Duration;
use winit::dpi::PhysicalPosition;

use crate::{
    camera::Projection,
    config::DemoConfig,
    context::{GraphicsContext, uniforms},
    data_structures::{
        geometry::{AttributeLayout, GeometryBuffer},
        shapes,
    },
    flow::{Control, GraphicsFlow},
    input::Key,
    resources::shader::ShaderProgram,
};

pub const FRUSTUM_SCALE: f32 = 1.0;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 3.0;

/// Per-object `offset` uniform, in draw order.
pub const OFFSETS: [Vector3<f32>; 2] = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0)];

pub fn config() -> DemoConfig {
    DemoConfig::default()
        .with_title("Wedges")
        .with_depth_buffer(false)
        .with_perspective(90.0, Z_NEAR, Z_FAR)
}

#[derive(Debug)]
struct Resources {
    program: ShaderProgram,
    geometry: GeometryBuffer,
    layouts: [AttributeLayout; 2],
}

#[derive(Debug)]
pub struct WedgesFlow {
    config: DemoConfig,
    projection: Projection,
    resources: Option<Resources>,
}

impl WedgesFlow {
    pub fn new(config: DemoConfig) -> Self {
        let projection =
            Projection::from_frustum_scale(FRUSTUM_SCALE, config.width, config.height, Z_NEAR, Z_FAR);
        Self {
            config,
            projection,
            resources: None,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The two layouts over the shared buffer, once initialized.
    pub fn layouts(&self) -> Option<&[AttributeLayout; 2]> {
        self.resources.as_ref().map(|r| &r.layouts)
    }
}

impl Default for WedgesFlow {
    fn default() -> Self {
        Self::new(config())
    }
}

impl GraphicsFlow for WedgesFlow {
    fn on_init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
        let program = super::load_program(ctx, &self.config)?;
        let geometry = GeometryBuffer::upload(ctx, &shapes::WEDGE_VERTICES, &shapes::WEDGE_INDICES);
        let layouts = [
            geometry.full_layout(),
            geometry.layout_from_vertex(shapes::WEDGE_VERTEX_COUNT),
        ];

        ctx.set_uniform_matrix(
            program.handle,
            uniforms::PERSPECTIVE_MATRIX,
            self.projection.calc_matrix(),
        );
        ctx.set_uniform_matrix(program.handle, uniforms::MODEL_TO_CAMERA, Matrix4::identity());

        self.resources = Some(Resources {
            program,
            geometry,
            layouts,
        });
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut dyn GraphicsContext, width: u32, height: u32) {
        self.projection.resize(width, height);
        if let Some(resources) = &self.resources {
            ctx.set_uniform_matrix(
                resources.program.handle,
                uniforms::PERSPECTIVE_MATRIX,
                self.projection.calc_matrix(),
            );
        }
    }

    fn on_key(&mut self, _key: &Key, _position: PhysicalPosition<f64>) -> Control {
        Control::Continue
    }

    fn on_render(&mut self, ctx: &mut dyn GraphicsContext, _elapsed: Duration) {
        let Some(resources) = &self.resources else {
            return;
        };
        let program = resources.program.handle;
        for (layout, offset) in resources.layouts.iter().zip(OFFSETS) {
            ctx.set_uniform_vec3(program, uniforms::OFFSET, offset);
            ctx.draw_indexed(program, layout, resources.geometry.index_count());
        }
    }
}
