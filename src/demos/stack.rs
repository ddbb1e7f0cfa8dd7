//! A parent cube and a child cube composed on the transform stack.
//!
//! The parent orbits on a circular offset and spins. The child hangs off the
//! parent: it is translated by the w/a/s/d offset, rotated and scaled to half
//! size inside a push/pop pair, so the parent transform is intact afterwards.

use cgmath::{Deg, Vector3};
use instant::Duration;
use winit::dpi::PhysicalPosition;

use crate::{
    camera::Projection,
    config::DemoConfig,
    context::{GraphicsContext, uniforms},
    data_structures::{
        animation::CircularOffset,
        geometry::{AttributeLayout, GeometryBuffer},
        scene_graph::{NodeId, SceneGraph},
        shapes,
        transform::TransformStack,
    },
    flow::{Control, GraphicsFlow},
    input::{Key, OffsetController},
    resources::shader::ShaderProgram,
};

/// Distance of the parent cube from the camera.
pub const SCENE_DEPTH: f32 = -10.0;
/// Resting position of the child relative to its parent.
pub const CHILD_ANCHOR: Vector3<f32> = Vector3::new(3.0, 0.0, 0.0);
pub const CHILD_SCALE: f32 = 0.5;
/// Spin rates in degrees per second.
const PARENT_SPIN: f32 = 45.0;
const CHILD_SPIN: f32 = 90.0;

pub fn config() -> DemoConfig {
    DemoConfig::default()
        .with_title("Box stack")
        .with_perspective(45.0, 1.0, 45.0)
}

#[derive(Debug)]
struct Resources {
    program: ShaderProgram,
    geometry: GeometryBuffer,
    layout: AttributeLayout,
}

#[derive(Debug)]
pub struct BoxStackFlow {
    config: DemoConfig,
    projection: Projection,
    stack: TransformStack,
    orbit: CircularOffset,
    controller: OffsetController,
    nodes: SceneGraph,
    resources: Option<Resources>,
}

impl BoxStackFlow {
    pub fn new(config: DemoConfig) -> Self {
        let projection = Projection::new(
            config.width,
            config.height,
            Deg(config.fov_degrees),
            config.znear,
            config.zfar,
        );
        let mut nodes = SceneGraph::new();
        let parent = nodes.add_node("parent");
        let child = nodes.add_node("child");
        nodes.add_child(parent, Some(child));
        Self {
            config,
            projection,
            stack: TransformStack::new(),
            orbit: CircularOffset::default(),
            controller: OffsetController::default(),
            nodes,
            resources: None,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Current w/a/s/d offset of the child.
    pub fn child_offset(&self) -> cgmath::Vector2<f32> {
        self.controller.offset()
    }

    /// The named boxes and how they hang together.
    pub fn nodes(&self) -> &SceneGraph {
        &self.nodes
    }

    pub fn parent_node(&self) -> Option<NodeId> {
        self.nodes.find("parent")
    }

    /// Reset the stack to the parent transform at `elapsed`.
    fn place_parent(&mut self, elapsed: Duration) {
        let orbit = self.orbit.offset_at(elapsed);
        self.stack.reset();
        self.stack
            .translate(Vector3::new(orbit.x, orbit.y, SCENE_DEPTH))
            .rotate(Vector3::unit_y(), PARENT_SPIN * elapsed.as_secs_f32());
    }
}

impl Default for BoxStackFlow {
    fn default() -> Self {
        Self::new(config())
    }
}

impl GraphicsFlow for BoxStackFlow {
    fn on_init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
        let program = super::load_program(ctx, &self.config)?;
        let geometry = GeometryBuffer::upload(ctx, &shapes::CUBE_VERTICES, &shapes::CUBE_INDICES);
        let layout = geometry.full_layout();

        ctx.set_uniform_matrix(
            program.handle,
            uniforms::PERSPECTIVE_MATRIX,
            self.projection.calc_matrix(),
        );
        ctx.set_uniform_vec3(program.handle, uniforms::OFFSET, Vector3::new(0.0, 0.0, 0.0));

        self.resources = Some(Resources {
            program,
            geometry,
            layout,
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

    fn on_key(&mut self, key: &Key, _position: PhysicalPosition<f64>) -> Control {
        self.controller.handle_key(key);
        Control::Continue
    }

    fn on_render(&mut self, ctx: &mut dyn GraphicsContext, elapsed: Duration) {
        if self.resources.is_none() {
            return;
        }
        self.place_parent(elapsed);
        let parent = self.stack.top();

        let offset = self.controller.offset();
        let child = self.stack.scoped(|stack| {
            stack
                .translate(CHILD_ANCHOR + Vector3::new(offset.x, offset.y, 0.0))
                .rotate(Vector3::unit_x(), CHILD_SPIN * elapsed.as_secs_f32())
                .scale(CHILD_SCALE);
            stack.top()
        });

        let Some(resources) = &self.resources else {
            return;
        };
        let program = resources.program.handle;
        for model_to_camera in [parent, child] {
            ctx.set_uniform_matrix(program, uniforms::MODEL_TO_CAMERA, model_to_camera);
            ctx.draw_indexed(program, &resources.layout, resources.geometry.index_count());
        }
    }
}
