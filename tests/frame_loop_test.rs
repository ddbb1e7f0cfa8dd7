mod common;

use box_ngin::{
    PhysicalPosition,
    cgmath::{Matrix4, SquareMatrix, Vector3, Vector4},
    context::{GraphicsContext, uniforms},
    data_structures::{shapes, transform::TransformStack},
    demos::{
        stack::{BoxStackFlow, CHILD_ANCHOR, CHILD_SCALE},
        wedges::{self, WedgesFlow},
    },
    flow::{Control, FrameLoop, GraphicsFlow},
    input::Key,
    wgpu,
};
use instant::Duration;

use crate::common::test_utils::{Call, RecordingContext};

/// Records which hooks ran.
#[derive(Default)]
struct ProbeFlow {
    events: Vec<String>,
    exit_on: Option<char>,
}

impl GraphicsFlow for ProbeFlow {
    fn on_init(&mut self, _ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
        self.events.push("init".to_string());
        Ok(())
    }

    fn on_resize(&mut self, _ctx: &mut dyn GraphicsContext, width: u32, height: u32) {
        self.events.push(format!("resize {width}x{height}"));
    }

    fn on_key(&mut self, key: &Key, _position: PhysicalPosition<f64>) -> Control {
        self.events.push(format!("key {key:?}"));
        match (key, self.exit_on) {
            (Key::Char(c), Some(exit)) if *c == exit => Control::Exit,
            _ => Control::Continue,
        }
    }

    fn on_render(&mut self, ctx: &mut dyn GraphicsContext, elapsed: Duration) {
        self.events.push(format!("render {}", elapsed.as_millis()));
        ctx.set_uniform_vec3(
            box_ngin::context::ProgramHandle(0),
            uniforms::OFFSET,
            Vector3::new(0.0, 0.0, 0.0),
        );
    }
}

fn origin() -> PhysicalPosition<f64> {
    PhysicalPosition::new(0.0, 0.0)
}

#[test]
fn redraw_clears_renders_swaps_and_requests_the_next_frame() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(ProbeFlow::default(), wgpu::Color::BLACK);

    frame_loop
        .redraw_at(&mut ctx, Duration::from_millis(40))
        .unwrap();

    assert_eq!(ctx.call_names(), vec!["Clear", "UniformVec3", "Swap"]);
    assert_eq!(ctx.redraws.get(), 1);
    assert_eq!(frame_loop.flow().events, vec!["render 40"]);
}

#[test]
fn escape_requests_exit_without_reaching_the_flow() {
    let mut frame_loop = FrameLoop::new(ProbeFlow::default(), wgpu::Color::BLACK);

    frame_loop.key_pressed(&Key::Char('w'), origin());
    assert!(!frame_loop.exit_requested());

    frame_loop.key_pressed(&Key::Escape, origin());
    assert!(frame_loop.exit_requested());
    assert_eq!(frame_loop.flow().events, vec!["key Char('w')"]);
}

#[test]
fn flows_can_request_exit_from_key_handlers() {
    let flow = ProbeFlow {
        exit_on: Some('q'),
        ..Default::default()
    };
    let mut frame_loop = FrameLoop::new(flow, wgpu::Color::BLACK);

    frame_loop.key_pressed(&Key::Char('q'), origin());

    assert!(frame_loop.exit_requested());
}

#[test]
fn resize_reaches_context_then_flow() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(ProbeFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();

    frame_loop.resize(&mut ctx, 800, 600);
    frame_loop.resize(&mut ctx, 0, 600);

    assert_eq!(ctx.calls, vec![Call::Resize(800, 600)]);
    assert_eq!(frame_loop.flow().events, vec!["init", "resize 800x600"]);
}

#[test]
fn wedges_draw_both_objects_from_one_buffer() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(WedgesFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();
    ctx.calls.clear();

    frame_loop.redraw_at(&mut ctx, Duration::ZERO).unwrap();

    let offsets: Vec<_> = ctx
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::UniformVec3(_, name, v) if name == uniforms::OFFSET => Some(*v),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, wedges::OFFSETS.to_vec());

    let draws: Vec<_> = ctx
        .draws()
        .into_iter()
        .filter_map(|call| match call {
            Call::Draw {
                position_offset,
                color_offset,
                index_count,
                ..
            } => Some((*position_offset, *color_offset, *index_count)),
            _ => None,
        })
        .collect();
    let vertex_count = 2 * shapes::WEDGE_VERTEX_COUNT as u64;
    let index_count = shapes::WEDGE_INDICES.len() as u32;
    assert_eq!(
        draws,
        vec![
            (Some(0), Some(vertex_count * 12), index_count),
            (
                Some(shapes::WEDGE_VERTEX_COUNT as u64 * 12),
                Some(vertex_count * 12 + shapes::WEDGE_VERTEX_COUNT as u64 * 16),
                index_count,
            ),
        ]
    );
}

#[test]
fn wedges_keep_a_fixed_frustum_scale_on_resize() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(WedgesFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();

    frame_loop.resize(&mut ctx, 1000, 500);

    let perspective = ctx.last_matrix(uniforms::PERSPECTIVE_MATRIX).unwrap();
    assert!((perspective[0][0] - 0.5).abs() < 1e-6);
    assert!((perspective[1][1] - 1.0).abs() < 1e-6);
    assert_eq!(perspective[2][3], -1.0);
}

#[test]
fn stack_draws_parent_then_child() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(BoxStackFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();
    ctx.calls.clear();

    let elapsed = Duration::from_millis(2000);
    frame_loop.redraw_at(&mut ctx, elapsed).unwrap();

    assert_eq!(ctx.draws().len(), 2);
    let models = ctx.matrices(uniforms::MODEL_TO_CAMERA);
    assert_eq!(models.len(), 2);
    let (parent, child) = (models[0], models[1]);

    // The child is the parent composed with the child's own local transform.
    let mut local = TransformStack::new();
    local
        .translate(CHILD_ANCHOR)
        .rotate(Vector3::unit_x(), 90.0 * elapsed.as_secs_f32())
        .scale(CHILD_SCALE);
    let expected = parent * local.top();
    for col in 0..4 {
        for row in 0..4 {
            assert!((child[col][row] - expected[col][row]).abs() < 1e-4);
        }
    }
}

#[test]
fn stack_child_follows_wasd() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(BoxStackFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();

    frame_loop.redraw_at(&mut ctx, Duration::ZERO).unwrap();
    let before = ctx.last_matrix(uniforms::MODEL_TO_CAMERA).unwrap();

    frame_loop.key_pressed(&Key::Char('w'), origin());
    frame_loop.key_pressed(&Key::Char('w'), origin());
    ctx.calls.clear();
    frame_loop.redraw_at(&mut ctx, Duration::ZERO).unwrap();
    let after = ctx.last_matrix(uniforms::MODEL_TO_CAMERA).unwrap();

    // At t = 0 the parent is unrotated, so the child's origin moves by 0.2 in y.
    let origin = Vector4::new(0.0, 0.0, 0.0, 1.0);
    let moved = after * origin - before * origin;
    assert!(moved.x.abs() < 1e-5);
    assert!((moved.y - 0.2).abs() < 1e-5);
    assert!(moved.z.abs() < 1e-5);
    assert!(!frame_loop.exit_requested());
}

#[test]
fn stack_keeps_parent_transform_across_frames() {
    let mut ctx = RecordingContext::new();
    let mut frame_loop = FrameLoop::new(BoxStackFlow::default(), wgpu::Color::BLACK);
    frame_loop.init(&mut ctx).unwrap();
    ctx.calls.clear();

    // 40 s is a whole number of orbits and of spins.
    frame_loop.redraw_at(&mut ctx, Duration::ZERO).unwrap();
    frame_loop.redraw_at(&mut ctx, Duration::from_secs(40)).unwrap();

    let models = ctx.matrices(uniforms::MODEL_TO_CAMERA);
    assert_eq!(models.len(), 4);
    for col in 0..4 {
        for row in 0..4 {
            assert!((models[0][col][row] - models[2][col][row]).abs() < 1e-3);
        }
    }
    assert_ne!(models[0], Matrix4::identity());
}
