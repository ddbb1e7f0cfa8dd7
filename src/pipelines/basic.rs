use std::num::NonZeroU64;

use cgmath::SquareMatrix;

use crate::context::ShaderStage;

/// Draws per program and frame; each one gets its own uniform slot.
pub const MAX_DRAWS_PER_FRAME: u32 = 64;

/// Dynamic uniform offsets must be multiples of this (wgpu's default limit).
const UNIFORM_SLOT_STRIDE: u32 = 256;

/// Byte offset of a draw's uniform slot inside the program's uniform buffer.
pub fn uniform_offset(slot: u32) -> u32 {
    slot * UNIFORM_SLOT_STRIDE
}

/// The uniform block of `assets/shaders/vertex.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub perspective: [[f32; 4]; 4],
    pub model_to_camera: [[f32; 4]; 4],
    // xyz is the offset; w keeps the block 16-byte aligned
    pub offset: [f32; 4],
}

impl DrawUniforms {
    pub fn new() -> Self {
        Self {
            perspective: cgmath::Matrix4::identity().into(),
            model_to_camera: cgmath::Matrix4::identity().into(),
            offset: [0.0; 4],
        }
    }
}

impl Default for DrawUniforms {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-function state shared by every program of a context.
#[derive(Clone, Debug)]
pub struct PipelineSettings {
    pub color_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub cull_back_faces: bool,
}

/**
 * Positions and colors live in two separate blocks of the same buffer, so each
 * attribute gets its own tightly packed vertex buffer slot:
 *
 * slot 0: position, 3 floats, shader location 0
 * slot 1: color, 4 floats, shader location 1
 */
const VERTEX_LAYOUTS: [wgpu::VertexBufferLayout<'static>; 2] = [
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    },
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        }],
    },
];

fn uniform_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64)
        .unwrap_or(NonZeroU64::MIN)
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: Some(uniform_size()),
            },
            count: None,
        }],
        label: Some("uniform_bind_group_layout"),
    })
}

/// One uniform buffer with [`MAX_DRAWS_PER_FRAME`] slots and its bind group.
pub fn mk_uniforms(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Uniform Buffer"),
        size: (UNIFORM_SLOT_STRIDE * MAX_DRAWS_PER_FRAME) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: Some(uniform_size()),
            }),
        }],
        label: Some("uniform_bind_group"),
    });
    (buffer, bind_group)
}

pub fn mk_basic_pipeline(
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
    settings: &PipelineSettings,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[uniform_layout],
        push_constant_ranges: &[],
    });

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        settings,
        &VERTEX_LAYOUTS,
        vertex,
        fragment,
    )
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    settings: &PipelineSettings,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some(ShaderStage::Vertex.entry_point()),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some(ShaderStage::Fragment.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: settings.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            // The box data is wound clockwise when seen from outside.
            front_face: wgpu::FrontFace::Cw,
            cull_mode: settings.cull_back_faces.then_some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: settings.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
