//! The graphics context: everything the demos need from the GPU.
//!
//! [`GraphicsContext`] is the small capability set the frame loop, the shader
//! loader and the geometry helpers are written against. [`WgpuContext`] is the
//! implementation backed by wgpu, rendering either into a window surface or,
//! for tests, into an offscreen texture.
//!
//! The API mirrors a classic immediate GL program: shaders are compiled per
//! stage and linked into a program, uniforms are set on a program and stick
//! until changed, and every `draw_indexed` snapshots the program's current
//! uniforms. Draws are recorded and encoded into a single render pass when
//! the frame is presented.

use std::{collections::HashMap, fmt, sync::Arc};

use anyhow::Context as _;
use cgmath::{Matrix4, Vector3};
use winit::window::Window;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    config::DemoConfig,
    data_structures::{geometry::AttributeLayout, texture::Texture},
    pipelines::basic::{self, DrawUniforms, PipelineSettings},
};

/// Uniform names understood by the programs built from `assets/shaders`.
pub mod uniforms {
    pub const PERSPECTIVE_MATRIX: &str = "perspective_matrix";
    pub const MODEL_TO_CAMERA: &str = "model_to_camera";
    pub const OFFSET: &str = "offset";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point a module compiled for this stage must export.
    pub fn entry_point(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled, not yet linked, shader stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// A linked program ready to draw with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// A GPU-resident vertex or index buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Capabilities the demos rely on.
///
/// Compilation and linking report failures as plain messages; the typed
/// errors live in [`crate::resources::shader`].
pub trait GraphicsContext {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, String>;

    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle, String>;

    /// Release a per-stage shader object. Linked programs keep what they need.
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Upload immutable data.
    fn upload_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle;

    fn set_uniform_matrix(&mut self, program: ProgramHandle, name: &str, matrix: Matrix4<f32>);

    fn set_uniform_vec3(&mut self, program: ProgramHandle, name: &str, vector: Vector3<f32>);

    /// Resize the drawable area (viewport and depth buffer).
    fn resize(&mut self, width: u32, height: u32);

    /// Clear colour and depth at the start of the next frame.
    fn clear(&mut self, colour: wgpu::Color);

    /// Indexed triangle-list draw of `index_count` `u16` indices.
    fn draw_indexed(&mut self, program: ProgramHandle, layout: &AttributeLayout, index_count: u32);

    /// Present everything recorded since the last swap.
    fn swap_buffers(&mut self) -> anyhow::Result<()>;

    /// Ask the event loop for another frame.
    fn request_redraw(&self);
}

/// Where frames end up.
enum RenderTarget {
    Surface {
        window: Arc<Window>,
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
        is_configured: bool,
    },
    Offscreen {
        texture: wgpu::Texture,
        format: wgpu::TextureFormat,
    },
}

impl RenderTarget {
    fn format(&self) -> wgpu::TextureFormat {
        match self {
            RenderTarget::Surface { config, .. } => config.format,
            RenderTarget::Offscreen { format, .. } => *format,
        }
    }
}

struct Program {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    current: DrawUniforms,
    slots_used: u32,
}

struct DrawCommand {
    program: ProgramHandle,
    uniform_slot: u32,
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    position_offset: wgpu::BufferAddress,
    color_offset: wgpu::BufferAddress,
    index_count: u32,
}

/// wgpu-backed [`GraphicsContext`].
pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    target: RenderTarget,
    size: [u32; 2],
    depth_texture: Option<Texture>,
    settings: PipelineSettings,
    shaders: HashMap<ShaderHandle, (ShaderStage, wgpu::ShaderModule)>,
    programs: HashMap<ProgramHandle, Program>,
    buffers: HashMap<BufferHandle, wgpu::Buffer>,
    next_id: u32,
    clear_colour: Option<wgpu::Color>,
    draws: Vec<DrawCommand>,
}

impl fmt::Debug for WgpuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuContext")
            .field("size", &self.size)
            .field("shaders", &self.shaders.len())
            .field("programs", &self.programs.len())
            .field("buffers", &self.buffers.len())
            .finish()
    }
}

impl WgpuContext {
    /// Create a context that presents into `window`.
    pub async fn new(window: Arc<Window>, config: &DemoConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        let (device, queue) = request_device(&adapter).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Vertex colours are authored for an sRGB target.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let target = RenderTarget::Surface {
            window,
            surface,
            config: surface_config,
            is_configured: false,
        };
        let mut ctx = Self::with_target(device, queue, target, config);
        ctx.resize(size.width, size.height);
        Ok(ctx)
    }

    /// Create a context without a window that renders into a texture.
    pub async fn headless(width: u32, height: u32, config: &DemoConfig) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        let (device, queue) = request_device(&adapter).await?;

        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let texture = create_offscreen_texture(&device, format, width, height);
        let target = RenderTarget::Offscreen { texture, format };
        let mut ctx = Self::with_target(device, queue, target, config);
        ctx.resize(width, height);
        Ok(ctx)
    }

    fn with_target(
        device: wgpu::Device,
        queue: wgpu::Queue,
        target: RenderTarget,
        config: &DemoConfig,
    ) -> Self {
        let settings = PipelineSettings {
            color_format: target.format(),
            depth_format: config.depth_buffer.then_some(Texture::DEPTH_FORMAT),
            cull_back_faces: config.cull_back_faces,
        };
        Self {
            device,
            queue,
            target,
            size: [0, 0],
            depth_texture: None,
            settings,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            next_id: 1,
            clear_colour: None,
            draws: Vec::new(),
        }
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    /// The window this context presents to, if any.
    pub fn window(&self) -> Option<&Arc<Window>> {
        match &self.target {
            RenderTarget::Surface { window, .. } => Some(window),
            RenderTarget::Offscreen { .. } => None,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run `f` inside a validation error scope and report whatever it raised.
    fn capture_validation<T>(&self, f: impl FnOnce(&wgpu::Device) -> T) -> Result<T, String> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = f(&self.device);
        match futures::executor::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(error.to_string()),
            None => Ok(value),
        }
    }

    fn program_mut(&mut self, program: ProgramHandle) -> Option<&mut Program> {
        let found = self.programs.get_mut(&program);
        if found.is_none() {
            log::warn!("Unknown program {:?}", program);
        }
        found
    }

    fn encode_frame(&self, view: &wgpu::TextureView) -> wgpu::CommandBuffer {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let load = match self.clear_colour {
                Some(colour) => wgpu::LoadOp::Clear(colour),
                None => wgpu::LoadOp::Load,
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: self.depth_texture.as_ref().map(|depth| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &self.draws {
                let (Some(program), Some(vertices), Some(indices)) = (
                    self.programs.get(&draw.program),
                    self.buffers.get(&draw.vertex_buffer),
                    self.buffers.get(&draw.index_buffer),
                ) else {
                    log::warn!("Skipping draw that references released resources");
                    continue;
                };
                render_pass.set_pipeline(&program.pipeline);
                render_pass.set_bind_group(
                    0,
                    &program.bind_group,
                    &[basic::uniform_offset(draw.uniform_slot)],
                );
                render_pass.set_vertex_buffer(0, vertices.slice(draw.position_offset..));
                render_pass.set_vertex_buffer(1, vertices.slice(draw.color_offset..));
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..draw.index_count, 0, 0..1);
            }
        }
        encoder.finish()
    }

    fn end_frame(&mut self) {
        self.draws.clear();
        self.clear_colour = None;
        self.programs
            .values_mut()
            .for_each(|program| program.slots_used = 0);
    }

    /// Copy the last presented offscreen frame back to the CPU.
    ///
    /// Pixels are returned row by row from the top left, as stored in the
    /// target format (sRGB encoded RGBA8 for [`WgpuContext::headless`]).
    #[cfg(feature = "integration-tests")]
    pub fn read_pixels(&self) -> anyhow::Result<Vec<[u8; 4]>> {
        let RenderTarget::Offscreen { texture, .. } = &self.target else {
            anyhow::bail!("only offscreen targets can be read back");
        };
        let (width, height) = (texture.width(), texture.height());
        let unpadded_bytes_per_row = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::Wait)
            .context("failed waiting for the readback copy")?;
        futures::executor::block_on(rx)
            .context("readback mapping was cancelled")?
            .context("failed to map the readback buffer")?;

        let pixels = {
            let data = buffer_slice.get_mapped_range();
            data.chunks(padded_bytes_per_row as usize)
                .flat_map(|row| row[..unpadded_bytes_per_row as usize].chunks_exact(4))
                .map(|px| [px[0], px[1], px[2], px[3]])
                .collect()
        };
        output_buffer.unmap();
        Ok(pixels)
    }
}

impl GraphicsContext for WgpuContext {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle, String> {
        let label = format!("{stage} shader");
        let module = self.capture_validation(|device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        })?;
        let handle = ShaderHandle(self.next_id());
        self.shaders.insert(handle, (stage, module));
        Ok(handle)
    }

    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle, String> {
        let mut vertex = None;
        let mut fragment = None;
        for handle in shaders {
            match self.shaders.get(handle) {
                Some((ShaderStage::Vertex, module)) => vertex = Some(module),
                Some((ShaderStage::Fragment, module)) => fragment = Some(module),
                None => return Err(format!("shader {:?} does not exist", handle)),
            }
        }
        let vertex = vertex.ok_or("program has no vertex stage")?;
        let fragment = fragment.ok_or("program has no fragment stage")?;

        let settings = &self.settings;
        let (pipeline, uniform_buffer, bind_group) = self.capture_validation(|device| {
            let bind_group_layout = basic::mk_bind_group_layout(device);
            let pipeline =
                basic::mk_basic_pipeline(device, &bind_group_layout, vertex, fragment, settings);
            let (uniform_buffer, bind_group) = basic::mk_uniforms(device, &bind_group_layout);
            (pipeline, uniform_buffer, bind_group)
        })?;

        let handle = ProgramHandle(self.next_id());
        self.programs.insert(
            handle,
            Program {
                pipeline,
                uniform_buffer,
                bind_group,
                current: DrawUniforms::new(),
                slots_used: 0,
            },
        );
        Ok(handle)
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if self.shaders.remove(&shader).is_none() {
            log::warn!("Deleting unknown shader {:?}", shader);
        }
    }

    fn upload_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> BufferHandle {
        use wgpu::util::DeviceExt;

        let (label, usage) = match kind {
            BufferKind::Vertex => ("Vertex Buffer", wgpu::BufferUsages::VERTEX),
            BufferKind::Index => ("Index Buffer", wgpu::BufferUsages::INDEX),
        };
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            });
        let handle = BufferHandle(self.next_id());
        self.buffers.insert(handle, buffer);
        handle
    }

    fn set_uniform_matrix(&mut self, program: ProgramHandle, name: &str, matrix: Matrix4<f32>) {
        let Some(program) = self.program_mut(program) else {
            return;
        };
        match name {
            uniforms::PERSPECTIVE_MATRIX => {
                program.current.perspective = (OPENGL_TO_WGPU_MATRIX * matrix).into();
            }
            uniforms::MODEL_TO_CAMERA => program.current.model_to_camera = matrix.into(),
            other => log::warn!("Program has no matrix uniform named {other}"),
        }
    }

    fn set_uniform_vec3(&mut self, program: ProgramHandle, name: &str, vector: Vector3<f32>) {
        let Some(program) = self.program_mut(program) else {
            return;
        };
        match name {
            uniforms::OFFSET => program.current.offset = vector.extend(0.0).into(),
            other => log::warn!("Program has no vector uniform named {other}"),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = [width, height];
        match &mut self.target {
            RenderTarget::Surface {
                surface,
                config,
                is_configured,
                ..
            } => {
                config.width = width;
                config.height = height;
                surface.configure(&self.device, config);
                *is_configured = true;
            }
            RenderTarget::Offscreen { texture, format } => {
                *texture = create_offscreen_texture(&self.device, *format, width, height);
            }
        }
        if self.settings.depth_format.is_some() {
            self.depth_texture = Some(Texture::create_depth_texture(
                &self.device,
                [width, height],
                "depth_texture",
            ));
        }
    }

    fn clear(&mut self, colour: wgpu::Color) {
        self.clear_colour = Some(colour);
    }

    fn draw_indexed(&mut self, program: ProgramHandle, layout: &AttributeLayout, index_count: u32) {
        let (Some(position), Some(color)) = (
            layout.base_offset(AttributeLayout::POSITION),
            layout.base_offset(AttributeLayout::COLOR),
        ) else {
            log::warn!("Attribute layout lacks a position or color attribute, skipping draw");
            return;
        };
        let Some(state) = self.programs.get_mut(&program) else {
            log::warn!("Unknown program {:?}", program);
            return;
        };
        if state.slots_used >= basic::MAX_DRAWS_PER_FRAME {
            log::warn!(
                "More than {} draws with one program in a frame, skipping",
                basic::MAX_DRAWS_PER_FRAME
            );
            return;
        }
        let uniform_slot = state.slots_used;
        state.slots_used += 1;
        self.queue.write_buffer(
            &state.uniform_buffer,
            basic::uniform_offset(uniform_slot) as wgpu::BufferAddress,
            bytemuck::cast_slice(&[state.current]),
        );
        self.draws.push(DrawCommand {
            program,
            uniform_slot,
            vertex_buffer: layout.vertex_buffer(),
            index_buffer: layout.index_buffer(),
            position_offset: position,
            color_offset: color,
            index_count,
        });
    }

    fn swap_buffers(&mut self) -> anyhow::Result<()> {
        let result = match &self.target {
            RenderTarget::Surface { is_configured, .. } if !is_configured => Ok(()),
            RenderTarget::Surface { surface, .. } => match surface.get_current_texture() {
                Ok(output) => {
                    let view = output
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());
                    let commands = self.encode_frame(&view);
                    self.queue.submit(std::iter::once(commands));
                    output.present();
                    Ok(())
                }
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let [width, height] = self.size;
                    log::warn!("Surface lost or outdated, reconfiguring");
                    self.resize(width, height);
                    Ok(())
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::warn!("Timed out acquiring the next frame, skipping it");
                    Ok(())
                }
                Err(e) => Err(anyhow::anyhow!("unable to acquire the next frame: {e}")),
            },
            RenderTarget::Offscreen { texture, .. } => {
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                let commands = self.encode_frame(&view);
                self.queue.submit(std::iter::once(commands));
                Ok(())
            }
        };
        self.end_frame();
        result
    }

    fn request_redraw(&self) {
        if let RenderTarget::Surface { window, .. } = &self.target {
            window.request_redraw();
        }
    }
}

async fn request_device(adapter: &wgpu::Adapter) -> anyhow::Result<(wgpu::Device, wgpu::Queue)> {
    log::info!("device and queue");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

fn create_offscreen_texture(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}
