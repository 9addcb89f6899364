use crate::{
    camera::TransformUniform,
    config::CLEAR_COLOR,
    error::{Result, TrigridError},
    mesh::Mesh,
    shader::ShaderSource,
    texture::{DEPTH_FORMAT, DepthTexture},
};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

/// Everything a program hands to the renderer once at startup.
pub struct Scene {
    pub mesh: Mesh,
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
    pub wireframe: bool,
    /// Written to `uColor` in the transform block.
    pub color: [f32; 3],
}

pub struct MeshRenderData {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub num_elements: u32,
}

impl MeshRenderData {
    fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: mesh.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = mesh.indices().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_elements: mesh.element_count(),
        }
    }
}

/// GPU side of a program: surface, device, the uploaded mesh and the one pipeline.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    /// `None` when the shaders failed to compile or link; frames are then only cleared.
    render_pipeline: Option<wgpu::RenderPipeline>,
    mesh: MeshRenderData,
    depth_texture: DepthTexture,

    transform_uniform: TransformUniform,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, scene: &Scene) -> Result<Self> {
        let size = window.inner_size();

        // 1. Instance & Surface
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        // 2. Adapter, Device & Queue
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(TrigridError::NoGpuAdapter)?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?}, {:?})", info.name, info.device_type, info.backend);
        log::info!("GPU driver: {} {}", info.driver, info.driver_info);

        let line_mode = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let polygon_mode = match (scene.wireframe, line_mode) {
            (true, true) => wgpu::PolygonMode::Line,
            (true, false) => {
                log::warn!("Adapter has no line polygon mode, drawing filled triangles");
                wgpu::PolygonMode::Fill
            }
            (false, _) => wgpu::PolygonMode::Fill,
        };
        let required_features = if polygon_mode == wgpu::PolygonMode::Line {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features,
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        device.on_uncaptured_error(Box::new(|err: wgpu::Error| {
            log::error!("GPU error: {err}")
        }));

        // 3. Config
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Waits for vsync, one frame per refresh
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // 4. Mesh
        let mesh = MeshRenderData::upload(&device, &scene.mesh);
        log::debug!("Uploaded {} elements", mesh.num_elements);

        // 5. Transform uniform
        let transform_uniform = TransformUniform::new(scene.color);

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&[transform_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("transform_bind_group_layout"),
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });

        // 6. Depth
        let depth_texture = DepthTexture::create(&device, &config, "depth_texture");

        // 7. Pipeline
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&transform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = build_pipeline(
            &device,
            &render_pipeline_layout,
            scene,
            config.format,
            polygon_mode,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            render_pipeline,
            mesh,
            depth_texture,
            transform_uniform,
            transform_buffer,
            transform_bind_group,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture =
                DepthTexture::create(&self.device, &self.config, "depth_texture");
        }
    }

    pub fn update(&mut self, mvp: glam::Mat4) {
        self.transform_uniform.update_mvp(mvp);
        self.queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::cast_slice(&[self.transform_uniform]),
        );
    }

    pub fn render(&mut self) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = &self.render_pipeline {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));

                match &self.mesh.index_buffer {
                    Some(index_buffer) => {
                        render_pass
                            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..self.mesh.num_elements, 0, 0..1);
                    }
                    None => render_pass.draw(0..self.mesh.num_elements, 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        // Diagnostic only, the frame is presented either way
        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            log::error!("GPU error: {err}");
        }

        output.present();

        Ok(())
    }
}

/// Compiles both stages and links them into a pipeline.
///
/// Any failure is logged and leaves the program without a pipeline.
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    scene: &Scene,
    format: wgpu::TextureFormat,
    polygon_mode: wgpu::PolygonMode,
) -> Option<wgpu::RenderPipeline> {
    let vertex_module = scene.vertex_shader.create_module(device);
    let fragment_module = scene.fragment_shader.create_module(device);
    let (Some(vertex_module), Some(fragment_module)) = (vertex_module, fragment_module) else {
        log::error!("Shader linking skipped, a stage failed to compile");
        return None;
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: "main",
            buffers: &[scene.mesh.layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: "main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Both faces stay visible while orbiting
            cull_mode: None,
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => {
            log::error!("ERROR: Shader linking failed.\n{err}");
            None
        }
        None => Some(pipeline),
    }
}
