mod helpers;
pub(crate) mod instances;
mod mesh;
mod points;
mod post;
mod targets;

use crate::constants::*;
use folio_core::color::hex;
use folio_core::{Camera, MeshInstance, PointInstance, SceneLayout};
use glam::Vec3;
use instances::{DrawBatch, MeshInstanceRaw, MeshPass, PointInstanceRaw};
use mesh::{GpuMesh, MeshPipelines};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::RenderTargets;
use web_sys as web;
use wgpu;

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

impl SceneUniforms {
    fn new(camera: &Camera) -> Self {
        let (right, up) = camera.billboard_axes();
        let light = Vec3::from_array(KEY_LIGHT_DIR).normalize();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light: light.extend(KEY_LIGHT_INTENSITY).to_array(),
            ambient: [AMBIENT_INTENSITY, AMBIENT_INTENSITY, AMBIENT_INTENSITY, 0.0],
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        }
    }
}

/// Vertex buffer of per-instance data, regrown when a frame needs more room.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, stride, capacity),
            capacity,
            stride,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        stride: usize,
        capacity: usize,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (stride * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload<T: bytemuck::Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        if data.len() > self.capacity {
            self.capacity = instances::grown_capacity(data.len(), self.capacity);
            self.buffer.destroy();
            self.buffer = Self::allocate(device, self.label, self.stride, self.capacity);
            log::debug!("[gpu] {} grown to {}", self.label, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    mesh_pipelines: MeshPipelines,
    point_pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    mesh_instances: InstanceBuffer,
    point_instances: InstanceBuffer,

    // per-frame scratch, reused
    mesh_raw: Vec<MeshInstanceRaw>,
    batches: Vec<DrawBatch>,
    point_raw: Vec<PointInstanceRaw>,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        layout: &SceneLayout,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Browsers usually expose only non-sRGB canvas formats; draw through an sRGB view.
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} view {:?} {}x{}", format, view_format, width, height);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });

        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });

        let meshes = mesh::upload_meshes(&device, &layout.meshes);
        let mesh_pipelines = mesh::create_mesh_pipelines(&device, &scene_shader, &scene_bgl);
        let point_pipeline = points::create_point_pipeline(&device, &points_shader, &scene_bgl);
        let quad_vb = points::create_quad(&device);
        let mesh_instances = InstanceBuffer::new(
            &device,
            "mesh_instances",
            std::mem::size_of::<MeshInstanceRaw>(),
            INITIAL_MESH_INSTANCES,
        );
        let point_instances = InstanceBuffer::new(
            &device,
            "point_instances",
            std::mem::size_of::<PointInstanceRaw>(),
            INITIAL_POINT_INSTANCES,
        );

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, view_format);
        let post_groups = post.bind_groups(&device, &targets);

        let bg = hex(BACKGROUND);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            scene_uniform_buffer,
            scene_bind_group,
            meshes,
            mesh_pipelines,
            point_pipeline,
            quad_vb,
            mesh_instances,
            point_instances,
            mesh_raw: Vec::with_capacity(INITIAL_MESH_INSTANCES),
            batches: Vec::new(),
            point_raw: Vec::with_capacity(INITIAL_POINT_INSTANCES),
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: bg.x as f64,
                g: bg.y as f64,
                b: bg.z as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::debug!("[gpu] resized {}x{}", width, height);
        }
    }

    /// Reapply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        meshes: impl IntoIterator<Item = MeshInstance>,
        points: impl IntoIterator<Item = PointInstance>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(camera)),
        );
        instances::pack_meshes(meshes, camera.eye, &mut self.mesh_raw, &mut self.batches);
        instances::pack_points(points, &mut self.point_raw);
        self.mesh_instances
            .upload(&self.device, &self.queue, &self.mesh_raw);
        self.point_instances
            .upload(&self.device, &self.queue, &self.point_raw);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            if !self.mesh_raw.is_empty() {
                rpass.set_vertex_buffer(1, self.mesh_instances.buffer.slice(..));
                let passes = [
                    (MeshPass::Opaque, &self.mesh_pipelines.opaque),
                    (MeshPass::Wireframe, &self.mesh_pipelines.wireframe),
                    (MeshPass::Transparent, &self.mesh_pipelines.transparent),
                ];
                for (pass, pipeline) in passes {
                    rpass.set_pipeline(pipeline);
                    for batch in instances::batches_in(&self.batches, pass) {
                        let Some(mesh) = self.meshes.get(batch.mesh) else {
                            continue;
                        };
                        let range = batch.first..batch.first + batch.count;
                        rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                        let (index_buffer, count) = if pass == MeshPass::Wireframe {
                            (&mesh.edges, mesh.edge_count)
                        } else {
                            (&mesh.indices, mesh.index_count)
                        };
                        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..count, 0, range);
                    }
                }
            }

            if !self.point_raw.is_empty() {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.point_instances.buffer.slice(..));
                rpass.draw(0..points::QUAD_VERTICES, 0..self.point_raw.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));

        let (bw, bh) = targets::bloom_size(self.width, self.height);
        self.post.run(
            &self.device,
            &self.queue,
            &self.targets,
            &self.post_groups,
            &view,
            PostUniforms {
                resolution: [bw as f32, bh as f32],
                blur_dir: [0.0, 0.0],
                bloom_strength: BLOOM_STRENGTH,
                threshold: BLOOM_THRESHOLD,
                _pad: [0.0; 2],
            },
        );
        frame.present();
        Ok(())
    }
}
