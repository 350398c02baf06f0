use crate::constants::CLEAR_RGB;
use glam::Vec3;
use mirror_core::constants::MARKER_RENDER_ORDER;
use mirror_core::{Camera, Light, SceneGraph, Shading};
use web_sys as web;

mod helpers;
mod meshes;
mod targets;
use helpers::DepthMode;
use meshes::{MeshKind, MeshSet};
use targets::RenderTargets;

// Light intensities in the scene are tuned for a physically based renderer;
// these bring them into the shader's 0..1 range.
const AMBIENT_SCALE: f32 = 0.12;
const DIRECTIONAL_SCALE: f32 = 0.06;
const SPOT_SCALE: f32 = 0.08;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    key_light: [f32; 4],
    ambient: [f32; 4],
    env: [f32; 4],
}

/// Per-draw data: model matrix, colour with opacity, and shading parameters.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Instance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl Instance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
        6 => Float32x4, 7 => Float32x4
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Pass {
    Opaque,
    Transparent,
    Overlay,
}

struct Draw {
    pass: Pass,
    mesh: MeshKind,
    instance: Instance,
    depth: f32,
    order: i32,
}

fn shading_code(shading: Shading) -> f32 {
    match shading {
        Shading::Standard => 0.0,
        Shading::Unlit => 1.0,
        Shading::Reflective => 2.0,
        Shading::Glow => 3.0,
    }
}

/// Flatten the scene into draws ordered for the three pipelines.
fn collect_draws(scene: &SceneGraph, eye: Vec3) -> Vec<Draw> {
    let mut draws: Vec<Draw> = scene
        .draw_list()
        .into_iter()
        .map(|item| {
            let (mesh, local) = meshes::fit(&item.geometry);
            let model = item.world * local;
            let m = item.material;
            let pass = if item.render_order >= MARKER_RENDER_ORDER {
                Pass::Overlay
            } else if m.is_transparent() {
                Pass::Transparent
            } else {
                Pass::Opaque
            };
            Draw {
                pass,
                mesh,
                instance: Instance {
                    model: model.to_cols_array_2d(),
                    color: m.color.extend(m.opacity).to_array(),
                    params: [m.emissive, shading_code(m.shading), m.roughness, m.metalness],
                },
                depth: item.world.w_axis.truncate().distance(eye),
                order: item.render_order,
            }
        })
        .collect();
    draws.sort_by(|a, b| {
        a.pass.cmp(&b.pass).then_with(|| match a.pass {
            Pass::Opaque => a.mesh.cmp(&b.mesh),
            Pass::Transparent => b.depth.total_cmp(&a.depth),
            Pass::Overlay => a.order.cmp(&b.order),
        })
    });
    draws
}

fn scene_uniforms(scene: &SceneGraph, camera: &Camera) -> SceneUniforms {
    let mut ambient = 0.0;
    let mut spot = 0.0;
    let mut key_dir = Vec3::ZERO;
    let mut key = 0.0;
    for (light, pos) in scene.lights() {
        match light {
            Light::Ambient { intensity } => ambient += intensity,
            Light::Directional { intensity } => {
                key_dir += -pos.normalize_or_zero() * intensity;
                key += intensity;
            }
            Light::Spot { intensity, .. } => spot += intensity,
        }
    }
    let key_dir = key_dir.try_normalize().unwrap_or(Vec3::NEG_Y);
    let ambient = (ambient * AMBIENT_SCALE).min(0.6);
    let (env_on, env_yaw) = match scene.environment {
        Some(env) => (1.0, env.rotation_y),
        None => (0.0, 0.0),
    };
    SceneUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        eye: camera.eye.extend(1.0).to_array(),
        key_light: key_dir.extend((key * DIRECTIONAL_SCALE).min(1.0)).to_array(),
        ambient: [ambient, ambient, ambient, (spot * SPOT_SCALE).min(1.0)],
        env: [env_on, env_yaw, 0.0, 0.0],
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    meshes: MeshSet,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

const INITIAL_INSTANCES: usize = 256;

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instances"),
        size: (capacity * std::mem::size_of::<Instance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(mirror_core::SCENE_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let blend = Some(wgpu::BlendState::ALPHA_BLENDING);
        let opaque_pipeline = helpers::make_scene_pipeline(
            &device,
            "opaque",
            &layout,
            &shader,
            format,
            None,
            DepthMode::Write,
        );
        let transparent_pipeline = helpers::make_scene_pipeline(
            &device,
            "transparent",
            &layout,
            &shader,
            format,
            blend,
            DepthMode::TestOnly,
        );
        let overlay_pipeline = helpers::make_scene_pipeline(
            &device,
            "overlay",
            &layout,
            &shader,
            format,
            blend,
            DepthMode::Ignore,
        );

        let [r, g, b] = CLEAR_RGB;
        Ok(Self {
            targets: RenderTargets::new(&device, width, height),
            meshes: MeshSet::new(&device),
            instance_buffer: create_instance_buffer(&device, INITIAL_INSTANCES),
            instance_capacity: INITIAL_INSTANCES,
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            bind_group,
            opaque_pipeline,
            transparent_pipeline,
            overlay_pipeline,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!("[render] instance buffer {} -> {}", self.instance_capacity, capacity);
        self.instance_buffer.destroy();
        self.instance_buffer = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }

    pub fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let draws = collect_draws(scene, camera.eye);
        for draw in &draws {
            self.meshes.ensure(&self.device, draw.mesh);
        }
        self.ensure_instance_capacity(draws.len().max(1));
        let instances: Vec<Instance> = draws.iter().map(|d| d.instance).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        let uniforms = scene_uniforms(scene, camera);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut bound_pass = None;
            let mut bound_mesh = None;
            for (i, draw) in draws.iter().enumerate() {
                if bound_pass != Some(draw.pass) {
                    rpass.set_pipeline(match draw.pass {
                        Pass::Opaque => &self.opaque_pipeline,
                        Pass::Transparent => &self.transparent_pipeline,
                        Pass::Overlay => &self.overlay_pipeline,
                    });
                    bound_pass = Some(draw.pass);
                }
                let Some(mesh) = self.meshes.get(draw.mesh) else {
                    continue;
                };
                if bound_mesh != Some(draw.mesh) {
                    rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                    rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                    bound_mesh = Some(draw.mesh);
                }
                let i = i as u32;
                rpass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
