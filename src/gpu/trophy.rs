use anyhow::Result;
use bytemuck::Zeroable;
use std::sync::Arc;
use winit::window::Window;

use super::context::WindowSurface;
use super::mesh::{uniform_buffer, DepthTarget, GpuMesh, DEPTH_FORMAT};
use crate::camera::PerspectiveCamera;
use crate::core::{FrameContext, ResourceSlot, WindowDimensions};
use crate::geometry::{uv_sphere, FragmentVertex, SolidVertex};
use crate::scene::MergedSceneMesh;
use crate::shaders::{ShaderProgram, CAMERA_BLOCK, LIGHTS_BLOCK, LIGHT_MARKER, MODEL_BLOCK, PLINTH, TROPHY_BODY};
use crate::traits::{RenderError, RenderTarget, TrophyTarget};
use crate::types::{LightsUniform, ModelUniform};

const MARKER_RADIUS: f32 = 0.05;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0039,
    g: 0.0047,
    b: 0.0065,
    a: 1.0,
};

struct PipelineSpec<'a> {
    program: &'static ShaderProgram,
    layout: &'a wgpu::PipelineLayout,
    vertex: wgpu::VertexBufferLayout<'static>,
    cull_mode: Option<wgpu::Face>,
}

fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat, desc: PipelineSpec) -> wgpu::RenderPipeline {
    let module = desc.program.create_module(device);
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.program.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some(desc.program.vertex_entry),
            buffers: &[desc.vertex],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some(desc.program.fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            ..Default::default()
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
        cache: None,
    })
}

/// Draws the fragmented body, the plinth and the two light markers.
///
/// Group 0 carries the shared lights and camera uniforms and is bound by
/// all three pipelines; group 1 carries the trophy model transform.
pub struct TrophyRenderer {
    surface: WindowSurface,
    camera: PerspectiveCamera,
    depth: DepthTarget,

    lights_buffer: ResourceSlot<wgpu::Buffer>,
    camera_buffer: ResourceSlot<wgpu::Buffer>,
    model_buffer: ResourceSlot<wgpu::Buffer>,
    frame_bind_group: ResourceSlot<wgpu::BindGroup>,
    model_bind_group: ResourceSlot<wgpu::BindGroup>,

    body_pipeline: ResourceSlot<wgpu::RenderPipeline>,
    plinth_pipeline: ResourceSlot<wgpu::RenderPipeline>,
    marker_pipeline: ResourceSlot<wgpu::RenderPipeline>,

    body: Option<GpuMesh>,
    plinth: Option<GpuMesh>,
    marker: GpuMesh,
}

impl TrophyRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        for program in [&TROPHY_BODY, &PLINTH, &LIGHT_MARKER] {
            program.validate()?;
        }
        let surface = WindowSurface::new(window).await?;
        let dimensions = surface.dimensions();
        let device = surface.gpu().device();
        let format = surface.format();

        let camera = PerspectiveCamera::trophy(dimensions.aspect());

        let lights_buffer = uniform_buffer(device, "Lights Uniform", &LightsUniform::zeroed());
        let camera_buffer = uniform_buffer(device, "Camera Uniform", &camera.to_uniform());
        let model_buffer = uniform_buffer(device, "Model Uniform", &ModelUniform::new(glam::Mat4::IDENTITY));

        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[LIGHTS_BLOCK.layout_entry(stages), CAMERA_BLOCK.layout_entry(stages)],
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[MODEL_BLOCK.layout_entry(stages)],
        });

        let (Some(lights), Some(camera_buf), Some(model)) =
            (lights_buffer.get(), camera_buffer.get(), model_buffer.get())
        else {
            anyhow::bail!("uniform buffers were not created");
        };

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: LIGHTS_BLOCK.binding,
                    resource: lights.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: CAMERA_BLOCK.binding,
                    resource: camera_buf.as_entire_binding(),
                },
            ],
        });
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: &model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: MODEL_BLOCK.binding,
                resource: model.as_entire_binding(),
            }],
        });

        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trophy Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &model_layout],
            push_constant_ranges: &[],
        });
        let marker_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Marker Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });

        let body_pipeline = create_pipeline(device, format, PipelineSpec {
            program: &TROPHY_BODY,
            layout: &mesh_layout,
            vertex: FragmentVertex::layout(),
            cull_mode: Some(wgpu::Face::Back),
        });
        let plinth_pipeline = create_pipeline(device, format, PipelineSpec {
            program: &PLINTH,
            layout: &mesh_layout,
            vertex: SolidVertex::layout(),
            cull_mode: Some(wgpu::Face::Back),
        });
        let marker_pipeline = create_pipeline(device, format, PipelineSpec {
            program: &LIGHT_MARKER,
            layout: &marker_layout,
            vertex: SolidVertex::layout(),
            cull_mode: Some(wgpu::Face::Back),
        });

        let marker = GpuMesh::new(device, "Light Marker", &uv_sphere(MARKER_RADIUS, 12, 6));
        let depth = DepthTarget::new(device, dimensions);

        Ok(Self {
            camera,
            depth,
            lights_buffer,
            camera_buffer,
            model_buffer,
            frame_bind_group: ResourceSlot::new("frame bind group", frame_bind_group),
            model_bind_group: ResourceSlot::new("model bind group", model_bind_group),
            body_pipeline: ResourceSlot::new("body pipeline", body_pipeline),
            plinth_pipeline: ResourceSlot::new("plinth pipeline", plinth_pipeline),
            marker_pipeline: ResourceSlot::new("marker pipeline", marker_pipeline),
            body: None,
            plinth: None,
            marker,
            surface,
        })
    }

    fn write_uniforms(&self, ctx: &FrameContext) {
        let queue = self.surface.gpu().queue();
        if let Some(buffer) = self.lights_buffer.get() {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&LightsUniform::from_frame(ctx)));
        }
        if let Some(buffer) = self.camera_buffer.get() {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&self.camera.to_uniform()));
        }
        if let Some(buffer) = self.model_buffer.get() {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&ModelUniform::new(ctx.model)));
        }
    }
}

impl RenderTarget for TrophyRenderer {
    fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.camera.set_viewport(dimensions.width, dimensions.height);
        self.surface.resize(dimensions);
        self.depth.dispose();
        self.depth = DepthTarget::new(self.surface.gpu().device(), dimensions);
    }

    fn render(&mut self, ctx: &FrameContext) -> Result<(), RenderError> {
        // uniforms are written before the pass that reads them
        self.write_uniforms(ctx);

        let output = self.surface.acquire()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = self.depth.view().ok_or(RenderError::ContextLost)?;
        let (Some(frame_group), Some(model_group)) = (self.frame_bind_group.get(), self.model_bind_group.get()) else {
            return Err(RenderError::ContextLost);
        };

        let device = self.surface.gpu().device();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Trophy Encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trophy Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, frame_group, &[]);
            pass.set_bind_group(1, model_group, &[]);

            let meshes = [
                (self.body_pipeline.get(), self.body.as_ref()),
                (self.plinth_pipeline.get(), self.plinth.as_ref()),
            ];
            for (pipeline, mesh) in meshes {
                let (Some(pipeline), Some(mesh)) = (pipeline, mesh) else {
                    continue;
                };
                let Some(buffer) = mesh.buffer() else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..mesh.vertex_count(), 0..1);
            }

            if let (Some(pipeline), Some(buffer)) = (self.marker_pipeline.get(), self.marker.buffer()) {
                pass.set_pipeline(pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..self.marker.vertex_count(), 0..2);
            }
        }

        self.surface.gpu().queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        self.surface.reconfigure();
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(mut mesh) = self.body.take() {
            mesh.dispose();
        }
        if let Some(mut mesh) = self.plinth.take() {
            mesh.dispose();
        }
        self.marker.dispose();
        self.body_pipeline.dispose();
        self.plinth_pipeline.dispose();
        self.marker_pipeline.dispose();
        self.frame_bind_group.dispose();
        self.model_bind_group.dispose();
        self.lights_buffer.dispose();
        self.camera_buffer.dispose();
        self.model_buffer.dispose();
        self.depth.dispose();
        self.surface.dispose();
        log::info!("trophy renderer resources released");
    }
}

impl TrophyTarget for TrophyRenderer {
    fn install(&mut self, mesh: &MergedSceneMesh) -> Result<(), RenderError> {
        let device = self.surface.gpu().device();
        let body = mesh.body.as_deref().map(|v| GpuMesh::new(device, "Trophy Body", v));
        let plinth = mesh.plinth.as_deref().map(|v| GpuMesh::new(device, "Trophy Plinth", v));

        for mut previous in [std::mem::replace(&mut self.body, body), std::mem::replace(&mut self.plinth, plinth)]
            .into_iter()
            .flatten()
        {
            previous.dispose();
        }
        Ok(())
    }
}
