use anyhow::Result;
use glam::Vec2;
use std::sync::Arc;
use winit::window::Window;

use super::context::WindowSurface;
use super::mesh::{uniform_buffer, GpuMesh};
use crate::camera::PerspectiveCamera;
use crate::core::{FrameContext, ResourceSlot, WindowDimensions};
use crate::hologram::{grid, GridPoint, HologramParams};
use crate::shaders::{HOLOGRAM, HOLOGRAM_BLOCK};
use crate::traits::{DepthFeed, RenderError, RenderTarget};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0039,
    g: 0.0047,
    b: 0.0065,
    a: 1.0,
};

/// Additive point cloud driven by a [`DepthFeed`]. Each grid sample is drawn
/// as one instanced screen-space quad; the feed is uploaded every frame.
pub struct HologramRenderer<F: DepthFeed> {
    surface: WindowSurface,
    camera: PerspectiveCamera,
    params: HologramParams,
    feed: F,
    pixels: Vec<u8>,

    uniform_buffer: ResourceSlot<wgpu::Buffer>,
    feed_texture: ResourceSlot<wgpu::Texture>,
    feed_view: ResourceSlot<wgpu::TextureView>,
    sampler: ResourceSlot<wgpu::Sampler>,
    bind_group: ResourceSlot<wgpu::BindGroup>,
    pipeline: ResourceSlot<wgpu::RenderPipeline>,
    points: GpuMesh,
}

impl<F: DepthFeed> HologramRenderer<F> {
    pub async fn new(window: Arc<Window>, feed: F) -> Result<Self> {
        HOLOGRAM.validate()?;
        let surface = WindowSurface::new(window).await?;
        let dimensions = surface.dimensions();
        let device = surface.gpu().device();

        let (width, height) = feed.dimensions();
        let params = HologramParams {
            width,
            height,
            ..HologramParams::default()
        };
        let camera = PerspectiveCamera::hologram(dimensions.aspect());

        let uniforms = uniform_buffer(device, "Hologram Uniform", &params.uniform(&camera, viewport(dimensions)));

        let feed_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Feed Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // the mask thresholds are tuned for raw byte values
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let feed_view = feed_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Feed Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Hologram Bind Group Layout"),
            entries: &[
                HOLOGRAM_BLOCK.layout_entry(wgpu::ShaderStages::VERTEX),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let Some(uniform) = uniforms.get() else {
            anyhow::bail!("hologram uniform buffer was not created");
        };
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Hologram Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: HOLOGRAM_BLOCK.binding,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&feed_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hologram Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let module = HOLOGRAM.create_module(device);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(HOLOGRAM.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(HOLOGRAM.vertex_entry),
                buffers: &[GridPoint::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(HOLOGRAM.fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface.format(),
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // no depth test or write, points only accumulate
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let points = GpuMesh::new(device, "Hologram Grid", &grid(width, height));
        let pixels = vec![0u8; (width * height * 4) as usize];
        log::info!("hologram: {} points", params.point_count());

        Ok(Self {
            camera,
            params,
            feed,
            pixels,
            uniform_buffer: uniforms,
            feed_texture: ResourceSlot::new("feed texture", feed_texture),
            feed_view: ResourceSlot::new("feed view", feed_view),
            sampler: ResourceSlot::new("feed sampler", sampler),
            bind_group: ResourceSlot::new("hologram bind group", bind_group),
            pipeline: ResourceSlot::new("hologram pipeline", pipeline),
            points,
            surface,
        })
    }

    fn upload_feed(&mut self, t: f32) {
        self.feed.frame(t, &mut self.pixels);
        let Some(texture) = self.feed_texture.get() else {
            return;
        };
        self.surface.gpu().queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.params.width),
                rows_per_image: Some(self.params.height),
            },
            wgpu::Extent3d {
                width: self.params.width,
                height: self.params.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

fn viewport(dimensions: WindowDimensions) -> Vec2 {
    Vec2::new(dimensions.width.max(1) as f32, dimensions.height.max(1) as f32)
}

impl<F: DepthFeed> RenderTarget for HologramRenderer<F> {
    fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.camera.set_viewport(dimensions.width, dimensions.height);
        self.surface.resize(dimensions);
    }

    fn render(&mut self, ctx: &FrameContext) -> Result<(), RenderError> {
        self.upload_feed(ctx.time);
        let uniform = self.params.uniform(&self.camera, viewport(self.surface.dimensions()));
        if let Some(buffer) = self.uniform_buffer.get() {
            self.surface.gpu().queue().write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }

        let output = self.surface.acquire()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (Some(pipeline), Some(bind_group), Some(points)) =
            (self.pipeline.get(), self.bind_group.get(), self.points.buffer())
        else {
            return Err(RenderError::ContextLost);
        };

        let mut encoder = self
            .surface
            .gpu()
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Hologram Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hologram Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.set_vertex_buffer(0, points.slice(..));
            pass.draw(0..6, 0..self.points.vertex_count());
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
        self.points.dispose();
        self.pipeline.dispose();
        self.bind_group.dispose();
        self.sampler.dispose();
        self.feed_view.dispose();
        self.feed_texture.dispose();
        self.uniform_buffer.dispose();
        self.surface.dispose();
        log::info!("hologram renderer resources released");
    }
}
