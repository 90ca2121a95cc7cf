use wgpu::util::DeviceExt;

use crate::core::{ResourceSlot, WindowDimensions};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A non-indexed vertex buffer and its draw count
pub struct GpuMesh {
    buffer: ResourceSlot<wgpu::Buffer>,
    vertex_count: u32,
}

impl GpuMesh {
    pub fn new<V: bytemuck::Pod>(device: &wgpu::Device, label: &'static str, vertices: &[V]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer: ResourceSlot::new(label, buffer),
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.get()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn dispose(&mut self) {
        self.buffer.dispose();
    }
}

pub fn uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &'static str, value: &T) -> ResourceSlot<wgpu::Buffer> {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    ResourceSlot::new(label, buffer)
}

/// Depth attachment sized to the surface
pub struct DepthTarget {
    texture: ResourceSlot<wgpu::Texture>,
    view: ResourceSlot<wgpu::TextureView>,
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, dimensions: WindowDimensions) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: dimensions.width.max(1),
                height: dimensions.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture: ResourceSlot::new("depth texture", texture),
            view: ResourceSlot::new("depth view", view),
        }
    }

    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.get()
    }

    pub fn dispose(&mut self) {
        self.view.dispose();
        self.texture.dispose();
    }
}
