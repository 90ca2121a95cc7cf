use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use crate::core::{ResourceSlot, WindowDimensions};
use crate::traits::RenderError;

/// Device and queue, cheap to clone
#[derive(Clone)]
pub struct GpuContext {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a GPU context compatible with the provided surface
    pub async fn for_surface(instance: &Instance, surface: &Surface<'_>) -> Result<(Self, Adapter)> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find appropriate adapter: {:?}", e))?;

        let (device, queue) = Self::request_device(&adapter).await?;
        let context = Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
        };
        Ok((context, adapter))
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        adapter
            .request_device(&DeviceDescriptor {
                label: Some("GPU Context Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }
}

/// A window's swapchain plus the device that drives it
pub struct WindowSurface {
    gpu: GpuContext,
    surface: ResourceSlot<Surface<'static>>,
    config: SurfaceConfiguration,
}

impl WindowSurface {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create rendering surface")?;
        let (gpu, adapter) = GpuContext::for_surface(&instance, &surface).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &config);

        Ok(Self {
            gpu,
            surface: ResourceSlot::new("surface", surface),
            config,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn dimensions(&self) -> WindowDimensions {
        WindowDimensions::new(self.config.width, self.config.height)
    }

    pub fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.config.width = dimensions.width;
        self.config.height = dimensions.height;
        self.reconfigure();
    }

    /// Reapply the current configuration, e.g. after the surface was lost
    pub fn reconfigure(&mut self) {
        if let Some(surface) = self.surface.get() {
            surface.configure(self.gpu.device(), &self.config);
        }
    }

    /// Next swapchain texture. An outdated or lost surface is reconfigured
    /// in place and the frame is skipped.
    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        let surface = self.surface.get().ok_or(RenderError::ContextLost)?;
        surface.get_current_texture().map_err(|e| match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                surface.configure(self.gpu.device(), &self.config);
                RenderError::Outdated
            }
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            other => RenderError::Other(other.to_string()),
        })
    }

    pub fn dispose(&mut self) {
        self.surface.dispose();
    }
}
