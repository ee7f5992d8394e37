use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::backend::{negotiate, GpuBackend, Negotiated};
use super::surface::{self, SurfaceCaps};
use super::{GpuError, GpuFrame, GpuInit, SurfaceErrorAction};

/// wgpu instance plus the surface derived from a window.
///
/// This is the negotiation half of the GPU layer; [`Gpu::new`] drives it and
/// then takes ownership of its objects.
pub struct WgpuBackend<'w> {
    instance: wgpu::Instance,

    /// Surface lifetime is tied to the window via `'w`.
    surface: wgpu::Surface<'w>,
}

impl<'w> WgpuBackend<'w> {
    pub fn new(window: &'w Window) -> Result<Self, GpuError> {
        // All backends; wgpu picks the platform default.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        Ok(Self { instance, surface })
    }
}

impl GpuBackend for WgpuBackend<'_> {
    type Adapter = wgpu::Adapter;
    type Device = (wgpu::Device, wgpu::Queue);

    async fn request_adapter(&mut self, init: &GpuInit) -> Result<wgpu::Adapter, GpuError> {
        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&self.surface),
                force_fallback_adapter: init.force_fallback_adapter,
            })
            .await
            .map_err(|e| GpuError::AdapterUnavailable(e.to_string()))?;

        let info = adapter.get_info();
        log::info!("adapter: \"{}\" ({:?}, {:?})", info.name, info.backend, info.device_type);

        Ok(adapter)
    }

    async fn request_device(
        &mut self,
        adapter: &wgpu::Adapter,
        init: &GpuInit,
    ) -> Result<(wgpu::Device, wgpu::Queue), GpuError> {
        let pair = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(init.device_label),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| GpuError::DeviceUnavailable(e.to_string()))?;

        log::debug!("device and queue created");
        Ok(pair)
    }

    fn surface_caps(&self, adapter: &wgpu::Adapter) -> SurfaceCaps {
        self.surface.get_capabilities(adapter).into()
    }
}

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
///
/// Fields are declared in release order.
pub struct Gpu<'w> {
    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    queue: wgpu::Queue,
    device: wgpu::Device,
    _adapter: wgpu::Adapter,

    /// Surface bound to the window.
    surface: wgpu::Surface<'w>,

    // Held so it is released last.
    _instance: wgpu::Instance,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers block on
    /// the returned future.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, GpuError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(GpuError::ZeroSize);
        }

        let mut backend = WgpuBackend::new(window)?;
        let Negotiated {
            adapter,
            device: (device, queue),
            choice,
        } = negotiate(&mut backend, &init).await?;

        let config = surface::surface_config(choice, size, init.desired_maximum_frame_latency);
        backend.surface.configure(&device, &config);

        let WgpuBackend { instance, surface } = backend;

        Ok(Self {
            config,
            size,
            queue,
            device,
            _adapter: adapter,
            surface,
            _instance: instance,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that case,
    /// only internal state is updated and configuration is deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        log::debug!("surface reconfigured to {}x{}", new_size.width, new_size.height);
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    ///
    /// Consumes the frame; the command buffer, view and texture are released here.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    ///
    /// `Lost`/`Outdated` surfaces are reconfigured at the current size; the frame
    /// that hit the error is still skipped.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::from_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::debug!("surface {err:?}; reconfiguring");
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(&self.device, &self.config);
                }
            }
            SurfaceErrorAction::SkipFrame => log::debug!("surface {err:?}; skipping frame"),
            SurfaceErrorAction::Fatal => log::error!("surface {err:?}"),
        }
        action
    }
}
