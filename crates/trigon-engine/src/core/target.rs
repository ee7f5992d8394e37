use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::render::TriangleRenderer;

/// Surface-side operations the frame loop drives once per frame.
///
/// `Frame` bundles the per-frame objects (acquired image, view, encoder).
/// [`present`](Self::present) consumes it, so nothing outlives one frame.
pub trait FrameTarget {
    type Frame;

    /// Size the surface is currently configured for.
    fn size(&self) -> PhysicalSize<u32>;

    /// Reconfigures the surface. Only called with positive dimensions.
    fn reconfigure(&mut self, size: PhysicalSize<u32>);

    /// Acquires the next surface image.
    fn acquire(&mut self) -> Result<Self::Frame, SurfaceErrorAction>;

    /// Records the frame's draw commands.
    fn render(&mut self, frame: &mut Self::Frame);

    /// Called after rendering, right before [`present`](Self::present).
    ///
    /// Only runs for frames that were acquired and will be presented.
    fn pre_present(&mut self) {}

    /// Submits and presents, releasing every per-frame object.
    fn present(&mut self, frame: Self::Frame);
}

/// The wgpu frame target: a GPU context plus the triangle renderer.
pub struct Presenter<'w> {
    // Declared first so the pipeline is released before the device.
    triangle: TriangleRenderer,
    gpu: Gpu<'w>,
    window: &'w Window,
}

impl<'w> Presenter<'w> {
    pub fn new(window: &'w Window, gpu: Gpu<'w>) -> Self {
        let triangle = TriangleRenderer::new(gpu.device(), gpu.surface_format());
        Self {
            triangle,
            gpu,
            window,
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }
}

impl FrameTarget for Presenter<'_> {
    type Frame = GpuFrame;

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn reconfigure(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    fn acquire(&mut self) -> Result<GpuFrame, SurfaceErrorAction> {
        match self.gpu.begin_frame() {
            Ok(frame) => {
                if frame.is_suboptimal() {
                    log::trace!("suboptimal surface texture");
                }
                Ok(frame)
            }
            Err(err) => Err(self.gpu.handle_surface_error(err)),
        }
    }

    fn render(&mut self, frame: &mut GpuFrame) {
        self.triangle.record(&mut frame.encoder, &frame.view);
    }

    fn pre_present(&mut self) {
        // Must not run for skipped frames: on Wayland it arms a frame
        // callback that only a surface commit can satisfy.
        self.window.pre_present_notify();
    }

    fn present(&mut self, frame: GpuFrame) {
        self.gpu.submit(frame);
    }
}
