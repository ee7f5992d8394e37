/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames. `Gpu::submit` consumes it,
/// so the view, encoder and texture are all released before the next frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Whether the acquired texture no longer matches the surface optimally.
    ///
    /// Suboptimal frames are still drawn and presented.
    #[inline]
    pub fn is_suboptimal(&self) -> bool {
        self.surface_texture.suboptimal
    }
}
