/// Initialization parameters for the GPU layer.
///
/// Surface format, alpha mode and present mode are not configured here; they are
/// picked from the surface capabilities by [`SurfaceChoice`](super::SurfaceChoice).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Restrict adapter selection to the software fallback adapter.
    pub force_fallback_adapter: bool,

    /// Debug label attached to the logical device.
    pub device_label: &'static str,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            device_label: "trigon device",
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
