use winit::dpi::PhysicalSize;

/// Used when the surface reports no formats.
pub const FALLBACK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// Used when the surface reports no alpha modes.
pub const FALLBACK_ALPHA_MODE: wgpu::CompositeAlphaMode = wgpu::CompositeAlphaMode::Opaque;

/// Used when the surface reports no present modes.
pub const FALLBACK_PRESENT_MODE: wgpu::PresentMode = wgpu::PresentMode::Fifo;

/// Capability lists reported by a surface for a given adapter.
///
/// Decoupled from `wgpu::SurfaceCapabilities` so selection can be exercised
/// without a live adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceCaps {
    pub formats: Vec<wgpu::TextureFormat>,
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    pub present_modes: Vec<wgpu::PresentMode>,
}

impl From<wgpu::SurfaceCapabilities> for SurfaceCaps {
    fn from(caps: wgpu::SurfaceCapabilities) -> Self {
        Self {
            formats: caps.formats,
            alpha_modes: caps.alpha_modes,
            present_modes: caps.present_modes,
        }
    }
}

/// Format, alpha mode and present mode picked for the surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceChoice {
    pub format: wgpu::TextureFormat,
    pub alpha_mode: wgpu::CompositeAlphaMode,
    pub present_mode: wgpu::PresentMode,
}

impl SurfaceChoice {
    pub fn from_caps(caps: &SurfaceCaps) -> Self {
        Self {
            format: choose_surface_format(&caps.formats),
            alpha_mode: choose_alpha_mode(&caps.alpha_modes),
            present_mode: choose_present_mode(&caps.present_modes),
        }
    }
}

/// Prefers `Bgra8UnormSrgb`, else the first reported format.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| *f == wgpu::TextureFormat::Bgra8UnormSrgb)
        .or_else(|| formats.first().copied())
        .unwrap_or(FALLBACK_FORMAT)
}

/// Takes the first reported alpha mode.
pub fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    modes.first().copied().unwrap_or(FALLBACK_ALPHA_MODE)
}

/// Prefers vsynced FIFO, else the first reported mode.
pub fn choose_present_mode(modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if modes.contains(&wgpu::PresentMode::Fifo) {
        return wgpu::PresentMode::Fifo;
    }
    modes.first().copied().unwrap_or(FALLBACK_PRESENT_MODE)
}

/// Builds the surface configuration for `choice` at `size`.
///
/// Zero dimensions are clamped to 1; callers skip configuration for
/// zero-sized windows instead of relying on the clamp.
pub fn surface_config(
    choice: SurfaceChoice,
    size: PhysicalSize<u32>,
    desired_maximum_frame_latency: u32,
) -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: choice.format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: choice.present_mode,
        alpha_mode: choice.alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency,
    }
}
