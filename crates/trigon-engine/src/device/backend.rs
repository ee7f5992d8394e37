use std::future::Future;

use super::{GpuError, GpuInit, SurfaceCaps, SurfaceChoice};

/// Adapter/device negotiation against a graphics backend.
///
/// The wgpu implementation is [`WgpuBackend`](super::WgpuBackend). Requests are
/// single-shot futures; callers drive them to completion immediately (see
/// [`negotiate`]), nothing overlaps with them.
pub trait GpuBackend {
    type Adapter;
    type Device;

    /// Requests an adapter compatible with the backend's surface.
    fn request_adapter(
        &mut self,
        init: &GpuInit,
    ) -> impl Future<Output = Result<Self::Adapter, GpuError>>;

    /// Requests a logical device (and its queue) from `adapter`.
    fn request_device(
        &mut self,
        adapter: &Self::Adapter,
        init: &GpuInit,
    ) -> impl Future<Output = Result<Self::Device, GpuError>>;

    /// Queries the surface capability lists for `adapter`.
    fn surface_caps(&self, adapter: &Self::Adapter) -> SurfaceCaps;
}

/// Result of a successful negotiation.
pub struct Negotiated<B: GpuBackend> {
    pub adapter: B::Adapter,
    pub device: B::Device,
    pub choice: SurfaceChoice,
}

/// Acquires adapter, then device, then picks the surface configuration.
///
/// Stops at the first failure: when no adapter is found the device is never
/// requested.
pub async fn negotiate<B: GpuBackend>(
    backend: &mut B,
    init: &GpuInit,
) -> Result<Negotiated<B>, GpuError> {
    let adapter = backend.request_adapter(init).await?;
    let device = backend.request_device(&adapter, init).await?;

    let caps = backend.surface_caps(&adapter);
    let choice = SurfaceChoice::from_caps(&caps);
    log::info!(
        "surface: format={:?} alpha={:?} present={:?}",
        choice.format,
        choice.alpha_mode,
        choice.present_mode
    );

    Ok(Negotiated {
        adapter,
        device,
        choice,
    })
}
