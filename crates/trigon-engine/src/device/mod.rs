//! GPU device + surface management.
//!
//! This module is responsible for:
//! - negotiating the wgpu Adapter/Device/Queue for a window surface
//! - choosing & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod backend;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use backend::{negotiate, GpuBackend, Negotiated};
pub use error::{GpuError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::{Gpu, WgpuBackend};
pub use init::GpuInit;
pub use surface::{
    choose_alpha_mode, choose_present_mode, choose_surface_format, surface_config, SurfaceCaps,
    SurfaceChoice, FALLBACK_ALPHA_MODE, FALLBACK_FORMAT, FALLBACK_PRESENT_MODE,
};
