//! Core frame-loop contracts.
//!
//! This module sits between the runtime (platform loop) and the GPU layer. The
//! loop logic only talks to a [`FrameTarget`], so it runs unchanged against the
//! wgpu [`Presenter`] or a test double.

mod control;
mod frame_loop;
mod target;

pub use control::{FrameOutcome, FrameStats, LoopControl, LoopEvent};
pub use frame_loop::FrameLoop;
pub use target::{FrameTarget, Presenter};
