//! Trigon engine crate.
//!
//! Everything needed to put one triangle on screen: window runtime, GPU
//! negotiation and surface management, the triangle pipeline, and the frame
//! loop that ties them together.

pub mod core;
pub mod device;
pub mod render;
pub mod time;
pub mod window;

pub mod logging;
