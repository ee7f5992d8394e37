//! GPU rendering.
//!
//! One renderer: a fixed triangle drawn with a single pipeline over a cleared
//! background. Vertex positions live in the shader; there are no buffers.

mod triangle;

pub use triangle::{TriangleRenderer, CLEAR_COLOR, TRIANGLE_VERTICES};
