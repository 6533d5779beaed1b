//! WebGPU rendering module
//!
//! Draws a `sim::Frame` as textured quads in screen-pixel space.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
