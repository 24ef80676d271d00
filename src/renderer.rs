/// RGBA raster with a transform stack.
pub mod canvas;
/// Base image, skewed text columns and overlay, in that order.
pub mod compositor;

pub use canvas::{Canvas, CanvasScope};
pub use compositor::{Frame, TextStyle, compose, draw_attempt};
