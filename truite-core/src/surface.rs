//! The drawing contract a host provides to the scene

use nalgebra::Point2;

use crate::color::Color;

/// A 2D render target with a fixed size for the whole session.
///
/// Coordinates are screen-space floats with the origin in the top-left
/// corner. Implementations decide how to rasterize; the scene only issues
/// draw calls and presents once per frame.
pub trait RenderSurface {
    type Error;

    fn clear(&mut self, color: Color);

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color);

    fn draw_polygon(&mut self, points: &[Point2<f32>], color: Color);

    fn draw_circle(&mut self, center: Point2<f32>, radius: f32, color: Color);

    /// Make everything drawn since the last [`clear`](Self::clear) visible.
    fn present(&mut self) -> Result<(), Self::Error>;
}
