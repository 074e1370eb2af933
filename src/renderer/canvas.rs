//! Drawing contract
//!
//! The scene painter only speaks in these primitives, so any 2D surface can
//! host it: the browser canvas on wasm, a recording fake in tests.

use glam::Vec2;

/// Which half of a cut glyph to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The half on the `perpendicular(angle)` side of the cut
    Positive,
    Negative,
}

impl Side {
    pub fn sign(&self) -> f32 {
        match self {
            Side::Positive => 1.0,
            Side::Negative => -1.0,
        }
    }
}

/// Clip a glyph to one side of a line through its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfClip {
    /// Cut direction in world space (radians)
    pub angle: f32,
    pub side: Side,
}

/// 2D drawing surface
pub trait Canvas {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);

    /// Vertical linear gradient over the whole surface
    fn fill_gradient(&mut self, width: f32, height: f32, top: &str, bottom: &str);

    /// Text glyph centered on `pos`, `size` pixels tall, rotated by `rotation`
    fn draw_glyph(
        &mut self,
        glyph: &str,
        pos: Vec2,
        size: f32,
        rotation: f32,
        alpha: f32,
        clip: Option<HalfClip>,
    );

    /// Filled square centered on `center`
    fn fill_square(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, alpha: f32);

    /// Round-capped line segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, alpha: f32);
}
