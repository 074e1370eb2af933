//! Canvas rendering module
//!
//! Dishes are emoji glyphs, so a plain 2D canvas is enough. `scene` decides
//! what to paint; a `Canvas` implementation decides how.

pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;

pub use canvas::{Canvas, HalfClip, Side};
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use scene::draw_scene;
