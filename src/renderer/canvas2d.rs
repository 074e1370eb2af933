//! `CanvasRenderingContext2d` backend

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::canvas::{Canvas, HalfClip, Side};

/// Browser 2D canvas
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Map CSS pixels onto a canvas backed at `dpr` device pixels each
    pub fn set_pixel_ratio(&self, dpr: f64) {
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Transforms applied inside `save`/`restore`, failures only skip the draw
    fn placed(&self, pos: Vec2, rotation: f32) -> Result<(), JsValue> {
        self.ctx.translate(pos.x as f64, pos.y as f64)?;
        self.ctx.rotate(rotation as f64)
    }

    fn glyph(
        &self,
        glyph: &str,
        pos: Vec2,
        size: f32,
        rotation: f32,
        clip: Option<HalfClip>,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match clip {
            None => self.placed(pos, rotation)?,
            Some(clip) => {
                // Rotate so the cut runs along +x; the positive half is +y
                self.placed(pos, clip.angle)?;
                let s = size as f64;
                let y = match clip.side {
                    Side::Positive => 0.0,
                    Side::Negative => -s,
                };
                ctx.begin_path();
                ctx.rect(-s, y, 2.0 * s, s);
                ctx.clip();
                ctx.rotate((rotation - clip.angle) as f64)?;
            }
        }
        ctx.set_font(&format!("{}px serif", size.round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(glyph, 0.0, 0.0)
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx
            .clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_gradient(&mut self, width: f32, height: f32, top: &str, bottom: &str) {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height as f64);
        let _ = gradient.add_color_stop(0.0, top);
        let _ = gradient.add_color_stop(1.0, bottom);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_glyph(
        &mut self,
        glyph: &str,
        pos: Vec2,
        size: f32,
        rotation: f32,
        alpha: f32,
        clip: Option<HalfClip>,
    ) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        if let Err(e) = self.glyph(glyph, pos, size, rotation, clip) {
            log::debug!("Glyph draw skipped: {:?}", e);
        }
        self.ctx.restore();
    }

    fn fill_square(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        if self.placed(center, rotation).is_ok() {
            let half = size as f64 / 2.0;
            self.ctx.fill_rect(-half, -half, size as f64, size as f64);
        }
        self.ctx.restore();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, alpha: f32) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width as f64);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        ctx.restore();
    }
}
