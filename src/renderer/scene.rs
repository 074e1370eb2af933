//! Scene painter: turns a `GameState` into canvas calls, back to front

use super::canvas::{Canvas, HalfClip, Side};
use crate::consts::TRAIL_MAX_AGE;
use crate::sim::kinematics::perpendicular;
use crate::sim::{Dish, GameState, Particle, TrailPoint};

const BACKGROUND_TOP: &str = "#1a1a2e";
const BACKGROUND_BOTTOM: &str = "#16213e";
const TRAIL_COLOR: &str = "#ffffff";
/// Width of the freshest trail segment (pixels)
const TRAIL_WIDTH: f32 = 8.0;

/// Paint one frame: background, dishes, particles, then the blade trail
pub fn draw_scene(canvas: &mut impl Canvas, state: &GameState) {
    canvas.clear(state.width, state.height);
    canvas.fill_gradient(state.width, state.height, BACKGROUND_TOP, BACKGROUND_BOTTOM);

    for dish in &state.dishes {
        draw_dish(canvas, dish);
    }
    for particle in state.particles.particles() {
        draw_particle(canvas, particle);
    }
    draw_trail(canvas, state.slicer.trail(), state.now);
}

fn draw_dish(canvas: &mut impl Canvas, dish: &Dish) {
    let glyph = dish.kind.glyph();
    match dish.cut() {
        None => canvas.draw_glyph(glyph, dish.pos, dish.size, dish.rotation, 1.0, None),
        Some(cut) => {
            let apart = perpendicular(cut.angle) * cut.offset;
            let alpha = dish.alpha.clamp(0.0, 1.0);
            for side in [Side::Positive, Side::Negative] {
                canvas.draw_glyph(
                    glyph,
                    dish.pos + apart * side.sign(),
                    dish.size,
                    dish.rotation,
                    alpha,
                    Some(HalfClip {
                        angle: cut.angle,
                        side,
                    }),
                );
            }
        }
    }
}

fn draw_particle(canvas: &mut impl Canvas, particle: &Particle) {
    canvas.fill_square(
        particle.pos,
        particle.size,
        particle.rotation,
        particle.color,
        particle.life.clamp(0.0, 1.0),
    );
}

/// Tapered polyline: thin and old at the tail, thick at the blade
fn draw_trail(canvas: &mut impl Canvas, trail: &[TrailPoint], now: f64) {
    if trail.len() < 2 {
        return;
    }
    let last = (trail.len() - 1) as f32;
    for (i, pair) in trail.windows(2).enumerate() {
        let age = (now - pair[1].time).max(0.0);
        let alpha = (1.0 - age / TRAIL_MAX_AGE).clamp(0.0, 1.0) as f32;
        if alpha <= 0.0 {
            continue;
        }
        let taper = (i + 1) as f32 / last;
        canvas.stroke_line(
            pair[0].pos,
            pair[1].pos,
            TRAIL_WIDTH * taper,
            TRAIL_COLOR,
            alpha,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DishKind;
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Gradient,
        Glyph {
            pos: Vec2,
            alpha: f32,
            clip: Option<HalfClip>,
        },
        Square {
            alpha: f32,
        },
        Line {
            width: f32,
            alpha: f32,
        },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<Call>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.calls.push(Call::Clear);
        }

        fn fill_gradient(&mut self, _width: f32, _height: f32, _top: &str, _bottom: &str) {
            self.calls.push(Call::Gradient);
        }

        fn draw_glyph(
            &mut self,
            _glyph: &str,
            pos: Vec2,
            _size: f32,
            _rotation: f32,
            alpha: f32,
            clip: Option<HalfClip>,
        ) {
            self.calls.push(Call::Glyph { pos, alpha, clip });
        }

        fn fill_square(&mut self, _c: Vec2, _s: f32, _r: f32, _color: &str, alpha: f32) {
            self.calls.push(Call::Square { alpha });
        }

        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, width: f32, _color: &str, alpha: f32) {
            self.calls.push(Call::Line { width, alpha });
        }
    }

    fn scene() -> GameState {
        let mut state = GameState::new(3, 800.0, 600.0);
        let dish = Dish::new(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            Some(DishKind::Pizza),
            &mut state.rng,
        );
        state.dishes.push(dish);
        state
    }

    #[test]
    fn test_draw_order_back_to_front() {
        let mut state = scene();
        let pos = state.dishes[0].pos;
        state.particles.emit(pos, "#fff", 2, &mut state.rng);
        state.now = 1.0;
        state.slicer.start_slice(Vec2::new(0.0, 0.0), 0.95);
        state.slicer.move_slice(Vec2::new(10.0, 0.0), 0.97);
        state.slicer.move_slice(Vec2::new(20.0, 0.0), 1.0);

        let mut canvas = RecordingCanvas::default();
        draw_scene(&mut canvas, &state);

        let kinds: Vec<&str> = canvas
            .calls
            .iter()
            .map(|c| match c {
                Call::Clear => "clear",
                Call::Gradient => "gradient",
                Call::Glyph { .. } => "glyph",
                Call::Square { .. } => "square",
                Call::Line { .. } => "line",
            })
            .collect();
        assert_eq!(
            kinds,
            ["clear", "gradient", "glyph", "square", "square", "line", "line"]
        );
    }

    #[test]
    fn test_sliced_dish_draws_two_clipped_halves() {
        let mut state = scene();
        state.dishes[0].slice(0.0);
        state.dishes[0].update(0.1, 0.0);
        let dish = &state.dishes[0];
        let offset = dish.cut().map(|c| c.offset).unwrap();
        assert!(offset > 0.0);

        let mut canvas = RecordingCanvas::default();
        draw_scene(&mut canvas, &state);

        let halves: Vec<_> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Glyph { pos, alpha, clip } => Some((*pos, *alpha, *clip)),
                _ => None,
            })
            .collect();
        assert_eq!(halves.len(), 2);
        // Cut along +x: halves separate vertically
        assert!((halves[0].0 - (dish.pos + Vec2::new(0.0, offset))).length() < 1e-4);
        assert!((halves[1].0 - (dish.pos - Vec2::new(0.0, offset))).length() < 1e-4);
        assert_eq!(halves[0].2.map(|c| c.side), Some(Side::Positive));
        assert_eq!(halves[1].2.map(|c| c.side), Some(Side::Negative));
        assert!(halves[0].1 < 1.0);
    }

    #[test]
    fn test_trail_tapers_and_fades() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.slicer.start_slice(Vec2::new(0.0, 0.0), 0.90);
        state.slicer.move_slice(Vec2::new(5.0, 0.0), 0.95);
        state.slicer.move_slice(Vec2::new(10.0, 0.0), 1.0);
        state.now = 1.0;

        let mut canvas = RecordingCanvas::default();
        draw_scene(&mut canvas, &state);

        let lines: Vec<(f32, f32)> = canvas
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Line { width, alpha } => Some((*width, *alpha)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].0 < lines[1].0);
        assert!(lines[0].1 < lines[1].1);
        assert_eq!(lines[1], (TRAIL_WIDTH, 1.0));
    }
}
