//! Flying dishes: launch trajectory, gravity, slicing and hit tests

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{perpendicular, polar, random_int, random_range};
use crate::consts::*;

/// Food types that can be launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishKind {
    Sushi,
    Pizza,
    Burger,
    Taco,
    Ramen,
    Dumpling,
    Cake,
    Donut,
}

impl DishKind {
    pub const ALL: [DishKind; 8] = [
        DishKind::Sushi,
        DishKind::Pizza,
        DishKind::Burger,
        DishKind::Taco,
        DishKind::Ramen,
        DishKind::Dumpling,
        DishKind::Cake,
        DishKind::Donut,
    ];

    /// Pick a kind uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let last = Self::ALL.len() as i32 - 1;
        Self::ALL[random_int(rng, 0, last) as usize]
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            DishKind::Sushi => "🍣",
            DishKind::Pizza => "🍕",
            DishKind::Burger => "🍔",
            DishKind::Taco => "🌮",
            DishKind::Ramen => "🍜",
            DishKind::Dumpling => "🥟",
            DishKind::Cake => "🍰",
            DishKind::Donut => "🍩",
        }
    }

    /// Juice color used for the slice burst
    pub fn color(&self) -> &'static str {
        match self {
            DishKind::Sushi => "#ff7f50",
            DishKind::Pizza => "#ffb347",
            DishKind::Burger => "#c8702a",
            DishKind::Taco => "#ffd23f",
            DishKind::Ramen => "#f4a460",
            DishKind::Dumpling => "#f5deb3",
            DishKind::Cake => "#ffb6c1",
            DishKind::Donut => "#ff69b4",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            DishKind::Sushi | DishKind::Pizza => 10,
            DishKind::Burger | DishKind::Taco => 15,
            DishKind::Ramen | DishKind::Dumpling => 20,
            DishKind::Cake => 25,
            DishKind::Donut => 30,
        }
    }
}

/// Cut state of a sliced dish. Only exists once the dish has been sliced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    /// Direction of the blade when it passed (radians)
    pub angle: f32,
    /// Independent velocities of the two halves
    pub half_velocities: [Vec2; 2],
    /// Visual separation of the halves (pixels)
    pub offset: f32,
}

/// A dish in flight
#[derive(Debug, Clone)]
pub struct Dish {
    pub kind: DishKind,
    pub pos: Vec2,
    /// Velocity before slicing (unused afterwards)
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub size: f32,
    /// Fade factor, decays once sliced
    pub alpha: f32,
    cut: Option<Cut>,
}

impl Dish {
    /// Create a dish with random spin and size. `kind: None` picks one at random.
    pub fn new<R: Rng + ?Sized>(pos: Vec2, vel: Vec2, kind: Option<DishKind>, rng: &mut R) -> Self {
        let kind = kind.unwrap_or_else(|| DishKind::random(rng));
        Self {
            kind,
            pos,
            vel,
            rotation: 0.0,
            rotation_speed: random_range(rng, -DISH_MAX_SPIN, DISH_MAX_SPIN),
            size: random_range(rng, DISH_MIN_SIZE, DISH_MAX_SIZE),
            alpha: 1.0,
            cut: None,
        }
    }

    /// Launch a random dish from just below the screen, aimed loosely at the center
    pub fn spawn<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let x = random_range(rng, width * 0.15, width * 0.85);
        let y = height + SPAWN_BELOW;

        let target_x = width / 2.0 + random_range(rng, -LAUNCH_JITTER, LAUNCH_JITTER);
        // Always upward; steeper for dishes spawned near the center
        let angle = (-LAUNCH_RISE * height).atan2(target_x - x);
        let speed = random_range(rng, LAUNCH_MIN_SPEED, LAUNCH_MAX_SPEED);

        let mut vel = polar(angle, speed);
        vel.x += random_range(rng, -LAUNCH_JITTER, LAUNCH_JITTER);

        Self::new(Vec2::new(x, y), vel, None, rng)
    }

    pub fn is_sliced(&self) -> bool {
        self.cut.is_some()
    }

    pub fn cut(&self) -> Option<&Cut> {
        self.cut.as_ref()
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Advance by `dt` seconds (semi-implicit Euler)
    pub fn update(&mut self, dt: f32, gravity: f32) {
        match self.cut.as_mut() {
            None => {
                self.vel.y += gravity * dt;
                self.pos += self.vel * dt;
            }
            Some(cut) => {
                for half in &mut cut.half_velocities {
                    half.y += gravity * dt;
                }
                // Single drawable position; the halves diverge through `offset`
                let mean = (cut.half_velocities[0] + cut.half_velocities[1]) * 0.5;
                self.pos += mean * dt;
                cut.offset += SLICE_SEPARATION_SPEED * dt;
                self.alpha -= SLICE_FADE_RATE * dt;
            }
        }
        self.rotation += self.rotation_speed * dt;
    }

    /// Cut the dish along `angle`. Ignored when already sliced.
    pub fn slice(&mut self, angle: f32) {
        if self.cut.is_some() {
            return;
        }
        let push = perpendicular(angle) * SLICE_IMPULSE;
        let pop = Vec2::new(0.0, -SLICE_POP);
        self.cut = Some(Cut {
            angle,
            half_velocities: [self.vel + push + pop, self.vel - push + pop],
            offset: 0.0,
        });
    }

    /// Circular hit test; sliced dishes never contain anything
    pub fn contains_point(&self, point: Vec2) -> bool {
        !self.is_sliced() && self.pos.distance(point) < self.size / 2.0
    }

    /// Below the bottom edge by more than its own size
    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height + self.size
    }

    /// Sliced and fully transparent
    pub fn is_faded(&self) -> bool {
        self.is_sliced() && self.alpha <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn dish_at(pos: Vec2, vel: Vec2) -> Dish {
        let mut rng = Pcg32::seed_from_u64(7);
        Dish::new(pos, vel, Some(DishKind::Sushi), &mut rng)
    }

    #[test]
    fn test_new_randomizes_spin_and_size() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let dish = Dish::new(Vec2::ZERO, Vec2::ZERO, None, &mut rng);
            assert!(dish.size >= DISH_MIN_SIZE && dish.size <= DISH_MAX_SIZE);
            assert!(dish.rotation_speed.abs() <= DISH_MAX_SPIN);
            assert!(!dish.is_sliced());
            assert_eq!(dish.alpha, 1.0);
        }
    }

    #[test]
    fn test_spawn_launches_upward_from_below() {
        let mut rng = Pcg32::seed_from_u64(42);
        let (w, h) = (800.0, 900.0);
        for _ in 0..200 {
            let dish = Dish::spawn(w, h, &mut rng);
            assert!(dish.pos.x >= w * 0.15 && dish.pos.x <= w * 0.85);
            assert_eq!(dish.pos.y, h + SPAWN_BELOW);
            assert!(dish.vel.y < 0.0, "dish must launch upward");
            assert!(dish.vel.y.abs() <= LAUNCH_MAX_SPEED);
        }
    }

    #[test]
    fn test_spawn_uses_every_kind() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Dish::spawn(800.0, 900.0, &mut rng).kind);
        }
        assert_eq!(seen.len(), DishKind::ALL.len());
    }

    #[test]
    fn test_contains_point_strict_radius() {
        let dish = dish_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let r = dish.size / 2.0;
        assert!(dish.contains_point(Vec2::new(100.0, 100.0)));
        assert!(dish.contains_point(Vec2::new(100.0 + r - 0.01, 100.0)));
        assert!(!dish.contains_point(Vec2::new(100.0 + r + 0.01, 100.0)));
        assert!(!dish.contains_point(Vec2::new(100.0, 100.0 + r + 5.0)));
    }

    #[test]
    fn test_sliced_dish_contains_nothing() {
        let mut dish = dish_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        dish.slice(0.0);
        assert!(!dish.contains_point(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_slice_is_permanent_and_idempotent() {
        let mut dish = dish_at(Vec2::new(0.0, 0.0), Vec2::new(50.0, -400.0));
        dish.slice(0.0);
        let first = *dish.cut().unwrap();

        dish.slice(1.2);
        assert!(dish.is_sliced());
        assert_eq!(*dish.cut().unwrap(), first);

        dish.update(1.0 / 60.0, GRAVITY);
        assert!(dish.is_sliced());
        assert_eq!(dish.cut().unwrap().angle, 0.0);
    }

    #[test]
    fn test_slice_halves_split_along_perpendicular() {
        let mut dish = dish_at(Vec2::ZERO, Vec2::new(0.0, -500.0));
        // Horizontal cut: halves pushed vertically apart, both popped up
        dish.slice(0.0);
        let [a, b] = dish.cut().unwrap().half_velocities;
        assert!((a - Vec2::new(0.0, -500.0 + SLICE_IMPULSE - SLICE_POP)).length() < 1e-3);
        assert!((b - Vec2::new(0.0, -500.0 - SLICE_IMPULSE - SLICE_POP)).length() < 1e-3);
    }

    #[test]
    fn test_sliced_update_moves_with_mean_and_fades() {
        let mut dish = dish_at(Vec2::ZERO, Vec2::new(100.0, 0.0));
        dish.slice(std::f32::consts::FRAC_PI_2);
        dish.update(0.5, 0.0);

        // Vertical cut pushes halves sideways symmetrically, mean keeps vx
        assert!((dish.pos.x - 50.0).abs() < 1e-3);
        assert!((dish.pos.y - (-SLICE_POP * 0.5)).abs() < 1e-3);
        assert!((dish.cut().unwrap().offset - SLICE_SEPARATION_SPEED * 0.5).abs() < 1e-3);
        assert!((dish.alpha - 0.75).abs() < 1e-5);
        assert!(!dish.is_faded());

        dish.update(1.5, 0.0);
        assert!(dish.is_faded());
    }

    #[test]
    fn test_unsliced_never_fades() {
        let mut dish = dish_at(Vec2::ZERO, Vec2::ZERO);
        for _ in 0..600 {
            dish.update(1.0 / 60.0, GRAVITY);
        }
        assert!(!dish.is_faded());
        assert_eq!(dish.alpha, 1.0);
    }

    #[test]
    fn test_off_screen_threshold() {
        let mut dish = dish_at(Vec2::new(0.0, 900.0), Vec2::ZERO);
        assert!(!dish.is_off_screen(900.0));
        dish.pos.y = 900.0 + dish.size + 0.5;
        assert!(dish.is_off_screen(900.0));
        dish.slice(0.0);
        assert!(dish.is_off_screen(900.0));
    }

    #[test]
    fn test_matches_closed_form_projectile() {
        let (y0, vy0, g) = (850.0_f32, -900.0_f32, 600.0_f32);
        let mut dish = dish_at(Vec2::new(500.0, y0), Vec2::new(0.0, vy0));
        let dt = 1.0 / 60.0;
        let n = 90;
        for _ in 0..n {
            dish.update(dt, g);
        }
        let t = n as f32 / 60.0;
        let expected = y0 + vy0 * t + 0.5 * g * t * t;
        // Semi-implicit Euler overshoots by g*dt*t/2
        let tolerance = 0.5 * g * dt * t + 0.1;
        assert!(
            (dish.pos.y - expected).abs() <= tolerance,
            "y = {}, expected {} ± {}",
            dish.pos.y,
            expected,
            tolerance
        );
        assert_eq!(dish.pos.x, 500.0);
    }

    #[test]
    fn test_launched_dish_is_reachable_then_falls_off() {
        // 800x900 screen
        let h = 900.0;
        let mut dish = dish_at(Vec2::new(500.0, 850.0), Vec2::new(0.0, -900.0));
        let mut peak = dish.pos.y;
        let mut steps = 0;
        while !dish.is_off_screen(h) {
            dish.update(1.0 / 60.0, 600.0);
            peak = peak.min(dish.pos.y);
            steps += 1;
            assert!(steps < 10_000, "dish never fell off screen");
        }
        assert!(peak < h - dish.size, "peak {} not reachable", peak);
    }

    proptest! {
        #[test]
        fn contains_point_matches_distance(px in -200.0f32..200.0, py in -200.0f32..200.0) {
            let dish = dish_at(Vec2::ZERO, Vec2::ZERO);
            let p = Vec2::new(px, py);
            prop_assert_eq!(dish.contains_point(p), p.length() < dish.size / 2.0);
        }
    }
}
