//! Swipe gesture tracking
//!
//! The slicer keeps a short rolling trail of pointer samples and answers
//! three questions with three different staleness windows:
//! - is the swipe currently fast enough to cut (`SPEED_WINDOW`)
//! - where did the blade just pass (`COLLISION_WINDOW`)
//! - what should the visible trail look like (`TRAIL_MAX_AGE`)

use glam::Vec2;

use crate::consts::*;

/// One pointer sample, `time` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub time: f64,
}

/// Gesture state for the player's blade
#[derive(Debug, Clone, Default)]
pub struct Slicer {
    active: bool,
    /// Oldest first, in insertion order
    trail: Vec<TrailPoint>,
}

impl Slicer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Full rolling trail, oldest first
    pub fn trail(&self) -> &[TrailPoint] {
        &self.trail
    }

    /// Pointer pressed: begin a fresh gesture
    pub fn start_slice(&mut self, pos: Vec2, now: f64) {
        self.active = true;
        self.trail.clear();
        self.trail.push(TrailPoint { pos, time: now });
    }

    /// Pointer moved; ignored unless a gesture is active
    pub fn move_slice(&mut self, pos: Vec2, now: f64) {
        if !self.active {
            return;
        }
        self.trail.push(TrailPoint { pos, time: now });
    }

    /// Pointer released. The trail stays until it ages out.
    pub fn end_slice(&mut self) {
        self.active = false;
    }

    /// Drop samples older than the trail window
    pub fn update(&mut self, now: f64) {
        self.trail.retain(|p| now - p.time <= TRAIL_MAX_AGE);
    }

    /// Clear everything (new run)
    pub fn reset(&mut self) {
        self.active = false;
        self.trail.clear();
    }

    fn younger_than(&self, now: f64, window: f64) -> impl Iterator<Item = &TrailPoint> {
        self.trail.iter().filter(move |p| now - p.time < window)
    }

    /// Swipe speed in pixels/s over the speed window
    pub fn current_speed(&self, now: f64) -> f32 {
        let mut recent = self.younger_than(now, SPEED_WINDOW);
        let Some(first) = recent.next() else {
            return 0.0;
        };
        let Some(last) = recent.last() else {
            return 0.0;
        };

        let dt = last.time - first.time;
        if dt <= 0.0 {
            return 0.0;
        }
        (first.pos.distance(last.pos) as f64 / dt) as f32
    }

    /// Active and moving fast enough to cut
    pub fn can_slice(&self, now: f64) -> bool {
        self.active && self.current_speed(now) >= MIN_SLICE_SPEED
    }

    /// Unit direction over the last few samples, straight down when unknown
    pub fn slice_direction(&self) -> Vec2 {
        let start = self.trail.len().saturating_sub(DIRECTION_SAMPLES);
        let window = &self.trail[start..];
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return Vec2::Y;
        };
        let dir = (last.pos - first.pos).normalize_or_zero();
        if dir == Vec2::ZERO { Vec2::Y } else { dir }
    }

    pub fn slice_angle(&self) -> f32 {
        let dir = self.slice_direction();
        dir.y.atan2(dir.x)
    }

    /// Positions the blade passed through within the collision window
    pub fn recent_points(&self, now: f64) -> Vec<Vec2> {
        self.younger_than(now, COLLISION_WINDOW).map(|p| p.pos).collect()
    }
}
