//! Dish Slash - swipe to slice flying dishes
//!
//! Core modules:
//! - `sim`: Seeded simulation (dish physics, slicer gestures, particles, tick)
//! - `game`: Orchestrator tying phases, collaborators and listeners to the sim
//! - `renderer`: Canvas drawing contract and scene painter
//! - `platform`: Browser frame scheduler and LocalStorage helpers
//! - `audio`, `records`, `settings`, `i18n`: injected collaborators

pub mod audio;
pub mod game;
pub mod i18n;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use records::{Records, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame step accepted (avoids huge jumps after tab backgrounding)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Dish gravity (pixels/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Particle gravity (pixels/s²)
    pub const PARTICLE_GRAVITY: f32 = 800.0;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;
    /// Delay before the first dish of a run (seconds)
    pub const FIRST_SPAWN_DELAY: f32 = 1.0;

    /// Dish visual size range (pixels)
    pub const DISH_MIN_SIZE: f32 = 60.0;
    pub const DISH_MAX_SIZE: f32 = 90.0;
    /// Dish spin range (radians/s, symmetric)
    pub const DISH_MAX_SPIN: f32 = 5.0;
    /// Launch speed range (pixels/s)
    pub const LAUNCH_MIN_SPEED: f32 = 700.0;
    pub const LAUNCH_MAX_SPEED: f32 = 1000.0;
    /// Horizontal jitter on the launch target and on vx
    pub const LAUNCH_JITTER: f32 = 100.0;
    /// Launch apex height as a fraction of the screen
    pub const LAUNCH_RISE: f32 = 0.7;
    /// How far below the bottom edge dishes appear
    pub const SPAWN_BELOW: f32 = 50.0;

    /// Perpendicular push applied to each half on slice (pixels/s)
    pub const SLICE_IMPULSE: f32 = 150.0;
    /// Upward pop applied to both halves on slice (pixels/s)
    pub const SLICE_POP: f32 = 100.0;
    /// Half separation speed (pixels/s)
    pub const SLICE_SEPARATION_SPEED: f32 = 200.0;
    /// Sliced dish fade rate (alpha/s)
    pub const SLICE_FADE_RATE: f32 = 0.5;

    /// Trail samples older than this are pruned (seconds)
    pub const TRAIL_MAX_AGE: f64 = 0.15;
    /// Window used for swipe speed (seconds)
    pub const SPEED_WINDOW: f64 = 0.05;
    /// Window used for collision points (seconds)
    pub const COLLISION_WINDOW: f64 = 0.03;
    /// Minimum swipe speed that cuts (pixels/s)
    pub const MIN_SLICE_SPEED: f32 = 300.0;
    /// Samples considered for the swipe direction
    pub const DIRECTION_SAMPLES: usize = 5;

    /// Particle burst per slice
    pub const SLICE_PARTICLES: usize = 12;

    /// Combo window after each slice (seconds)
    pub const COMBO_TIMEOUT: f32 = 0.8;
    /// Score needed per difficulty step
    pub const SCORE_PER_DIFFICULTY: f32 = 500.0;
    /// Spawn interval at difficulty 0 and its floor (seconds)
    pub const BASE_SPAWN_INTERVAL: f32 = 1.5;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.4;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    /// Random spread applied when re-arming the spawn timer (seconds)
    pub const SPAWN_JITTER: f32 = 0.3;
    /// Difficulty above which burst spawns can happen
    pub const BURST_DIFFICULTY: f32 = 2.0;
    /// Chance of a burst spawn when the timer fires
    pub const BURST_CHANCE: f32 = 0.3;
    /// Delay of the extra burst spawn (seconds)
    pub const BURST_DELAY: f64 = 0.2;
}
