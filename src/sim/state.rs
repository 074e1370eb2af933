//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dish::Dish;
use super::particles::ParticleSystem;
use super::slicer::Slicer;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended (lives reached zero)
    GameOver,
}

/// Sound cues the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Slice,
    Combo,
    Miss,
    GameOver,
    Button,
}

/// Notifications pushed to UI listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    ComboChanged(u32),
    LivesChanged(u32),
    StateChanged(GamePhase),
    GameOver { final_score: u32, is_new_record: bool },
}

/// Per-run scalars, reset on every start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub combo: u32,
    /// Seconds left before the combo expires
    pub combo_timer: f32,
    pub lives: u32,
    /// Seconds until the next regular spawn
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    pub difficulty: f32,
    /// Dishes sliced this run
    pub slices: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            lives: START_LIVES,
            spawn_timer: FIRST_SPAWN_DELAY,
            spawn_interval: BASE_SPAWN_INTERVAL,
            difficulty: 1.0,
            slices: 0,
        }
    }
}

/// Difficulty grows by one every `SCORE_PER_DIFFICULTY` points
pub fn difficulty_for_score(score: u32) -> f32 {
    1.0 + score as f32 / SCORE_PER_DIFFICULTY
}

/// Seconds between regular spawns, shrinking with difficulty down to a floor
pub fn spawn_interval_for(difficulty: f32) -> f32 {
    (BASE_SPAWN_INTERVAL - difficulty * SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL)
}

/// Everything the tick mutates. Owned by a single `Game`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub session: Session,
    /// Active dishes, in spawn order
    pub dishes: Vec<Dish>,
    pub slicer: Slicer,
    pub particles: ParticleSystem,
    /// Session-clock deadlines of delayed burst spawns
    pub pending_spawns: Vec<f64>,
    /// Seconds of simulated play this run
    pub clock: f64,
    /// Host clock of the latest frame (seconds); slicer samples use it too
    pub now: f64,
    pub width: f32,
    pub height: f32,
    /// Whether slices emit particle bursts
    pub particles_enabled: bool,
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            phase: GamePhase::Menu,
            session: Session::new(),
            dishes: Vec::new(),
            slicer: Slicer::new(),
            particles: ParticleSystem::new(),
            pending_spawns: Vec::new(),
            clock: 0.0,
            now: 0.0,
            width,
            height,
            particles_enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Back to a fresh run: new session, empty world, no deferred spawns
    pub fn reset(&mut self) {
        self.session = Session::new();
        self.dishes.clear();
        self.slicer.reset();
        self.particles.clear();
        self.pending_spawns.clear();
        self.clock = 0.0;
    }

    /// Launch one dish with the current screen size
    pub fn spawn_dish(&mut self) {
        let dish = Dish::spawn(self.width, self.height, &mut self.rng);
        self.dishes.push(dish);
    }
}
