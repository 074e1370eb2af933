//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Time only enters through `dt` and the host clock stored in `GameState::now`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod dish;
pub mod kinematics;
pub mod particles;
pub mod slicer;
pub mod state;
pub mod tick;

pub use dish::{Cut, Dish, DishKind};
pub use particles::{Particle, ParticleSystem};
pub use slicer::{Slicer, TrailPoint};
pub use state::{
    GameEvent, GamePhase, GameState, Session, SoundCue, difficulty_for_score, spawn_interval_for,
};
pub use tick::{TickOutput, award_slice, tick};
