//! Per-frame simulation step
//!
//! Pure with respect to the outside world: everything the host has to react
//! to (sounds, listener notifications, end of run) comes back in a
//! `TickOutput` instead of being performed here.

use rand::Rng;

use super::kinematics::random_range;
use super::state::{
    GameEvent, GamePhase, GameState, Session, SoundCue, difficulty_for_score, spawn_interval_for,
};
use crate::consts::*;

/// Side effects requested by one tick, in the order they happened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub cues: Vec<SoundCue>,
    /// Lives ran out during this tick
    pub game_over: bool,
}

/// Advance a Playing state by `dt` seconds. Other phases are left untouched.
pub fn tick(state: &mut GameState, dt: f32) -> TickOutput {
    let mut out = TickOutput::default();
    if state.phase != GamePhase::Playing {
        return out;
    }
    state.clock += f64::from(dt);
    let now = state.now;

    // Difficulty ramp
    state.session.difficulty = difficulty_for_score(state.session.score);
    state.session.spawn_interval = spawn_interval_for(state.session.difficulty);

    update_spawning(state, dt);
    update_combo_timer(&mut state.session, dt, &mut out);

    // Stable filter: survivors keep their spawn order
    let dishes = std::mem::take(&mut state.dishes);
    let mut survivors = Vec::with_capacity(dishes.len());
    for mut dish in dishes {
        dish.update(dt, GRAVITY);
        if dish.is_off_screen(state.height) {
            if !dish.is_sliced() {
                register_miss(state, &mut out);
            }
            continue;
        }
        if dish.is_faded() {
            continue;
        }
        survivors.push(dish);
    }
    state.dishes = survivors;

    state.slicer.update(now);
    state.particles.update(dt);

    if state.phase != GamePhase::Playing {
        return out;
    }

    if state.slicer.can_slice(now) {
        resolve_slices(state, &mut out);
    }

    out
}

fn update_spawning(state: &mut GameState, dt: f32) {
    state.session.spawn_timer -= dt;
    if state.session.spawn_timer <= 0.0 {
        state.spawn_dish();
        state.session.spawn_timer =
            state.session.spawn_interval + random_range(&mut state.rng, -SPAWN_JITTER, SPAWN_JITTER);

        if state.session.difficulty > BURST_DIFFICULTY && state.rng.random::<f32>() < BURST_CHANCE {
            state.pending_spawns.push(state.clock + BURST_DELAY);
            log::debug!("Burst spawn scheduled at t={:.2}", state.clock + BURST_DELAY);
        }
    }

    let clock = state.clock;
    let due = state.pending_spawns.iter().filter(|&&at| at <= clock).count();
    if due > 0 {
        state.pending_spawns.retain(|&at| at > clock);
        for _ in 0..due {
            state.spawn_dish();
        }
    }
}

fn update_combo_timer(session: &mut Session, dt: f32, out: &mut TickOutput) {
    if session.combo == 0 {
        return;
    }
    session.combo_timer -= dt;
    if session.combo_timer <= 0.0 {
        session.combo = 0;
        session.combo_timer = 0.0;
        out.events.push(GameEvent::ComboChanged(0));
    }
}

/// An unsliced dish fell off the bottom
fn register_miss(state: &mut GameState, out: &mut TickOutput) {
    // Only the first miss that empties the lives counts
    if state.phase != GamePhase::Playing {
        return;
    }
    let session = &mut state.session;
    session.lives = session.lives.saturating_sub(1);
    if session.combo > 0 {
        session.combo = 0;
        session.combo_timer = 0.0;
        out.events.push(GameEvent::ComboChanged(0));
    }
    out.cues.push(SoundCue::Miss);
    out.events.push(GameEvent::LivesChanged(session.lives));

    if session.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.pending_spawns.clear();
        out.game_over = true;
    }
}

/// Cut every unsliced dish the blade just passed through
fn resolve_slices(state: &mut GameState, out: &mut TickOutput) {
    let points = state.slicer.recent_points(state.now);
    let angle = state.slicer.slice_angle();
    let mut sliced_this_frame = 0u32;

    for dish in state.dishes.iter_mut() {
        if dish.is_sliced() || !points.iter().any(|&p| dish.contains_point(p)) {
            continue;
        }
        dish.slice(angle);
        if state.particles_enabled {
            state
                .particles
                .emit(dish.pos, dish.kind.color(), SLICE_PARTICLES, &mut state.rng);
        }
        award_slice(&mut state.session, dish.points(), out);
        sliced_this_frame += 1;
    }

    // Multi-slice bonus
    if sliced_this_frame > 1 {
        state.session.combo = state.session.combo.saturating_add(sliced_this_frame);
        out.cues.push(SoundCue::Combo);
        out.events.push(GameEvent::ComboChanged(state.session.combo));
    }
}

/// Score one slice: the running combo multiplies it, then grows
pub fn award_slice(session: &mut Session, points: u32, out: &mut TickOutput) {
    let gained = points.saturating_mul(session.combo.max(1));
    session.score = session.score.saturating_add(gained);
    session.combo = session.combo.saturating_add(1);
    session.combo_timer = COMBO_TIMEOUT;
    session.slices += 1;

    out.cues.push(SoundCue::Slice);
    out.events.push(GameEvent::ScoreChanged(session.score));
    out.events.push(GameEvent::ComboChanged(session.combo));
}
