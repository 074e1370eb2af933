//! Game orchestrator
//!
//! Owns the simulation state and the injected collaborators (score store,
//! sound player, frame scheduler), runs the phase state machine and pushes
//! `GameEvent`s to UI listeners. Everything happens on one logical thread:
//! the host calls in between frames and during `frame`.

use glam::Vec2;

use crate::audio::SoundPlayer;
use crate::consts::{MAX_FRAME_DT, START_LIVES};
use crate::records::ScoreStore;
use crate::renderer::{Canvas, draw_scene};
use crate::scheduler::{FrameScheduler, TickHandle};
use crate::sim::kinematics::clamp;
use crate::sim::{self, GameEvent, GamePhase, GameState, Session, SoundCue};

type Listener = Box<dyn FnMut(&GameEvent)>;

/// One game instance: state machine, frame loop and listeners
pub struct Game<S: ScoreStore, A: SoundPlayer, F: FrameScheduler> {
    state: GameState,
    storage: S,
    audio: A,
    scheduler: F,
    listeners: Vec<Listener>,
    /// Next frame already asked for; never more than one
    pending_frame: Option<TickHandle>,
    /// Timestamp (ms) of the previous Playing frame
    last_frame: Option<f64>,
}

impl<S: ScoreStore, A: SoundPlayer, F: FrameScheduler> Game<S, A, F> {
    pub fn new(seed: u64, width: f32, height: f32, storage: S, audio: A, scheduler: F) -> Self {
        Self {
            state: GameState::new(seed, width, height),
            storage,
            audio,
            scheduler,
            listeners: Vec::new(),
            pending_frame: None,
            last_frame: None,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn high_score(&self) -> u32 {
        self.storage.high_score()
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.state.particles_enabled = enabled;
    }

    /// Play a cue on behalf of the UI (button presses)
    pub fn play_cue(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }

    /// Register a listener. Listeners run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Screen size changed (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.state.width = width;
        self.state.height = height;
    }

    // === Phase transitions ===

    /// Begin a fresh run from any phase
    pub fn start(&mut self) {
        self.cancel_frame();
        self.state.reset();
        self.state.phase = GamePhase::Playing;
        self.last_frame = None;
        self.audio.start_music();

        self.emit(GameEvent::ScoreChanged(0));
        self.emit(GameEvent::ComboChanged(0));
        self.emit(GameEvent::LivesChanged(START_LIVES));
        self.emit(GameEvent::StateChanged(GamePhase::Playing));
        self.request_frame();

        log::info!("Run started (best {})", self.storage.high_score());
    }

    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("pause() ignored in {:?}", self.state.phase);
            return;
        }
        self.state.phase = GamePhase::Paused;
        self.state.slicer.end_slice();
        self.cancel_frame();
        self.audio.stop_music();
        self.emit(GameEvent::StateChanged(GamePhase::Paused));
        log::info!("Paused");
    }

    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused {
            log::debug!("resume() ignored in {:?}", self.state.phase);
            return;
        }
        self.state.phase = GamePhase::Playing;
        self.last_frame = None;
        self.audio.start_music();
        self.emit(GameEvent::StateChanged(GamePhase::Playing));
        self.request_frame();
        log::info!("Resumed");
    }

    /// Tear down: no more frames, no music, no listeners
    pub fn destroy(&mut self) {
        self.cancel_frame();
        self.audio.stop_music();
        self.state.pending_spawns.clear();
        self.state.slicer.reset();
        self.state.phase = GamePhase::Menu;
        self.listeners.clear();
        log::info!("Game destroyed");
    }

    // === Input ===

    pub fn pointer_down(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        if self.state.phase != GamePhase::Playing {
            log::debug!("pointer_down ignored in {:?}", self.state.phase);
            return;
        }
        self.state
            .slicer
            .start_slice(Vec2::new(x, y), timestamp_ms / 1000.0);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        self.state
            .slicer
            .move_slice(Vec2::new(x, y), timestamp_ms / 1000.0);
    }

    pub fn pointer_up(&mut self) {
        self.state.slicer.end_slice();
    }

    // === Frame loop ===

    /// Run one frame at host time `timestamp_ms`. Called by the scheduler.
    pub fn frame(&mut self, timestamp_ms: f64) {
        // A direct call may overtake a queued request
        self.cancel_frame();
        if self.state.phase != GamePhase::Playing {
            log::debug!("Frame ignored in {:?}", self.state.phase);
            return;
        }

        let dt = match self.last_frame {
            Some(last) => clamp(((timestamp_ms - last) / 1000.0) as f32, 0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_frame = Some(timestamp_ms);
        self.state.now = timestamp_ms / 1000.0;

        let out = sim::tick(&mut self.state, dt);
        for cue in &out.cues {
            self.audio.play(*cue);
        }
        for event in &out.events {
            self.emit(*event);
        }

        if out.game_over {
            self.finish_run();
        } else {
            self.request_frame();
        }
    }

    /// Paint the current state
    pub fn render(&self, canvas: &mut impl Canvas) {
        draw_scene(canvas, &self.state);
    }

    /// Lives ran out: record the run and notify
    fn finish_run(&mut self) {
        self.cancel_frame();
        self.state.slicer.end_slice();
        self.audio.stop_music();
        self.audio.play(SoundCue::GameOver);

        let final_score = self.state.session.score;
        let is_new_record = self.storage.submit_score(final_score);
        self.storage.increment_games_played();
        self.storage.add_slices(self.state.session.slices);

        self.emit(GameEvent::StateChanged(GamePhase::GameOver));
        self.emit(GameEvent::GameOver {
            final_score,
            is_new_record,
        });

        log::info!(
            "Game over: score {}, {} slices{}",
            final_score,
            self.state.session.slices,
            if is_new_record { " (new record)" } else { "" }
        );
    }

    fn request_frame(&mut self) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(self.scheduler.request_tick());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_tick(handle);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
