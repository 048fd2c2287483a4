//! A running game session
//!
//! Ties the simulation to its collaborators: pending input from the host,
//! frame timing, the renderer, and the stored best score.

use crate::persistence::{BestScore, KvStore};
use crate::platform::{Action, FrameClock};
use crate::renderer::{FrameView, Renderer};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

pub struct Session<S: KvStore> {
    pub state: GameState,
    best: BestScore,
    store: S,
    clock: FrameClock,
    pending: TickInput,
    last_phase: GamePhase,
}

impl<S: KvStore> Session<S> {
    /// Start in the menu, reading the best score from `store`
    pub fn new(seed: u64, store: S) -> Self {
        let state = GameState::new(seed);
        let last_phase = state.phase;
        Self {
            state,
            best: BestScore::load(&store),
            store,
            clock: FrameClock::new(),
            pending: TickInput::default(),
            last_phase,
        }
    }

    /// Queue an input for the next frame
    pub fn handle_action(&mut self, action: Action) {
        action.apply_to(&mut self.pending);
        if action == Action::ToggleIdle {
            log::info!("Idle mode: {}", self.pending.idle_mode);
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.pending.idle_mode = idle;
    }

    pub fn idle_mode(&self) -> bool {
        self.pending.idle_mode
    }

    /// Run one display frame: draw the current state, then advance it by the
    /// time elapsed since the previous frame.
    pub fn frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) -> &[GameEvent] {
        renderer.draw(&self.view());
        let dt = self.clock.advance(now_ms);
        self.step(dt)
    }

    /// Advance the simulation by `dt_ms` with the pending input
    pub fn step(&mut self, dt_ms: f32) -> &[GameEvent] {
        tick(&mut self.state, &self.pending, dt_ms);
        self.pending.clear_one_shots();

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!(
                "Phase {} -> {}",
                self.last_phase.as_str(),
                phase.as_str()
            );
            match phase {
                GamePhase::GameOver => {
                    self.best.record(self.state.score, &mut self.store);
                }
                GamePhase::Playing => self.clock.reset(),
                GamePhase::Menu => {}
            }
            self.last_phase = phase;
        }

        &self.state.events
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            bird: &self.state.bird,
            pipes: &self.state.pipes,
            score: self.state.score,
            best: self.best.value(),
            phase: self.state.phase,
            paused: self.state.paused,
            idle: self.pending.idle_mode,
            fps: self.clock.fps(),
        }
    }

    pub fn best(&self) -> u32 {
        self.best.value()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
