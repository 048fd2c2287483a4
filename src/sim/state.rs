//! Game state and core simulation types
//!
//! Everything the frame step mutates lives here as plain owned fields.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::pipes;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first activate
    Menu,
    /// Active round
    Playing,
    /// Round ended, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Ground,
    Pipe,
}

/// Notable things that happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted,
    Flapped,
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    Paused,
    Resumed,
    ReturnedToMenu,
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Horizontal position (fixed during a round)
    pub x: f32,
    /// Vertical position of the center (y grows downward)
    pub y: f32,
    /// Vertical velocity in world units per reference frame
    pub vy: f32,
    pub radius: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: WORLD_HEIGHT / 2.0,
            vy: 0.0,
            radius: BIRD_RADIUS,
        }
    }
}

impl Bird {
    /// Upward impulse
    pub fn flap(&mut self) {
        self.vy = FLAP_VELOCITY;
    }

    /// Visual tilt derived from velocity. Purely cosmetic, never used for collision.
    pub fn rotation(&self) -> f32 {
        (self.vy * ROTATION_PER_VELOCITY).clamp(-MAX_ROTATION, MAX_ROTATION)
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Vertical center of the gap
    pub gap_y: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Bottom of the top segment
    pub fn gap_top(&self) -> f32 {
        self.gap_y - PIPE_GAP / 2.0
    }

    /// Top of the bottom segment
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + PIPE_GAP / 2.0
    }
}

/// Complete simulation state
///
/// Generic over the random source used for gap placement so tests can supply
/// their own; the game uses a seeded PCG.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub phase: GamePhase,
    /// Orthogonal to `phase`; only meaningful while playing
    pub paused: bool,
    pub bird: Bird,
    /// Pipes in spawn order
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Time accumulated since the last spawn
    pub spawn_timer_ms: f32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: R,
}

impl GameState<Pcg32> {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a game state in the menu using the given random source
    pub fn with_rng(rng: R) -> Self {
        Self {
            phase: GamePhase::Menu,
            paused: false,
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            spawn_timer_ms: 0.0,
            events: Vec::new(),
            rng,
        }
    }

    /// Put everything back to the start-of-round layout
    pub fn reset_round(&mut self) {
        self.bird = Bird::default();
        self.pipes.clear();
        self.score = 0;
        self.spawn_timer_ms = 0.0;
        self.paused = false;
    }

    /// Spawn one pipe at the right edge with a random gap
    pub fn spawn_pipe(&mut self) -> Pipe {
        let pipe = pipes::spawn_pipe(&mut self.pipes, &mut self.rng);
        log::debug!("Spawned pipe with gap at {:.1}", pipe.gap_y);
        pipe
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing && !self.paused
    }
}
