//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the `dt_ms` passed to `tick`
//! - Randomness only through the state's injected RNG
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::{Rect, bird_box, bird_hits_pipe, first_collision, pipe_segments};
pub use physics::{BirdStep, step_bird};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, apply_input, tick};
