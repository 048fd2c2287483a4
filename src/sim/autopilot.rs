//! Idle/demo mode controller
//!
//! Plays the game by flapping whenever the bird has dropped below a target
//! height inside the next gap and is still falling.

use rand::Rng;

use super::state::{GamePhase, GameState, Pipe};
use super::tick::TickInput;
use crate::consts::{PIPE_GAP, WORLD_HEIGHT};

/// How far below the gap center the bird is allowed to sink before flapping.
/// A flap rises roughly 75 units, so this keeps the whole arc inside the gap.
const TARGET_BELOW_CENTER: f32 = PIPE_GAP * 0.2;

/// The pipe the bird has to get through next
pub fn next_pipe(state: &GameState<impl Rng>) -> Option<&Pipe> {
    let bird_left = state.bird.x - state.bird.radius;
    state.pipes.iter().find(|p| p.right_edge() > bird_left)
}

/// Height the autopilot tries to stay above
pub fn target_height(state: &GameState<impl Rng>) -> f32 {
    match next_pipe(state) {
        Some(pipe) => pipe.gap_y + TARGET_BELOW_CENTER,
        None => WORLD_HEIGHT / 2.0,
    }
}

/// Fill in the input for this tick
pub fn drive(state: &GameState<impl Rng>, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => input.activate = true,
        GamePhase::GameOver => input.restart = true,
        GamePhase::Playing => {
            if state.paused {
                return;
            }
            let bird = &state.bird;
            if bird.y > target_height(state) && bird.vy > 0.0 {
                input.activate = true;
            }
        }
    }
}
