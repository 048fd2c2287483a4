//! Pipe spawning, scrolling, pruning and scoring

use std::ops::RangeInclusive;

use rand::Rng;

use super::state::Pipe;
use crate::consts::*;

/// Permitted range for a pipe's gap center
pub fn gap_range() -> RangeInclusive<f32> {
    GAP_MARGIN..=GROUND_LINE - GAP_MARGIN
}

/// Uniformly random gap center within [`gap_range`]
pub fn random_gap_y<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(gap_range())
}

/// Append a new pipe just beyond the right edge of the world
pub fn spawn_pipe<R: Rng + ?Sized>(pipes: &mut Vec<Pipe>, rng: &mut R) -> Pipe {
    let pipe = Pipe::new(WORLD_WIDTH + PIPE_WIDTH, random_gap_y(rng));
    pipes.push(pipe);
    pipe
}

/// Accumulate `dt_ms` into the spawn timer. Returns true (and resets the
/// timer) when a spawn is due.
pub fn advance_spawn_timer(timer_ms: &mut f32, dt_ms: f32) -> bool {
    *timer_ms += dt_ms;
    if *timer_ms >= SPAWN_INTERVAL_MS {
        *timer_ms = 0.0;
        true
    } else {
        false
    }
}

/// Scroll every pipe left
pub fn advance_pipes(pipes: &mut [Pipe], dt_ms: f32) {
    let dx = PIPE_SPEED * (dt_ms / REFERENCE_FRAME_MS);
    for pipe in pipes {
        pipe.x -= dx;
    }
}

/// Drop pipes that have scrolled fully past the left margin.
/// Returns how many were removed.
pub fn prune_pipes(pipes: &mut Vec<Pipe>) -> usize {
    let before = pipes.len();
    pipes.retain(|p| p.right_edge() > -PRUNE_MARGIN);
    before - pipes.len()
}

/// Flag every pipe whose right edge is behind `bird_x`.
/// Returns the number of pipes newly flagged; each pipe counts once.
pub fn award_passed(pipes: &mut [Pipe], bird_x: f32) -> u32 {
    let mut awarded = 0;
    for pipe in pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.right_edge() < bird_x {
            pipe.passed = true;
            awarded += 1;
        }
    }
    awarded
}
