//! Bird physics
//!
//! Gravity is tuned per reference frame and scaled by elapsed milliseconds so
//! the fall looks the same at any refresh rate. Position integrates the raw
//! per-frame velocity.

use super::state::Bird;
use crate::consts::{GRAVITY, GRAVITY_SCALE, GROUND_LINE};

/// Outcome of a single physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdStep {
    /// Still in the air
    Airborne,
    /// Bumped the top of the world (clamped, velocity zeroed, not fatal)
    Ceiling,
    /// Touched the ground line (clamped, fatal)
    Ground,
}

/// Advance the bird by `dt_ms` and enforce the world bounds
pub fn step_bird(bird: &mut Bird, dt_ms: f32) -> BirdStep {
    bird.vy += GRAVITY * dt_ms * GRAVITY_SCALE;
    bird.y += bird.vy;

    if bird.y + bird.radius >= GROUND_LINE {
        bird.y = GROUND_LINE - bird.radius;
        return BirdStep::Ground;
    }

    if bird.y - bird.radius <= 0.0 {
        bird.y = bird.radius;
        bird.vy = 0.0;
        return BirdStep::Ceiling;
    }

    BirdStep::Airborne
}
