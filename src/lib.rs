//! Flappy - a side-scrolling arcade game for the browser
//!
//! Core modules:
//! - `sim`: Simulation (physics, pipes, collisions, game state)
//! - `session`: One running game: simulation + best score + storage
//! - `renderer`: Renderer seam and the WebGPU implementation
//! - `platform`: Input mapping and frame timing
//! - `persistence`: Best score and settings storage (LocalStorage on web)
//! - `audio`: Synthesized sound effects

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use persistence::{BestScore, KvStore, MemoryStore};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (y grows downward)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Top of the ground strip; the bird cannot exist below it
    pub const GROUND_LINE: f32 = WORLD_HEIGHT - 80.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_RADIUS: f32 = 16.0;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_VELOCITY: f32 = -8.5;
    /// Gravity per reference frame
    pub const GRAVITY: f32 = 0.5;
    /// Converts elapsed ms into reference frames for gravity (~1/16.7)
    pub const GRAVITY_SCALE: f32 = 0.06;
    /// Maximum visual tilt in radians (45 degrees)
    pub const MAX_ROTATION: f32 = std::f32::consts::FRAC_PI_4;
    /// Tilt per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 0.05;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    /// Height of the passable opening
    pub const PIPE_GAP: f32 = 140.0;
    /// Minimum distance between gap center and world top / ground line
    pub const GAP_MARGIN: f32 = 80.0;
    /// Horizontal pipe speed per reference frame
    pub const PIPE_SPEED: f32 = 2.4;
    /// Pipes are pruned once their right edge is this far past the left edge
    pub const PRUNE_MARGIN: f32 = 10.0;
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;

    /// Reference frame length the per-frame constants are tuned for
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// dt used for the very first frame
    pub const DEFAULT_FRAME_MS: f32 = 16.0;
    /// Longest frame the loop will simulate (backgrounded tabs)
    pub const MAX_FRAME_MS: f32 = 100.0;
}
