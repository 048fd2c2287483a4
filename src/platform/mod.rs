//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input events (key codes and pointer to logical actions)
//! - DOM listener lifetimes (web only)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod input;

pub use clock::FrameClock;
pub use input::{Action, BUTTON_IDS, POINTER_ACTION, action_for_button, action_for_key};
