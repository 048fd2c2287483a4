//! Rendering
//!
//! The simulation hands a [`FrameView`] to a [`Renderer`] once per frame.
//! The WebGPU implementation turns it into a triangle list (`scene`) and
//! draws it (`pipeline`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use thiserror::Error;

use crate::sim::{Bird, GamePhase, Pipe};

pub use pipeline::RenderState;
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub score: u32,
    pub best: u32,
    pub phase: GamePhase,
    pub paused: bool,
    pub idle: bool,
    pub fps: u32,
}

impl FrameView<'_> {
    /// Whether a dimming overlay (menu, game over, pause) is shown
    pub fn has_overlay(&self) -> bool {
        self.phase != GamePhase::Playing || self.paused
    }

    /// HUD pause badge shown for the whole round
    pub fn pause_hint(&self) -> Option<&'static str> {
        match (self.phase, self.paused) {
            (GamePhase::Playing, true) => Some("Paused (P)"),
            (GamePhase::Playing, false) => Some("Press P to Pause"),
            _ => None,
        }
    }
}

/// Draws a frame. Side-effect only.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameView<'_>) {}
}

/// GPU setup failures
#[derive(Debug, Error)]
pub enum RenderInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
