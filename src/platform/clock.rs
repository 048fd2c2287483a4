//! Frame timing
//!
//! Turns `requestAnimationFrame` timestamps into per-frame deltas and keeps a
//! rolling FPS estimate.

use crate::consts::{DEFAULT_FRAME_MS, MAX_FRAME_MS};

const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now_ms` and return the elapsed ms since the last
    /// one. The first frame after construction or [`reset`](Self::reset)
    /// reports [`DEFAULT_FRAME_MS`]; long stalls are capped at [`MAX_FRAME_MS`].
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_MS),
            None => DEFAULT_FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.track_fps(now_ms);
        dt
    }

    /// Forget the previous timestamp so the next frame uses the default dt
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        // Oldest sample sits at the next write position once the window is full
        let oldest = if self.frames_seen == FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let intervals = (self.frames_seen - 1) as f64;
        let elapsed = now_ms - oldest;
        if intervals > 0.0 && elapsed > 0.0 {
            self.fps = (intervals * 1000.0 / elapsed).round() as u32;
        }
    }
}
