//! Collision detection between the bird and pipes
//!
//! The bird's circular sprite is approximated by its square bounding box and
//! each pipe by two solid rectangles, so everything reduces to AABB overlap.

use super::state::{Bird, Pipe};
use crate::consts::{GROUND_LINE, PIPE_WIDTH};

/// Axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square centered on (cx, cy)
    pub fn centered(cx: f32, cy: f32, half: f32) -> Self {
        Self::new(cx - half, cy - half, half * 2.0, half * 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True iff both the horizontal and vertical intervals overlap.
    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Bounding box of the bird
pub fn bird_box(bird: &Bird) -> Rect {
    Rect::centered(bird.x, bird.y, bird.radius)
}

/// Top and bottom solid segments of a pipe
pub fn pipe_segments(pipe: &Pipe) -> [Rect; 2] {
    let top = Rect::new(pipe.x, 0.0, PIPE_WIDTH, pipe.gap_top());
    let bottom = Rect::new(
        pipe.x,
        pipe.gap_bottom(),
        PIPE_WIDTH,
        GROUND_LINE - pipe.gap_bottom(),
    );
    [top, bottom]
}

pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let bird_rect = bird_box(bird);
    pipe_segments(pipe)
        .iter()
        .any(|segment| bird_rect.overlaps(segment))
}

/// Index of the first pipe the bird overlaps, if any
pub fn first_collision(bird: &Bird, pipes: &[Pipe]) -> Option<usize> {
    pipes.iter().position(|pipe| bird_hits_pipe(bird, pipe))
}
