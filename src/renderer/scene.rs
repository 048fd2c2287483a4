//! Scene assembly: frame view to triangle list
//!
//! Draw order is background, pipes, bird, overlay. Text (score, prompts) is
//! left to the HUD.

use glam::Vec2;

use super::FrameView;
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Bird, Pipe};

/// Height of the pipe end caps
const LIP_HEIGHT: f32 = 20.0;
/// How far the caps overhang the pipe on each side
const LIP_OVERHANG: f32 = 4.0;
const CIRCLE_SEGMENTS: u32 = 24;

/// Presentation switches derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    /// Tilt the bird with its velocity
    pub tilt: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { tilt: true }
    }
}

/// Build the full triangle list for one frame
pub fn build_scene(frame: &FrameView<'_>, options: &SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    background(&mut vertices);
    for pipe in frame.pipes {
        pipe_pair(&mut vertices, pipe);
    }
    bird(&mut vertices, frame.bird, options);

    if frame.has_overlay() {
        vertices.extend(shapes::rect(
            0.0,
            0.0,
            WORLD_WIDTH,
            WORLD_HEIGHT,
            colors::OVERLAY,
        ));
    }

    vertices
}

fn background(out: &mut Vec<Vertex>) {
    out.extend(shapes::gradient_rect(
        0.0,
        0.0,
        WORLD_WIDTH,
        WORLD_HEIGHT,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));
    out.extend(shapes::rect(
        0.0,
        GROUND_LINE,
        WORLD_WIDTH,
        WORLD_HEIGHT - GROUND_LINE,
        colors::GROUND,
    ));
    let mut x = 0.0;
    while x < WORLD_WIDTH {
        out.extend(shapes::rect(x, GROUND_LINE - 6.0, 12.0, 6.0, colors::GRASS));
        x += 20.0;
    }
}

fn pipe_pair(out: &mut Vec<Vertex>, pipe: &Pipe) {
    let top = pipe.gap_top();
    let bottom = pipe.gap_bottom();

    out.extend(shapes::rect(pipe.x, 0.0, PIPE_WIDTH, top, colors::PIPE));
    out.extend(shapes::rect(
        pipe.x,
        bottom,
        PIPE_WIDTH,
        GROUND_LINE - bottom,
        colors::PIPE,
    ));

    let lip_x = pipe.x - LIP_OVERHANG;
    let lip_w = PIPE_WIDTH + LIP_OVERHANG * 2.0;
    out.extend(shapes::rect(
        lip_x,
        top - LIP_HEIGHT,
        lip_w,
        LIP_HEIGHT,
        colors::PIPE_LIP,
    ));
    out.extend(shapes::rect(lip_x, bottom, lip_w, LIP_HEIGHT, colors::PIPE_LIP));
}

/// Bird sprite built around (0, 0), then rotated and moved into place
fn bird(out: &mut Vec<Vertex>, bird: &Bird, options: &SceneOptions) {
    let r = bird.radius;
    let mut sprite = Vec::with_capacity(CIRCLE_SEGMENTS as usize * 12 + 3);

    // body
    sprite.extend(shapes::circle(
        Vec2::ZERO,
        r,
        colors::BIRD_BODY,
        CIRCLE_SEGMENTS,
    ));
    // wing
    sprite.extend(shapes::ellipse(
        Vec2::new(-2.0, 2.0),
        Vec2::new(8.0, 6.0),
        -0.4,
        colors::BIRD_WING,
        CIRCLE_SEGMENTS,
    ));
    // eye
    sprite.extend(shapes::circle(
        Vec2::new(6.0, -4.0),
        5.0,
        colors::BIRD_EYE,
        CIRCLE_SEGMENTS,
    ));
    sprite.extend(shapes::circle(
        Vec2::new(8.0, -4.0),
        2.0,
        colors::BIRD_PUPIL,
        CIRCLE_SEGMENTS / 2,
    ));
    // beak
    sprite.extend(shapes::triangle(
        Vec2::new(r, 0.0),
        Vec2::new(r + 10.0, 4.0),
        Vec2::new(r, 8.0),
        colors::BIRD_BEAK,
    ));

    let angle = if options.tilt { bird.rotation() } else { 0.0 };
    shapes::place(&mut sprite, Vec2::new(bird.x, bird.y), angle);
    out.extend(sprite);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn view<'a>(bird: &'a Bird, pipes: &'a [Pipe], phase: GamePhase) -> FrameView<'a> {
        FrameView {
            bird,
            pipes,
            score: 0,
            best: 0,
            phase,
            paused: false,
            idle: false,
            fps: 0,
        }
    }

    fn has_overlay(vertices: &[Vertex]) -> bool {
        vertices.iter().any(|v| v.color == colors::OVERLAY)
    }

    #[test]
    fn test_overlay_only_outside_play() {
        let bird = Bird::default();
        let options = SceneOptions::default();

        let playing = build_scene(&view(&bird, &[], GamePhase::Playing), &options);
        assert!(!has_overlay(&playing));

        let menu = build_scene(&view(&bird, &[], GamePhase::Menu), &options);
        assert!(has_overlay(&menu));

        let mut paused = view(&bird, &[], GamePhase::Playing);
        paused.paused = true;
        assert!(has_overlay(&build_scene(&paused, &options)));
    }

    #[test]
    fn test_each_pipe_adds_geometry() {
        let bird = Bird::default();
        let options = SceneOptions::default();
        let none = build_scene(&view(&bird, &[], GamePhase::Playing), &options);
        let pipes = [Pipe::new(200.0, 300.0), Pipe::new(300.0, 200.0)];
        let two = build_scene(&view(&bird, &pipes, GamePhase::Playing), &options);
        // body + body + lip + lip
        assert_eq!(two.len() - none.len(), 2 * 4 * 6);
    }

    #[test]
    fn test_pipe_body_spans_to_ground() {
        let bird = Bird::default();
        let pipes = [Pipe::new(200.0, 300.0)];
        let vertices = build_scene(
            &view(&bird, &pipes, GamePhase::Playing),
            &SceneOptions::default(),
        );
        let pipe_ys: Vec<f32> = vertices
            .iter()
            .filter(|v| v.color == colors::PIPE)
            .map(|v| v.position[1])
            .collect();
        assert!(pipe_ys.contains(&0.0));
        assert!(pipe_ys.contains(&GROUND_LINE));
    }

    #[test]
    fn test_beak_without_tilt() {
        let bird = Bird {
            vy: 6.0,
            ..Bird::default()
        };
        let vertices = build_scene(
            &view(&bird, &[], GamePhase::Playing),
            &SceneOptions { tilt: false },
        );
        let tip = Vec2::new(bird.x + bird.radius + 10.0, bird.y + 4.0);
        assert!(
            vertices
                .iter()
                .filter(|v| v.color == colors::BIRD_BEAK)
                .any(|v| (Vec2::from(v.position) - tip).length() < 1e-3)
        );
    }
}
