//! Per-frame simulation step
//!
//! Applies the logical inputs to the state machine, then advances physics,
//! pipes, scoring and collisions in that order.

use rand::Rng;

use super::autopilot;
use super::collision;
use super::physics::{self, BirdStep};
use super::pipes;
use super::state::{CrashCause, GameEvent, GamePhase, GameState};

/// Logical inputs for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start a round (menu) or flap (playing)
    pub activate: bool,
    /// Leave the game over screen
    pub restart: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Clear the one-shot actions, keeping persistent modes
    pub fn clear_one_shots(&mut self) {
        self.activate = false;
        self.restart = false;
        self.toggle_pause = false;
    }
}

/// Advance the game by one display frame of `dt_ms` milliseconds
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt_ms: f32) {
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::drive(state, &mut input);
    }

    // A round started by this input begins moving on the next frame
    let was_playing = state.phase == GamePhase::Playing;
    apply_input(state, &input);
    if !was_playing || !state.is_running() {
        return;
    }

    step(state, dt_ms);
}

/// Apply logical inputs to the state machine
pub fn apply_input<R: Rng>(state: &mut GameState<R>, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            if input.activate {
                start_round(state);
            }
        }
        GamePhase::Playing => {
            if input.toggle_pause {
                state.paused = !state.paused;
                state.events.push(if state.paused {
                    GameEvent::Paused
                } else {
                    GameEvent::Resumed
                });
            }
            if input.activate && !state.paused {
                state.bird.flap();
                state.events.push(GameEvent::Flapped);
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                state.phase = GamePhase::Menu;
                state.events.push(GameEvent::ReturnedToMenu);
            }
        }
    }
}

/// Reset the round and place the first pipe immediately
fn start_round<R: Rng>(state: &mut GameState<R>) {
    state.reset_round();
    state.phase = GamePhase::Playing;
    state.spawn_pipe();
    state.events.push(GameEvent::RoundStarted);
    log::info!("Round started");
}

fn end_round<R: Rng>(state: &mut GameState<R>, cause: CrashCause) {
    state.phase = GamePhase::GameOver;
    state.paused = false;
    state.events.push(GameEvent::Crashed {
        cause,
        score: state.score,
    });
    log::info!("Round over ({:?}) with score {}", cause, state.score);
}

/// One unpaused frame of the playing phase
fn step<R: Rng>(state: &mut GameState<R>, dt_ms: f32) {
    // Bounds are enforced before any collision test
    if physics::step_bird(&mut state.bird, dt_ms) == BirdStep::Ground {
        end_round(state, CrashCause::Ground);
        return;
    }

    if pipes::advance_spawn_timer(&mut state.spawn_timer_ms, dt_ms) {
        state.spawn_pipe();
    }

    pipes::advance_pipes(&mut state.pipes, dt_ms);
    pipes::prune_pipes(&mut state.pipes);

    let awarded = pipes::award_passed(&mut state.pipes, state.bird.x);
    for _ in 0..awarded {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }

    if collision::first_collision(&state.bird, &state.pipes).is_some() {
        end_round(state, CrashCause::Pipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Pipe;
    use proptest::prelude::*;

    const DT: f32 = 16.0;

    fn activate() -> TickInput {
        TickInput {
            activate: true,
            ..Default::default()
        }
    }

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &activate(), DT);
        state
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);

        // Tick without input - should stay in the menu
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &activate(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, WORLD_WIDTH + PIPE_WIDTH);
        assert_eq!(state.bird.vy, 0.0);
        assert_eq!(state.events, vec![GameEvent::RoundStarted]);
    }

    #[test]
    fn test_start_resets_previous_round() {
        let mut state = started(1);
        state.score = 9;
        state.pipes.push(Pipe::new(10.0, 200.0));
        state.bird.y = 40.0;
        state.phase = GamePhase::GameOver;

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &activate(), DT);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.bird.y, WORLD_HEIGHT / 2.0);
    }

    #[test]
    fn test_flap_sets_impulse() {
        let mut state = started(2);
        state.bird.vy = 4.0;
        let mut expected = state.bird;
        tick(&mut state, &activate(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        expected.flap();
        physics::step_bird(&mut expected, DT);
        assert_eq!(state.bird.vy, expected.vy);
        assert!(state.events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_ground_collision_ends_round() {
        let mut state = started(3);
        state.bird.y = GROUND_LINE - BIRD_RADIUS - 1.0;
        state.bird.vy = 1.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.y, GROUND_LINE - BIRD_RADIUS);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::Crashed {
                cause: CrashCause::Ground,
                ..
            }]
        ));
    }

    #[test]
    fn test_ceiling_does_not_end_round() {
        let mut state = started(4);
        state.bird.y = BIRD_RADIUS + 1.0;
        state.bird.vy = -5.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.y, BIRD_RADIUS);
        assert_eq!(state.bird.vy, 0.0);
    }

    #[test]
    fn test_pipe_collision_ends_round() {
        let mut state = started(5);
        state.pipes.clear();
        state.pipes.push(Pipe::new(BIRD_X - PIPE_WIDTH / 2.0, 100.0));
        state.bird.y = 400.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::Crashed {
            cause: CrashCause::Pipe,
            score: 0
        }));
    }

    #[test]
    fn test_passing_pipe_scores_once() {
        let mut state = started(6);
        state.pipes.clear();
        state.pipes.push(Pipe::new(BIRD_X - PIPE_WIDTH - 1.0, state.bird.y));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
        assert_eq!(state.events, vec![GameEvent::Scored { score: 1 }]);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = started(7);
        state.bird.vy = 0.0;
        let mut frames = 0;
        while state.pipes.len() < 2 {
            // Keep the bird airborne
            state.bird.y = WORLD_HEIGHT / 2.0;
            state.bird.vy = 0.0;
            tick(&mut state, &TickInput::default(), DT);
            frames += 1;
            assert!(frames < 200, "second pipe never spawned");
        }
        assert_eq!(frames, 94);
        assert_eq!(state.pipes[1].x, WORLD_WIDTH + PIPE_WIDTH - PIPE_SPEED);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = started(8);
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert!(state.paused);
        assert_eq!(state.events, vec![GameEvent::Paused]);

        let bird = state.bird;
        let pipes = state.pipes.clone();
        for _ in 0..50 {
            tick(&mut state, &activate(), DT);
        }
        assert_eq!(state.bird, bird);
        assert_eq!(state.pipes, pipes);
        assert_eq!(state.score, 0);

        tick(&mut state, &pause, DT);
        assert!(!state.paused);
        assert_ne!(state.bird, bird);
    }

    #[test]
    fn test_pause_ignored_outside_playing() {
        let mut state = GameState::new(9);
        let pause = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert!(!state.paused);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_gameover_waits_for_restart() {
        let mut state = started(10);
        state.bird.y = GROUND_LINE;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let bird = state.bird;
        for _ in 0..10 {
            tick(&mut state, &activate(), DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird, bird);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &idle, DT);
            tick(&mut state2, &idle, DT);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.pipes, state2.pipes);
        assert_eq!(state1.bird, state2.bird);
    }

    proptest! {
        #[test]
        fn prop_bird_stays_in_bounds(
            seed in any::<u64>(),
            flaps in proptest::collection::vec(any::<bool>(), 1..400),
            dt in 4.0f32..40.0,
        ) {
            let mut state = started(seed);
            for flap in flaps {
                let input = TickInput { activate: flap, ..Default::default() };
                tick(&mut state, &input, dt);
                if state.phase != GamePhase::Playing {
                    break;
                }
                prop_assert!(state.bird.y >= BIRD_RADIUS);
                prop_assert!(state.bird.y <= GROUND_LINE - BIRD_RADIUS);
            }
        }

        #[test]
        fn prop_score_matches_passed_pipes(seed in any::<u64>(), frames in 1usize..1500) {
            let mut state = GameState::new(seed);
            let idle = TickInput { idle_mode: true, ..Default::default() };
            let mut last_score = 0;
            for _ in 0..frames {
                tick(&mut state, &idle, DT);
                if state.events.contains(&GameEvent::RoundStarted) {
                    prop_assert_eq!(state.score, 0);
                } else if state.phase == GamePhase::Playing {
                    let scored = state.events.iter().filter(|e| matches!(e, GameEvent::Scored { .. })).count() as u32;
                    prop_assert!(state.score >= last_score);
                    prop_assert_eq!(state.score - last_score, scored);
                }
                last_score = state.score;
            }
        }

        #[test]
        fn prop_frozen_frames_change_nothing(
            seed in any::<u64>(),
            warmup in 0usize..20,
            mode in 0u8..3,
            inputs in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), 1.0f32..100.0),
                1..30,
            ),
        ) {
            let mut state = started(seed);
            for _ in 0..warmup {
                tick(&mut state, &TickInput::default(), DT);
            }
            prop_assume!(state.phase == GamePhase::Playing);
            match mode {
                0 => state.phase = GamePhase::Menu,
                1 => state.phase = GamePhase::GameOver,
                _ => state.paused = true,
            }

            let before = (state.bird, state.pipes.clone(), state.score, state.spawn_timer_ms);
            for (a, b, dt) in inputs {
                // Only inputs that leave the current mode alone
                let input = match mode {
                    0 => TickInput { restart: a, toggle_pause: b, ..Default::default() },
                    1 => TickInput { activate: a, toggle_pause: b, ..Default::default() },
                    _ => TickInput { activate: a, restart: b, ..Default::default() },
                };
                tick(&mut state, &input, dt);
                prop_assert_eq!(
                    &before,
                    &(state.bird, state.pipes.clone(), state.score, state.spawn_timer_ms)
                );
            }
        }
    }
}
