//! Sound effects
//!
//! Procedurally generated with the Web Audio API, no asset files. Which
//! sound a simulation event makes is decided here for every target; only
//! playback is wasm-specific.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Short upward chirp
    Flap,
    /// Pipe passed
    Point,
    /// Bird hit a pipe or the ground
    Hit,
    /// Round started
    Start,
    /// Pause toggled
    Pause,
}

impl SoundEffect {
    /// The sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Point),
            GameEvent::Crashed { .. } => Some(SoundEffect::Hit),
            GameEvent::RoundStarted => Some(SoundEffect::Start),
            GameEvent::Paused | GameEvent::Resumed => Some(SoundEffect::Pause),
            GameEvent::ReturnedToMenu => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Point => self.play_point(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Start => self.play_start(ctx, vol),
                SoundEffect::Pause => self.play_pause(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Flap - quick rising sweep
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 420.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(420.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(760.0, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Point - two-note ding
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Hit - thud plus a falling tone
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.2).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) {
                let t = t + 0.15;
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                osc.frequency().set_value_at_time(400.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(100.0, t + 0.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.55).ok();
            }
        }

        /// Start - short arpeggio
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0].iter().enumerate() {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.15).ok();
                }
            }
        }

        /// Pause - soft blip
        fn play_pause(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;

    #[test]
    fn test_gameplay_events_have_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Flapped),
            Some(SoundEffect::Flap)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 3 }),
            Some(SoundEffect::Point)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed {
                cause: CrashCause::Pipe,
                score: 3
            }),
            Some(SoundEffect::Hit)
        );
    }

    #[test]
    fn test_return_to_menu_is_silent() {
        assert_eq!(SoundEffect::for_event(&GameEvent::ReturnedToMenu), None);
    }
}
