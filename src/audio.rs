//! Audio collaborator
//!
//! The game fires cues and forgets them. In the browser `WebAudio` synthesizes
//! every cue and the background pad with oscillators, so no sound files ship.

use crate::sim::SoundCue;

/// Fire-and-forget sound player
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn sfx_volume(&self) -> f32;
    /// Clamped to [0, 1]
    fn set_sfx_volume(&mut self, volume: f32);
    fn music_volume(&self) -> f32;
    /// Clamped to [0, 1]
    fn set_music_volume(&mut self, volume: f32);
}

/// Player that makes no sound (native builds, no AudioContext)
#[derive(Debug, Clone)]
pub struct SilentAudio {
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 0.5,
        }
    }
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundPlayer for SilentAudio {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("(silent) {:?}", cue);
    }

    fn start_music(&mut self) {}

    fn stop_music(&mut self) {}

    fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    fn music_volume(&self) -> f32 {
        self.music_volume
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundPlayer;
    use crate::sim::SoundCue;

    /// Pad chord (A minor, low register)
    const PAD_NOTES: [f32; 3] = [110.0, 130.81, 164.81];
    /// Pad loudness at full music volume
    const PAD_LEVEL: f32 = 0.08;

    struct MusicPad {
        gain: GainNode,
        voices: Vec<OscillatorNode>,
    }

    /// Procedural Web Audio player
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music: Option<MusicPad>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: 1.0,
                music_volume: 0.5,
                music: None,
            }
        }

        /// Browsers keep the context suspended until a user gesture
        fn wake(ctx: &AudioContext) {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        /// Oscillator routed through its own gain node to `dest`
        fn create_osc(
            ctx: &AudioContext,
            dest: &web_sys::AudioNode,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(dest).ok()?;

            Some((osc, gain))
        }

        /// One enveloped note starting `delay` seconds from now
        fn blip(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            level: f32,
            delay: f64,
            length: f64,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, &ctx.destination(), freq, osc_type)
            else {
                return;
            };
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Slice - bright downward swish
        fn play_slice(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) =
                Self::create_osc(ctx, &ctx.destination(), 1200.0, OscillatorType::Sawtooth)
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(1200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();

            // Juicy thud under the swish
            Self::blip(ctx, 90.0, OscillatorType::Sine, vol * 0.4, 0.0, 0.1);
        }

        /// Combo - rising arpeggio
        fn play_combo(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
                Self::blip(
                    ctx,
                    *freq,
                    OscillatorType::Triangle,
                    vol * 0.25,
                    i as f64 * 0.06,
                    0.2,
                );
            }
        }

        /// Miss - low falling buzz
        fn play_miss(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) =
                Self::create_osc(ctx, &ctx.destination(), 220.0, OscillatorType::Square)
            else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        /// Game over - sad descending
        fn play_game_over(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                Self::blip(
                    ctx,
                    *freq,
                    OscillatorType::Sine,
                    vol * 0.3,
                    i as f64 * 0.2,
                    0.3,
                );
            }
        }

        /// Button - short tick
        fn play_button(ctx: &AudioContext, vol: f32) {
            Self::blip(ctx, 880.0, OscillatorType::Sine, vol * 0.2, 0.0, 0.05);
        }

        fn start_pad(&self, ctx: &AudioContext) -> Option<MusicPad> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(self.music_volume * PAD_LEVEL);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut voices = Vec::with_capacity(PAD_NOTES.len());
            for (i, freq) in PAD_NOTES.iter().enumerate() {
                let Some((osc, voice_gain)) =
                    Self::create_osc(ctx, &gain, *freq, OscillatorType::Triangle)
                else {
                    continue;
                };
                // Slight detune per voice for a wider chord
                osc.detune().set_value((i as f32 - 1.0) * 6.0);
                voice_gain.gain().set_value(1.0 / PAD_NOTES.len() as f32);
                osc.start().ok();
                voices.push(osc);
            }
            Some(MusicPad { gain, voices })
        }
    }

    impl SoundPlayer for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            Self::wake(ctx);

            match cue {
                SoundCue::Slice => Self::play_slice(ctx, vol),
                SoundCue::Combo => Self::play_combo(ctx, vol),
                SoundCue::Miss => Self::play_miss(ctx, vol),
                SoundCue::GameOver => Self::play_game_over(ctx, vol),
                SoundCue::Button => Self::play_button(ctx, vol),
            }
        }

        fn start_music(&mut self) {
            if self.music.is_some() {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            Self::wake(ctx);
            self.music = self.start_pad(ctx);
            if self.music.is_none() {
                log::warn!("Could not start music pad");
            }
        }

        fn stop_music(&mut self) {
            let Some(pad) = self.music.take() else { return };
            for voice in &pad.voices {
                voice.stop().ok();
            }
            pad.gain.disconnect().ok();
        }

        fn sfx_volume(&self) -> f32 {
            self.sfx_volume
        }

        fn set_sfx_volume(&mut self, volume: f32) {
            self.sfx_volume = volume.clamp(0.0, 1.0);
        }

        fn music_volume(&self) -> f32 {
            self.music_volume
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.music_volume = volume.clamp(0.0, 1.0);
            if let Some(pad) = &self.music {
                pad.gain.gain().set_value(self.music_volume * PAD_LEVEL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_volumes_clamp() {
        let mut audio = SilentAudio::new();
        audio.set_sfx_volume(1.7);
        audio.set_music_volume(-0.2);
        assert_eq!(audio.sfx_volume(), 1.0);
        assert_eq!(audio.music_volume(), 0.0);

        audio.set_sfx_volume(0.25);
        assert_eq!(audio.sfx_volume(), 0.25);
    }
}
