//! Player preferences
//!
//! Persisted separately from records in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::audio::SoundPlayer;
use crate::i18n::Locale;
use crate::platform::storage;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything without losing the volume levels
    pub muted: bool,

    /// Interface language
    pub locale: Locale,

    /// Particle bursts on slice
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            locale: Locale::En,
            particles: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dish_slash_settings";

    /// Settings saved by an earlier session, if any
    pub fn stored() -> Option<Self> {
        let settings = storage::load_json::<Settings>(Self::STORAGE_KEY)?;
        log::info!("Loaded settings from LocalStorage");
        Some(settings.sanitized())
    }

    /// Load settings from LocalStorage, defaults when absent
    pub fn load() -> Self {
        Self::stored().unwrap_or_else(|| {
            log::info!("Using default settings");
            Self::default()
        })
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::debug!("Settings saved");
    }

    /// Volumes forced back into range (hand-edited storage)
    fn sanitized(mut self) -> Self {
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self.music_volume = clamp_volume(self.music_volume);
        self
    }

    /// Volume actually sent to the player
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Push the volume levels into a player
    pub fn apply_audio(&self, audio: &mut impl SoundPlayer) {
        audio.set_sfx_volume(self.effective_sfx_volume());
        audio.set_music_volume(self.effective_music_volume());
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        1.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;

    #[test]
    fn test_apply_audio_respects_mute() {
        let mut audio = SilentAudio::new();
        let mut settings = Settings {
            sfx_volume: 0.6,
            music_volume: 0.3,
            ..Settings::default()
        };
        settings.apply_audio(&mut audio);
        assert_eq!(audio.sfx_volume(), 0.6);
        assert_eq!(audio.music_volume(), 0.3);

        settings.muted = true;
        settings.apply_audio(&mut audio);
        assert_eq!(audio.sfx_volume(), 0.0);
        assert_eq!(audio.music_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted":true,"locale":"Fr"}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.locale, Locale::Fr);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(settings.particles);
    }

    #[test]
    fn test_sanitized_clamps_volumes() {
        let settings = Settings {
            sfx_volume: 3.0,
            music_volume: -1.0,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
    }
}
