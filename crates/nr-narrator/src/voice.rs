//! Voice output: narration in, audio out, nothing back.

use serde::{Deserialize, Serialize};

/// Slowest supported playback speed.
pub const MIN_SPEED: f32 = 0.7;
/// Fastest supported playback speed.
pub const MAX_SPEED: f32 = 1.2;

/// Which voice reads the narration, and how fast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Identifier of the configured voice.
    pub voice: String,
    /// Playback speed, clamped to [`MIN_SPEED`]..=[`MAX_SPEED`].
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: "storyteller".to_string(),
            speed: 1.0,
        }
    }
}

impl VoiceSettings {
    /// Pick a voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the playback speed (clamped).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }
}

/// A voice collaborator. Fire-and-forget: the engine never waits on it
/// and consumes nothing it produces.
pub trait VoiceSink {
    /// Speak the narration text.
    fn speak(&mut self, text: &str, settings: &VoiceSettings);
}

/// The always-available sink: silence.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedVoice;

impl VoiceSink for MutedVoice {
    fn speak(&mut self, text: &str, _settings: &VoiceSettings) {
        log::trace!("muted voice swallowed {} characters", text.len());
    }
}
