//! External-collaborator contracts for Nachtrat.
//!
//! The game engine treats narration, voice, and bio formatting as
//! collaborators it talks to through narrow request/response seams: they
//! read public snapshots and hand back cosmetic text or audio, never game
//! state. This crate defines those seams plus the built-in fallbacks that
//! keep a match running when no collaborator is configured.

/// Cosmetic bio formatting.
pub mod bio;
/// Narrator modes.
pub mod mode;
/// The narration contract and fallback templates.
pub mod narrator;
/// Narration request types and per-phase instructions.
pub mod request;
/// Voice output.
pub mod voice;

/// Re-export bio formatting types.
pub use bio::{BioFormatter, PlainBioFormatter};
/// Re-export the mode enum.
pub use mode::NarratorMode;
/// Re-export the narrator contract.
pub use narrator::{Narrator, NarratorError, TemplateNarrator, fallback_narration};
/// Re-export request types.
pub use request::{NarrationRequest, phase_instruction};
/// Re-export voice types.
pub use voice::{MutedVoice, VoiceSettings, VoiceSink};
