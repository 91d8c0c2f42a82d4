//! Pass-the-device session driver for Nachtrat.
//!
//! Turns lines of input from whoever is holding the shared device into
//! screens of text, one phase at a time: seating, the private role
//! reveals, the serialized night turns, voting, and the endgame. The
//! session glues the game engine to its collaborators (narration, voice,
//! bio formatting, the idle filler) without ever letting them write game
//! state.

/// Session configuration.
pub mod config;
/// Error types for the session.
pub mod error;
/// Idle-filler task for seats with no secret action.
pub mod filler;
/// The interactive session itself.
pub mod session;

/// Re-export the session config.
pub use config::PartyConfig;
/// Re-export error types.
pub use error::{PartyError, PartyResult};
/// Re-export the filler task.
pub use filler::{FillerSignal, QuickSum};
/// Re-export the session.
pub use session::PartySession;
