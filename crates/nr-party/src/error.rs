//! Error types for the party session.

use thiserror::Error;

/// Result type for session operations.
pub type PartyResult<T> = Result<T, PartyError>;

/// Errors surfaced to whoever is holding the device.
#[derive(Debug, Error)]
pub enum PartyError {
    /// Input that is not a command at all.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command with missing or unusable arguments.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A roster-level problem reported by the engine.
    #[error(transparent)]
    Core(#[from] nr_core::CoreError),
}
