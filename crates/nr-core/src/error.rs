use crate::player::PlayerId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by roster setup and state queries.
///
/// Gameplay input never produces an error: out-of-phase or malformed
/// commands are silently ignored by the engine (see
/// [`CommandOutcome`](crate::engine::CommandOutcome)). These variants cover
/// caller-level contract problems that the integrator should surface.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested player ID does not exist in the roster.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player with the same name (case-insensitive) is already seated.
    #[error("player already seated: \"{0}\"")]
    DuplicateName(String),

    /// The roster is full; the table seats at most `max` players.
    #[error("the table is full ({max} seats)")]
    TableFull {
        /// Maximum number of seats.
        max: usize,
    },

    /// Too few players to deal roles.
    #[error("need at least {min} players, have {have}")]
    NotEnoughPlayers {
        /// Minimum number of players required.
        min: usize,
        /// Number of players currently seated.
        have: usize,
    },
}
