//! Game state machine for Nachtrat, a pass-the-device social-deduction
//! party game for 4–12 players sharing one screen.
//!
//! This crate is the authority over a match: it deals hidden roles,
//! sequences the per-round phases, resolves secret night actions into
//! public outcomes, runs iterative voting with tie-breaking, and decides
//! when the match ends. Narration, voice, idle-filler tasks, and all
//! rendering live outside and only ever read state snapshots.

/// The phase state machine and the single mutation entry point.
pub mod engine;
/// Error types for roster setup.
pub mod error;
/// The append-only public event feed.
pub mod event;
/// Secret-action ledger and night resolution.
pub mod night;
/// Match phases.
pub mod phase;
/// Players and their identifiers.
pub mod player;
/// Role archetypes, the distribution table, and role dealing.
pub mod role;
/// The authoritative match state.
pub mod state;
/// Pass-device turn ordering for the night.
pub mod turn;
/// Vote tallying and the majority/tie/revote policy.
pub mod vote;
/// Win-condition evaluation.
pub mod win;

/// Re-export the engine surface.
pub use engine::{Command, CommandOutcome, EngineConfig, GameEngine, MAX_PLAYERS, MIN_PLAYERS};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export event types.
pub use event::PublicEvent;
/// Re-export night types.
pub use night::{Investigation, NightLedger};
/// Re-export the phase enum.
pub use phase::Phase;
/// Re-export player types.
pub use player::{Player, PlayerId};
/// Re-export role types.
pub use role::{Faction, Role, RoleDistribution};
/// Re-export the match state.
pub use state::MatchState;
/// Re-export turn sequencing types.
pub use turn::{TurnSequencer, TurnStage};
/// Re-export vote types.
pub use vote::{VoteLedger, VoteOutcome};
/// Re-export the winner enum.
pub use win::Winner;
