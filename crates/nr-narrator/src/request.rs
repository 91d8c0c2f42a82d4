use nr_core::{Phase, Winner};
use serde::{Deserialize, Serialize};

use crate::mode::NarratorMode;

/// Everything a narration collaborator may know.
///
/// Built from a state snapshot by the caller; contains only public
/// information. The collaborator answers with free text or fails, and
/// nothing it returns ever feeds back into game logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationRequest {
    /// The phase being narrated.
    pub phase: Phase,
    /// How far the narrator may go.
    pub mode: NarratorMode,
    /// The table's public theme string, e.g. "a fog-bound harbor town".
    pub theme: String,
    /// Descriptions of recent public events, oldest first.
    pub recent_events: Vec<String>,
    /// The phase-specific instruction to relay to the table.
    pub instruction: String,
    /// The decided winner, present only in the endgame.
    pub winner: Option<Winner>,
}

impl NarrationRequest {
    /// Build a request for `phase` with the canonical instruction line.
    pub fn for_phase(phase: Phase, mode: NarratorMode, theme: impl Into<String>) -> Self {
        Self {
            phase,
            mode,
            theme: theme.into(),
            recent_events: Vec::new(),
            instruction: phase_instruction(phase).to_string(),
            winner: None,
        }
    }

    /// Attach recent public event descriptions.
    pub fn with_events(mut self, events: Vec<String>) -> Self {
        self.recent_events = events;
        self
    }

    /// Attach the decided winner.
    pub fn with_winner(mut self, winner: Option<Winner>) -> Self {
        self.winner = winner;
        self
    }
}

/// The fixed instruction the table is given in each phase.
pub fn phase_instruction(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "Seat the players and start the game.",
        Phase::RoleDistribution => "Study the role counts, then begin the reveal.",
        Phase::RoleReveal => "Each player: view your role in private, then pass the device on.",
        Phase::Night => {
            "Wolves: choose your prey. Seer: investigate someone. Guardian: shield someone."
        }
        Phase::Morning => "Hear what the night left behind.",
        Phase::Discussion => "Talk it over. Be careful who you trust.",
        Phase::Voting => "Vote for who to banish. A majority is required.",
        Phase::Endgame => "Review the result and play again!",
    }
}
