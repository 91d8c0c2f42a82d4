//! Win-condition evaluation over the living roster.

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::role::Role;

/// Which side took the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// Every wolf is dead.
    Village,
    /// The living wolves match or outnumber the living villagers.
    Wolves,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Village => write!(f, "The village wins"),
            Self::Wolves => write!(f, "The wolves win"),
        }
    }
}

/// Evaluate the win condition against the living roster.
///
/// Called after every death-producing event (night kill, vote
/// elimination) and nowhere else.
pub fn evaluate(players: &[Player]) -> Option<Winner> {
    let living_wolves = players.iter().filter(|p| p.is_living(Role::Wolf)).count();
    let living_others = players
        .iter()
        .filter(|p| p.alive && p.role != Some(Role::Wolf))
        .count();

    if living_wolves == 0 {
        Some(Winner::Village)
    } else if living_wolves >= living_others {
        Some(Winner::Wolves)
    } else {
        None
    }
}
