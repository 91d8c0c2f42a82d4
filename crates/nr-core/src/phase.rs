use serde::{Deserialize, Serialize};

/// The phases of a match, in their canonical order.
///
/// `Voting` may loop back into itself once (a single revote) before the
/// engine forces a resolution. `Endgame` is terminal until a reset or a
/// same-roster rematch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Seating players and editing the roster.
    Setup,
    /// The dealt role counts are shown to the whole table.
    RoleDistribution,
    /// Each player privately views their own role.
    RoleReveal,
    /// Secret actions, one pass-device turn at a time.
    Night,
    /// The night's outcome is announced.
    Morning,
    /// Open discussion before the vote.
    Discussion,
    /// Each living player casts one vote.
    Voting,
    /// A winner has been decided.
    Endgame,
}

impl Phase {
    /// Whether the match is over in this phase.
    pub fn is_terminal(self) -> bool {
        self == Self::Endgame
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::RoleDistribution => write!(f, "Role Distribution"),
            Self::RoleReveal => write!(f, "Role Reveal"),
            Self::Night => write!(f, "Night"),
            Self::Morning => write!(f, "Morning"),
            Self::Discussion => write!(f, "Discussion"),
            Self::Voting => write!(f, "Voting"),
            Self::Endgame => write!(f, "Endgame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_endgame_is_terminal() {
        assert!(Phase::Endgame.is_terminal());
        assert!(!Phase::Setup.is_terminal());
        assert!(!Phase::Voting.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(Phase::RoleReveal.to_string(), "Role Reveal");
        assert_eq!(Phase::Night.to_string(), "Night");
    }
}
