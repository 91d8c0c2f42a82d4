//! Role archetypes, the fixed distribution table, and role dealing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::player::Player;

/// The closed set of role archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Secretly removes one player per night. Drives the win condition.
    Wolf,
    /// Privately learns one target's alignment per night.
    Seer,
    /// Can negate one night elimination per round.
    Guardian,
    /// No secret night action; fills the turn with an idle task.
    Villager,
}

impl Role {
    /// The faction this role fights for.
    pub fn faction(self) -> Faction {
        match self {
            Self::Wolf => Faction::Wolves,
            _ => Faction::Village,
        }
    }

    /// Whether this role takes a secret action at night.
    pub fn has_night_action(self) -> bool {
        !matches!(self, Self::Villager)
    }

    /// One-line description shown on the private role card.
    pub fn blurb(self) -> &'static str {
        match self {
            Self::Wolf => "Pick off the village without getting caught.",
            Self::Seer => "Each night, learn whether one player runs with the wolves.",
            Self::Guardian => "Each night, shield one player from the wolves.",
            Self::Villager => "Find the wolves through discussion and voting.",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wolf => write!(f, "Wolf"),
            Self::Seer => write!(f, "Seer"),
            Self::Guardian => write!(f, "Guardian"),
            Self::Villager => write!(f, "Villager"),
        }
    }
}

/// A side in the win condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// The wolves, trying to outnumber the village.
    Wolves,
    /// Everyone else.
    Village,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wolves => write!(f, "the wolves"),
            Self::Village => write!(f, "the village"),
        }
    }
}

/// How many of each role a given table size receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDistribution {
    /// Number of wolves.
    pub wolves: usize,
    /// Number of seers (0 or 1).
    pub seers: usize,
    /// Number of guardians (0 or 1).
    pub guardians: usize,
    /// Number of plain villagers.
    pub villagers: usize,
}

/// Distribution rows for 4 through 8 players; 9+ uses three wolves, one
/// seer, one guardian, and the remainder as villagers.
const DISTRIBUTION_TABLE: [(usize, RoleDistribution); 5] = [
    (4, RoleDistribution { wolves: 1, seers: 0, guardians: 1, villagers: 2 }),
    (5, RoleDistribution { wolves: 1, seers: 0, guardians: 1, villagers: 3 }),
    (6, RoleDistribution { wolves: 1, seers: 1, guardians: 0, villagers: 4 }),
    (7, RoleDistribution { wolves: 2, seers: 1, guardians: 1, villagers: 3 }),
    (8, RoleDistribution { wolves: 2, seers: 1, guardians: 1, villagers: 4 }),
];

impl RoleDistribution {
    /// Look up the fixed distribution for a table of `count` players.
    ///
    /// Deterministic; no randomness here. Callers keep `count` at 4 or
    /// above (the setup flow enforces the table limits).
    pub fn for_player_count(count: usize) -> Self {
        debug_assert!(count >= 4, "tables below 4 players are not dealt");
        for (n, dist) in DISTRIBUTION_TABLE {
            if n == count {
                return dist;
            }
        }
        let (wolves, seers, guardians) = (3, 1, 1);
        Self {
            wolves,
            seers,
            guardians,
            villagers: count - wolves - seers - guardians,
        }
    }

    /// Total number of roles in this distribution.
    pub fn total(&self) -> usize {
        self.wolves + self.seers + self.guardians + self.villagers
    }

    /// Flatten the distribution into its role multiset, wolves first.
    pub fn to_roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(self.total());
        roles.extend(std::iter::repeat_n(Role::Wolf, self.wolves));
        roles.extend(std::iter::repeat_n(Role::Seer, self.seers));
        roles.extend(std::iter::repeat_n(Role::Guardian, self.guardians));
        roles.extend(std::iter::repeat_n(Role::Villager, self.villagers));
        roles
    }
}

/// Deal roles to the seated players.
///
/// Shuffles the flattened role multiset uniformly (every permutation
/// equally likely) and zips it with the players in seating order. The
/// distribution total must equal the player count; a mismatch is a caller
/// bug, not a game state.
pub fn assign_roles(distribution: &RoleDistribution, players: &mut [Player], rng: &mut StdRng) {
    assert_eq!(
        distribution.total(),
        players.len(),
        "distribution total must match player count"
    );
    let mut roles = distribution.to_roles();
    roles.shuffle(rng);
    for (player, role) in players.iter_mut().zip(roles) {
        player.role = Some(role);
    }
}
