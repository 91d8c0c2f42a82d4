use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// Unique identifier for every seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A seated participant.
///
/// Created when the roster is edited during setup and destroyed only by a
/// full reset. The role is dealt once at match start; `alive` flips from
/// true to false at most once and is never reversed within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier, stable for the lifetime of the roster.
    pub id: PlayerId,
    /// Display name, unique at the table (case-insensitive).
    pub name: String,
    /// Hidden role, `None` until roles are dealt.
    pub role: Option<Role>,
    /// Whether this player is still in the game.
    pub alive: bool,
    /// Whether this player has privately viewed their role this match.
    pub role_revealed: bool,
    /// Cosmetic flavor text shown to the narrator. Never read by any
    /// resolver.
    pub flavor: Option<String>,
}

impl Player {
    /// Seat a new player with a fresh random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            role: None,
            alive: true,
            role_revealed: false,
            flavor: None,
        }
    }

    /// Whether this player holds the given role and is still alive.
    pub fn is_living(&self, role: Role) -> bool {
        self.alive && self.role == Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_display_shows_short_form() {
        let id = PlayerId(Uuid::parse_str("a3f2b1c8-1234-5678-9abc-def012345678").unwrap());
        assert_eq!(id.to_string(), "a3f2b1c8");
    }

    #[test]
    fn new_player_is_alive_and_roleless() {
        let p = Player::new("Mira");
        assert!(p.alive);
        assert!(p.role.is_none());
        assert!(!p.role_revealed);
        assert!(p.flavor.is_none());
    }

    #[test]
    fn is_living_checks_both_role_and_life() {
        let mut p = Player::new("Mira");
        p.role = Some(Role::Seer);
        assert!(p.is_living(Role::Seer));
        assert!(!p.is_living(Role::Wolf));
        p.alive = false;
        assert!(!p.is_living(Role::Seer));
    }
}
