//! The secret-action ledger and night resolution.
//!
//! Each round the living special roles file at most one target each into
//! the ledger. Resolution consumes the completed ledger in a fixed order:
//! protection is noted first, elimination checks it, and investigation is
//! side-effect-free by contract and never touches the roster.

use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};
use crate::role::Role;

/// Per-round mapping of secret-action slot to chosen target.
///
/// Cleared every round. The wolf slot is write-once within a round: the
/// first wolf to act chooses for the pack, later wolves only acknowledge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NightLedger {
    wolf_target: Option<PlayerId>,
    seer_target: Option<PlayerId>,
    guardian_target: Option<PlayerId>,
}

impl NightLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a target for the given role's slot.
    ///
    /// Returns true if the slot was written. A second wolf write is
    /// refused (the pack target is already fixed); villagers have no slot.
    pub fn record(&mut self, role: Role, target: PlayerId) -> bool {
        match role {
            Role::Wolf => {
                if self.wolf_target.is_some() {
                    return false;
                }
                self.wolf_target = Some(target);
                true
            }
            Role::Seer => {
                self.seer_target = Some(target);
                true
            }
            Role::Guardian => {
                self.guardian_target = Some(target);
                true
            }
            Role::Villager => false,
        }
    }

    /// The pack's chosen prey, if any wolf has acted yet.
    pub fn wolf_target(&self) -> Option<PlayerId> {
        self.wolf_target
    }

    /// The seer's chosen target, if any.
    pub fn seer_target(&self) -> Option<PlayerId> {
        self.seer_target
    }

    /// The guardian's chosen ward, if any.
    pub fn guardian_target(&self) -> Option<PlayerId> {
        self.guardian_target
    }

    /// Empty the ledger for the next round.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every required slot is filled for the given roster.
    ///
    /// The wolf slot is always required; the seer and guardian slots are
    /// required only while a living holder of that role exists.
    pub fn is_complete(&self, players: &[Player]) -> bool {
        let living = |role| players.iter().any(|p| p.is_living(role));
        self.wolf_target.is_some()
            && (!living(Role::Seer) || self.seer_target.is_some())
            && (!living(Role::Guardian) || self.guardian_target.is_some())
    }

    /// The filed actions in resolution order: protection first, then the
    /// elimination that must check it, then the inert investigation.
    pub fn actions(&self) -> Vec<NightAction> {
        let mut actions = Vec::with_capacity(3);
        if let Some(t) = self.guardian_target {
            actions.push(NightAction::Protect(t));
        }
        if let Some(t) = self.wolf_target {
            actions.push(NightAction::Eliminate(t));
        }
        if let Some(t) = self.seer_target {
            actions.push(NightAction::Investigate(t));
        }
        actions
    }
}

/// A secret night action, tagged by the archetype that files it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightAction {
    /// The wolves remove this player, unless protected.
    Eliminate(PlayerId),
    /// The seer learns this player's alignment. Never mutates the roster.
    Investigate(PlayerId),
    /// The guardian shields this player for the round.
    Protect(PlayerId),
}

/// What a round's night resolution produced.
#[derive(Debug, Clone)]
pub struct NightResolution {
    /// The player who died, if any.
    pub killed: Option<PlayerId>,
    /// The player the guardian saved from elimination, if the shield held.
    pub saved: Option<PlayerId>,
    /// Public description of the outcome. Never mentions the seer.
    pub description: String,
}

/// Resolve a completed ledger against the roster.
///
/// Rules, in order: a protected prey survives (no death, no role reveal);
/// otherwise the prey dies and their role is revealed publicly; with no
/// valid target nobody dies. Exactly one public description is produced.
pub fn resolve_night(ledger: &NightLedger, players: &mut [Player]) -> NightResolution {
    let mut shielded: Option<PlayerId> = None;
    let mut resolution = NightResolution {
        killed: None,
        saved: None,
        description: "The night passes quietly. Nobody died.".to_string(),
    };

    for action in ledger.actions() {
        match action {
            NightAction::Protect(target) => shielded = Some(target),
            NightAction::Eliminate(target) => {
                if shielded == Some(target) {
                    resolution.saved = Some(target);
                    resolution.description =
                        "The wolves struck, but the guardian's watch held. Nobody died."
                            .to_string();
                } else if let Some(prey) = players.iter_mut().find(|p| p.id == target && p.alive) {
                    prey.alive = false;
                    let role = prey.role.map(|r| r.to_string()).unwrap_or_default();
                    resolution.description =
                        format!("{} was found dead at dawn. They were a {}.", prey.name, role);
                    resolution.killed = Some(target);
                }
            }
            // Side-effect-free by contract; surfaced privately during the
            // seer's own turn, never here.
            NightAction::Investigate(_) => {}
        }
    }

    resolution
}

/// The seer's private finding about one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Investigation {
    /// Who was investigated.
    pub target: PlayerId,
    /// Their display name, for the private result card.
    pub target_name: String,
    /// Whether the target runs with the wolves.
    pub is_wolf: bool,
}

/// Look up a target's alignment without touching any state.
///
/// Returns `None` if the target is not seated. The result is shown once,
/// to the investigating seat only, and is never persisted.
pub fn investigate(players: &[Player], target: PlayerId) -> Option<Investigation> {
    players.iter().find(|p| p.id == target).map(|p| Investigation {
        target: p.id,
        target_name: p.name.clone(),
        is_wolf: p.role == Some(Role::Wolf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(roles: &[Role]) -> Vec<Player> {
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| {
                let mut p = Player::new(format!("p{i}"));
                p.role = Some(*role);
                p
            })
            .collect()
    }

    #[test]
    fn second_wolf_write_is_refused() {
        let players = roster(&[Role::Wolf, Role::Wolf, Role::Villager, Role::Villager]);
        let mut ledger = NightLedger::new();
        assert!(ledger.record(Role::Wolf, players[2].id));
        assert!(!ledger.record(Role::Wolf, players[3].id));
        assert_eq!(ledger.wolf_target(), Some(players[2].id));
    }

    #[test]
    fn villager_has_no_slot() {
        let players = roster(&[Role::Villager]);
        let mut ledger = NightLedger::new();
        assert!(!ledger.record(Role::Villager, players[0].id));
    }

    #[test]
    fn completeness_tracks_living_roles() {
        let mut players = roster(&[Role::Wolf, Role::Seer, Role::Guardian, Role::Villager]);
        let mut ledger = NightLedger::new();
        ledger.record(Role::Wolf, players[3].id);
        assert!(!ledger.is_complete(&players));

        ledger.record(Role::Seer, players[0].id);
        ledger.record(Role::Guardian, players[3].id);
        assert!(ledger.is_complete(&players));

        // A dead seer no longer blocks completeness.
        ledger.clear();
        players[1].alive = false;
        ledger.record(Role::Wolf, players[3].id);
        ledger.record(Role::Guardian, players[3].id);
        assert!(ledger.is_complete(&players));
    }

    #[test]
    fn protected_prey_survives() {
        let mut players = roster(&[Role::Wolf, Role::Guardian, Role::Villager, Role::Villager]);
        let prey = players[2].id;
        let mut ledger = NightLedger::new();
        ledger.record(Role::Wolf, prey);
        ledger.record(Role::Guardian, prey);

        let resolution = resolve_night(&ledger, &mut players);
        assert!(players.iter().all(|p| p.alive));
        assert_eq!(resolution.killed, None);
        assert_eq!(resolution.saved, Some(prey));
        assert!(resolution.description.contains("Nobody died"));
        // No role reveal when the shield holds.
        assert!(!resolution.description.contains("Villager"));
    }

    #[test]
    fn unprotected_prey_dies_with_role_reveal() {
        let mut players = roster(&[Role::Wolf, Role::Guardian, Role::Seer, Role::Villager]);
        let prey = players[2].id;
        let mut ledger = NightLedger::new();
        ledger.record(Role::Wolf, prey);
        ledger.record(Role::Guardian, players[3].id);
        ledger.record(Role::Seer, players[0].id);

        let resolution = resolve_night(&ledger, &mut players);
        assert_eq!(resolution.killed, Some(prey));
        assert!(!players[2].alive);
        assert_eq!(players.iter().filter(|p| !p.alive).count(), 1);
        assert!(resolution.description.contains("p2"));
        assert!(resolution.description.contains("Seer"));
    }

    #[test]
    fn empty_ledger_resolves_to_quiet_night() {
        let mut players = roster(&[Role::Wolf, Role::Villager]);
        let resolution = resolve_night(&NightLedger::new(), &mut players);
        assert_eq!(resolution.killed, None);
        assert!(resolution.description.contains("quietly"));
    }

    #[test]
    fn investigation_reads_alignment_without_side_effects() {
        let players = roster(&[Role::Wolf, Role::Seer, Role::Villager]);
        let before = players.clone();

        let finding = investigate(&players, players[0].id).unwrap();
        assert!(finding.is_wolf);
        let finding = investigate(&players, players[2].id).unwrap();
        assert!(!finding.is_wolf);

        assert_eq!(before.len(), players.len());
        assert!(players.iter().zip(&before).all(|(a, b)| a.alive == b.alive));
    }
}
