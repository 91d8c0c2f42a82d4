//! The single authoritative match state.
//!
//! Display code and external collaborators read snapshots of this struct;
//! only the [`GameEngine`](crate::engine::GameEngine) writes to it. Fields
//! are crate-private so every mutation goes through the engine's
//! transition function.

use serde::{Deserialize, Serialize};

use crate::event::PublicEvent;
use crate::night::NightLedger;
use crate::phase::Phase;
use crate::player::{Player, PlayerId};
use crate::role::RoleDistribution;
use crate::turn::TurnSequencer;
use crate::vote::VoteLedger;
use crate::win::Winner;

/// Everything there is to know about the current match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) phase: Phase,
    /// Insertion order is seating order.
    pub(crate) players: Vec<Player>,
    pub(crate) round: u32,
    pub(crate) distribution: Option<RoleDistribution>,
    pub(crate) night: NightLedger,
    pub(crate) votes: VoteLedger,
    pub(crate) revote_count: u8,
    pub(crate) events: Vec<PublicEvent>,
    pub(crate) winner: Option<Winner>,
    pub(crate) turn: Option<TurnSequencer>,
    pub(crate) last_killed: Option<PlayerId>,
    pub(crate) last_saved: Option<PlayerId>,
    pub(crate) last_voted_out: Option<PlayerId>,
    pub(crate) narration: Option<String>,
    pub(crate) narration_token: u64,
    pub(crate) self_protects_used: u32,
}

impl MatchState {
    /// A fresh state in the setup phase with an empty roster.
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Setup,
            players: Vec::new(),
            round: 1,
            distribution: None,
            night: NightLedger::new(),
            votes: VoteLedger::new(),
            revote_count: 0,
            events: Vec::new(),
            winner: None,
            turn: None,
            last_killed: None,
            last_saved: None,
            last_voted_out: None,
            narration: None,
            narration_token: 0,
            self_protects_used: 0,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current round, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// All seated players, in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by ID.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by name, case-insensitively.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// The living players, in seating order.
    pub fn living(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.alive).collect()
    }

    /// Number of living players.
    pub fn living_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// The dealt role counts, once the match has started.
    pub fn distribution(&self) -> Option<&RoleDistribution> {
        self.distribution.as_ref()
    }

    /// This round's secret-action ledger.
    pub fn night(&self) -> &NightLedger {
        &self.night
    }

    /// This sub-round's votes.
    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    /// How many revotes have happened this round (0 or 1).
    pub fn revote_count(&self) -> u8 {
        self.revote_count
    }

    /// The append-only public event feed.
    pub fn events(&self) -> &[PublicEvent] {
        &self.events
    }

    /// Descriptions of the most recent `n` public events, oldest first.
    pub fn recent_events(&self, n: usize) -> Vec<String> {
        let start = self.events.len().saturating_sub(n);
        self.events[start..]
            .iter()
            .map(|e| e.description.clone())
            .collect()
    }

    /// The decided winner, if the match is over.
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// This round's pass-device sequencer, while the night runs.
    pub fn turn(&self) -> Option<&TurnSequencer> {
        self.turn.as_ref()
    }

    /// The player killed in the most recent night, for narration context.
    pub fn last_killed(&self) -> Option<PlayerId> {
        self.last_killed
    }

    /// The player saved by the guardian in the most recent night.
    pub fn last_saved(&self) -> Option<PlayerId> {
        self.last_saved
    }

    /// The player voted out in the most recent vote.
    pub fn last_voted_out(&self) -> Option<PlayerId> {
        self.last_voted_out
    }

    /// The narration overlay for the current phase, if it has arrived.
    pub fn narration(&self) -> Option<&str> {
        self.narration.as_deref()
    }

    /// Token identifying the current phase for narration staleness checks.
    ///
    /// Bumped on every phase change; a narration response tagged with an
    /// older token is discarded rather than applied.
    pub fn narration_token(&self) -> u64 {
        self.narration_token
    }

    /// How often the guardian has shielded themself this match.
    pub fn self_protects_used(&self) -> u32 {
        self.self_protects_used
    }

    /// Switch phases, invalidating any in-flight narration.
    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.narration = None;
        self.narration_token += 1;
    }

    /// Append one public event.
    pub(crate) fn push_event(&mut self, event: PublicEvent) {
        self.events.push(event);
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_empty_setup() {
        let s = MatchState::new();
        assert_eq!(s.phase(), Phase::Setup);
        assert_eq!(s.round(), 1);
        assert!(s.players().is_empty());
        assert!(s.events().is_empty());
        assert!(s.winner().is_none());
    }

    #[test]
    fn phase_change_invalidates_narration() {
        let mut s = MatchState::new();
        s.narration = Some("old words".to_string());
        let token = s.narration_token();
        s.set_phase(Phase::Night);
        assert!(s.narration().is_none());
        assert_eq!(s.narration_token(), token + 1);
    }

    #[test]
    fn recent_events_returns_newest_window() {
        let mut s = MatchState::new();
        for i in 0..5 {
            s.push_event(PublicEvent::public(Phase::Night, format!("event {i}")));
        }
        let recent = s.recent_events(3);
        assert_eq!(recent, vec!["event 2", "event 3", "event 4"]);
        assert_eq!(s.recent_events(10).len(), 5);
    }

    #[test]
    fn player_lookup_is_case_insensitive() {
        let mut s = MatchState::new();
        s.players.push(Player::new("Mira"));
        assert!(s.player_by_name("mira").is_some());
        assert!(s.player_by_name("MIRA").is_some());
        assert!(s.player_by_name("nobody").is_none());
    }
}
