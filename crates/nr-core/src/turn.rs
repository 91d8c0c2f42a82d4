//! Pass-device turn ordering for the night phase.
//!
//! Every living player takes one serialized turn on the shared device,
//! special role or not, so the order of seats leaks nothing about who
//! holds which role. The sequencer owns only player ids and a cursor;
//! what each seat is shown is the session's business.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};

/// Where the current seat is in its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnStage {
    /// The device is being passed; show "pass to X" and wait.
    Handoff,
    /// The seat holder is acting in private.
    Acting,
    /// The action is confirmed; waiting to advance to the next seat.
    Acted,
}

/// One round's randomized pass-device ordering over the living players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnSequencer {
    order: Vec<PlayerId>,
    cursor: usize,
    stage: TurnStage,
}

impl TurnSequencer {
    /// Shuffle the living players into a fresh turn order.
    ///
    /// One shuffle per round; the order need not match earlier rounds.
    pub fn new(players: &[Player], rng: &mut StdRng) -> Self {
        let mut order: Vec<PlayerId> =
            players.iter().filter(|p| p.alive).map(|p| p.id).collect();
        order.shuffle(rng);
        Self {
            order,
            cursor: 0,
            stage: TurnStage::Handoff,
        }
    }

    /// The seat currently holding (or about to receive) the device.
    pub fn current(&self) -> Option<PlayerId> {
        self.order.get(self.cursor).copied()
    }

    /// The seat after the current one, for "pass to X" prompts.
    pub fn next_seat(&self) -> Option<PlayerId> {
        self.order.get(self.cursor + 1).copied()
    }

    /// Current stage of the current seat's turn.
    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    /// How many seats have fully completed their turn.
    pub fn seats_done(&self) -> usize {
        self.cursor
    }

    /// Total seats in this round's order.
    pub fn seat_count(&self) -> usize {
        self.order.len()
    }

    /// The handoff is confirmed; the seat holder starts acting.
    ///
    /// Returns false (and changes nothing) outside the handoff stage.
    pub fn begin_acting(&mut self) -> bool {
        if self.stage != TurnStage::Handoff || self.is_complete() {
            return false;
        }
        self.stage = TurnStage::Acting;
        true
    }

    /// The seat holder confirmed their action.
    ///
    /// Returns false (and changes nothing) outside the acting stage.
    pub fn finish_acting(&mut self) -> bool {
        if self.stage != TurnStage::Acting {
            return false;
        }
        self.stage = TurnStage::Acted;
        true
    }

    /// Move the cursor past an acted seat.
    ///
    /// Returns false unless the current seat has acted. Advancing past the
    /// last seat completes the sequence.
    pub fn advance(&mut self) -> bool {
        if self.stage != TurnStage::Acted {
            return false;
        }
        self.cursor += 1;
        self.stage = TurnStage::Handoff;
        true
    }

    /// Whether every seat has taken its turn.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn living(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(format!("p{i}"))).collect()
    }

    #[test]
    fn covers_every_living_player_exactly_once() {
        let mut players = living(6);
        players[2].alive = false;
        let mut rng = StdRng::seed_from_u64(1);
        let seq = TurnSequencer::new(&players, &mut rng);

        assert_eq!(seq.seat_count(), 5);
        let mut seen: Vec<PlayerId> = Vec::new();
        let mut seq = seq;
        while let Some(id) = seq.current() {
            assert!(!seen.contains(&id));
            seen.push(id);
            assert!(seq.begin_acting());
            assert!(seq.finish_acting());
            assert!(seq.advance());
        }
        assert_eq!(seen.len(), 5);
        assert!(!seen.iter().any(|id| *id == players[2].id));
    }

    #[test]
    fn stages_must_progress_in_order() {
        let players = living(4);
        let mut rng = StdRng::seed_from_u64(2);
        let mut seq = TurnSequencer::new(&players, &mut rng);

        // Cannot finish or advance before acting begins.
        assert!(!seq.finish_acting());
        assert!(!seq.advance());
        assert!(seq.begin_acting());
        // Cannot begin twice.
        assert!(!seq.begin_acting());
        assert!(!seq.advance());
        assert!(seq.finish_acting());
        assert!(seq.advance());
        assert_eq!(seq.stage(), TurnStage::Handoff);
        assert_eq!(seq.seats_done(), 1);
    }

    #[test]
    fn completion_after_last_seat() {
        let players = living(2);
        let mut rng = StdRng::seed_from_u64(3);
        let mut seq = TurnSequencer::new(&players, &mut rng);

        for _ in 0..2 {
            assert!(!seq.is_complete());
            seq.begin_acting();
            seq.finish_acting();
            seq.advance();
        }
        assert!(seq.is_complete());
        assert_eq!(seq.current(), None);
        assert!(!seq.begin_acting());
    }

    #[test]
    fn orders_vary_between_rounds() {
        let players = living(8);
        let mut rng = StdRng::seed_from_u64(4);
        let orders: Vec<Vec<PlayerId>> = (0..4)
            .map(|_| {
                let mut seq = TurnSequencer::new(&players, &mut rng);
                let mut order = Vec::new();
                while let Some(id) = seq.current() {
                    order.push(id);
                    seq.begin_acting();
                    seq.finish_acting();
                    seq.advance();
                }
                order
            })
            .collect();
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }
}
