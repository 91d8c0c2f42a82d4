//! The phase state machine that owns and mutates the match state.
//!
//! All gameplay flows through [`GameEngine::apply`], one command at a
//! time, on a single logical thread. Out-of-phase or stale commands are
//! no-ops: a stale view of the shared device is expected input, not an
//! error. The engine therefore never panics on user input; assertions are
//! reserved for programmer contract violations.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::CoreError;
use crate::event::PublicEvent;
use crate::night::{self, Investigation};
use crate::phase::Phase;
use crate::player::{Player, PlayerId};
use crate::role::{Role, RoleDistribution, assign_roles};
use crate::state::MatchState;
use crate::turn::{TurnSequencer, TurnStage};
use crate::vote::{VoteOutcome, resolve_votes};
use crate::win;

/// Fewest players the setup flow will start a match with.
pub const MIN_PLAYERS: usize = 4;
/// Seats at the table.
pub const MAX_PLAYERS: usize = 12;

/// Engine policy knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible deals and turn orders. `None` seeds from
    /// the operating system.
    pub seed: Option<u64>,
    /// How often the guardian may shield themself per match.
    /// `None` removes the cap. A policy decision, not a rule of the game.
    pub self_protect_limit: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            self_protect_limit: Some(1),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set (or lift, with `None`) the guardian self-protection cap.
    pub fn with_self_protect_limit(mut self, limit: Option<u32>) -> Self {
        self.self_protect_limit = limit;
        self
    }
}

/// Every input the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seat a new player (setup only).
    AddPlayer {
        /// Display name, unique at the table.
        name: String,
    },
    /// Remove a seated player (setup only).
    RemovePlayer {
        /// The player to remove.
        id: PlayerId,
    },
    /// Attach cosmetic flavor text to a player (setup only).
    SetFlavor {
        /// The player to decorate.
        id: PlayerId,
        /// The display string; empty clears it.
        flavor: String,
    },
    /// Deal roles and show the distribution to the table.
    StartMatch,
    /// Leave the distribution screen for the private reveals.
    ProceedToReveal,
    /// A player has privately viewed their role.
    RevealRole {
        /// The player who looked.
        id: PlayerId,
    },
    /// Everyone has seen their role; night falls.
    BeginNight,
    /// The current seat confirmed the handoff and starts acting.
    BeginTurn,
    /// The current seat chose a target for their secret action.
    ChooseNightTarget {
        /// The chosen player.
        target: PlayerId,
    },
    /// The current seat confirmed their action.
    CompleteTurn,
    /// Move the device to the next seat.
    AdvanceTurn,
    /// All seats acted; resolve the night.
    ResolveNight,
    /// Leave the morning announcement.
    EndMorning,
    /// Close discussion and open the vote.
    EndDiscussion,
    /// A living player votes to eliminate another.
    CastVote {
        /// Who is voting.
        voter: PlayerId,
        /// Who they vote against.
        target: PlayerId,
    },
    /// Every living player has voted; resolve the vote.
    ResolveVotes,
    /// Narration text arrived for the phase tagged by `token`.
    NarrationReady {
        /// The phase token the request was issued under.
        token: u64,
        /// The narration text.
        text: String,
    },
    /// Play again with the same roster (endgame only).
    Rematch,
    /// Tear everything down and return to setup. Valid from any phase.
    Reset,
}

/// What [`GameEngine::apply`] did with a command.
#[derive(Debug)]
pub enum CommandOutcome {
    /// The transition ran and the state changed.
    Applied,
    /// A setup-level contract problem the integrator should surface.
    Rejected(CoreError),
    /// Out-of-phase, stale, or malformed input; state untouched.
    Ignored(&'static str),
}

impl CommandOutcome {
    /// Whether the command changed the state.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The authority over a single match.
///
/// Owns the one mutable [`MatchState`]; everything else reads snapshots.
pub struct GameEngine {
    state: MatchState,
    rng: StdRng,
    config: EngineConfig,
}

impl GameEngine {
    /// Create an engine with an empty table.
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            state: MatchState::new(),
            rng,
            config,
        }
    }

    /// Read-only view of the match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The seat currently holding the device during the night.
    pub fn current_actor(&self) -> Option<&Player> {
        let id = self.state.turn.as_ref()?.current()?;
        self.state.player(id)
    }

    /// The seer's private finding about a target. Side-effect-free;
    /// shown once to the acting seat and never persisted.
    pub fn investigate(&self, target: PlayerId) -> Option<Investigation> {
        night::investigate(&self.state.players, target)
    }

    /// Whether the guardian still has a self-protection left under the
    /// configured policy.
    pub fn can_self_protect(&self) -> bool {
        match self.config.self_protect_limit {
            Some(limit) => self.state.self_protects_used < limit,
            None => true,
        }
    }

    /// Apply one command to the state.
    ///
    /// This is the only mutation path. Commands that do not fit the
    /// current phase are ignored, never errors.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let outcome = self.dispatch(command);
        if let CommandOutcome::Ignored(reason) = &outcome {
            log::debug!("command ignored: {reason}");
        }
        outcome
    }

    fn dispatch(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::AddPlayer { name } => self.add_player(name),
            Command::RemovePlayer { id } => self.remove_player(id),
            Command::SetFlavor { id, flavor } => self.set_flavor(id, flavor),
            Command::StartMatch => self.start_match(),
            Command::ProceedToReveal => self.proceed_to_reveal(),
            Command::RevealRole { id } => self.reveal_role(id),
            Command::BeginNight => self.begin_night(),
            Command::BeginTurn => self.begin_turn(),
            Command::ChooseNightTarget { target } => self.choose_night_target(target),
            Command::CompleteTurn => self.complete_turn(),
            Command::AdvanceTurn => self.advance_turn(),
            Command::ResolveNight => self.resolve_night(),
            Command::EndMorning => self.end_morning(),
            Command::EndDiscussion => self.end_discussion(),
            Command::CastVote { voter, target } => self.cast_vote(voter, target),
            Command::ResolveVotes => self.resolve_votes(),
            Command::NarrationReady { token, text } => self.narration_ready(token, text),
            Command::Rematch => self.rematch(),
            Command::Reset => self.reset(),
        }
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    fn add_player(&mut self, name: String) -> CommandOutcome {
        if self.state.phase != Phase::Setup {
            return CommandOutcome::Ignored("players can only join during setup");
        }
        let name = name.trim().to_string();
        if name.is_empty() {
            return CommandOutcome::Ignored("empty player name");
        }
        if self.state.players.len() >= MAX_PLAYERS {
            return CommandOutcome::Rejected(CoreError::TableFull { max: MAX_PLAYERS });
        }
        if self.state.player_by_name(&name).is_some() {
            return CommandOutcome::Rejected(CoreError::DuplicateName(name));
        }
        self.state.players.push(Player::new(name));
        CommandOutcome::Applied
    }

    fn remove_player(&mut self, id: PlayerId) -> CommandOutcome {
        if self.state.phase != Phase::Setup {
            return CommandOutcome::Ignored("players can only leave during setup");
        }
        let Some(index) = self.state.players.iter().position(|p| p.id == id) else {
            return CommandOutcome::Rejected(CoreError::PlayerNotFound(id));
        };
        self.state.players.remove(index);
        CommandOutcome::Applied
    }

    fn set_flavor(&mut self, id: PlayerId, flavor: String) -> CommandOutcome {
        if self.state.phase != Phase::Setup {
            return CommandOutcome::Ignored("flavor is set during setup");
        }
        let Some(player) = self.state.players.iter_mut().find(|p| p.id == id) else {
            return CommandOutcome::Rejected(CoreError::PlayerNotFound(id));
        };
        player.flavor = if flavor.trim().is_empty() {
            None
        } else {
            Some(flavor)
        };
        CommandOutcome::Applied
    }

    fn start_match(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Setup {
            return CommandOutcome::Ignored("the match has already started");
        }
        let count = self.state.players.len();
        if count < MIN_PLAYERS {
            return CommandOutcome::Rejected(CoreError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                have: count,
            });
        }
        self.deal_roles();
        self.state.push_event(PublicEvent::public(
            Phase::Setup,
            "The village has gathered. Roles have been dealt in secret.",
        ));
        self.state.set_phase(Phase::RoleDistribution);
        CommandOutcome::Applied
    }

    /// Compute the distribution for the current roster and deal roles.
    fn deal_roles(&mut self) {
        let distribution = RoleDistribution::for_player_count(self.state.players.len());
        assign_roles(&distribution, &mut self.state.players, &mut self.rng);
        self.state.distribution = Some(distribution);
    }

    // -----------------------------------------------------------------------
    // Role reveal
    // -----------------------------------------------------------------------

    fn proceed_to_reveal(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::RoleDistribution {
            return CommandOutcome::Ignored("no distribution on screen");
        }
        self.state.set_phase(Phase::RoleReveal);
        CommandOutcome::Applied
    }

    fn reveal_role(&mut self, id: PlayerId) -> CommandOutcome {
        if self.state.phase != Phase::RoleReveal {
            return CommandOutcome::Ignored("roles are revealed during the reveal phase");
        }
        let Some(player) = self.state.players.iter_mut().find(|p| p.id == id) else {
            return CommandOutcome::Rejected(CoreError::PlayerNotFound(id));
        };
        if player.role_revealed {
            return CommandOutcome::Ignored("role already viewed");
        }
        player.role_revealed = true;
        CommandOutcome::Applied
    }

    fn begin_night(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::RoleReveal {
            return CommandOutcome::Ignored("night falls after the reveal");
        }
        if self.state.players.iter().any(|p| !p.role_revealed) {
            return CommandOutcome::Ignored("someone has not seen their role yet");
        }
        self.state.push_event(PublicEvent::public(
            Phase::RoleReveal,
            "Every player has seen their role. Night falls on the village.",
        ));
        self.enter_night();
        CommandOutcome::Applied
    }

    /// Shared entry into the night phase: fresh ledger, fresh turn order.
    fn enter_night(&mut self) {
        self.state.night.clear();
        self.state.turn = Some(TurnSequencer::new(&self.state.players, &mut self.rng));
        self.state.set_phase(Phase::Night);
    }

    // -----------------------------------------------------------------------
    // Night turns
    // -----------------------------------------------------------------------

    fn begin_turn(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Night {
            return CommandOutcome::Ignored("no night turn to begin");
        }
        match self.state.turn.as_mut() {
            Some(turn) => {
                if turn.begin_acting() {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Ignored("no handoff pending")
                }
            }
            None => CommandOutcome::Ignored("no handoff pending"),
        }
    }

    fn choose_night_target(&mut self, target: PlayerId) -> CommandOutcome {
        if self.state.phase != Phase::Night {
            return CommandOutcome::Ignored("night actions happen at night");
        }
        let Some(turn) = self.state.turn.as_ref() else {
            return CommandOutcome::Ignored("no turn in progress");
        };
        if turn.stage() != TurnStage::Acting {
            return CommandOutcome::Ignored("no seat is acting");
        }
        let Some(actor) = turn.current().and_then(|id| self.state.player(id)) else {
            return CommandOutcome::Ignored("no seat is acting");
        };
        let Some(role) = actor.role else {
            return CommandOutcome::Ignored("actor has no role");
        };
        if !self.state.player(target).is_some_and(|p| p.alive) {
            return CommandOutcome::Ignored("target is not a living player");
        }

        let acting_on_self = actor.id == target;
        match role {
            Role::Wolf | Role::Seer if acting_on_self => {
                CommandOutcome::Ignored("cannot target yourself")
            }
            Role::Guardian if acting_on_self && !self.can_self_protect() => {
                CommandOutcome::Ignored("self-protection already spent")
            }
            Role::Villager => CommandOutcome::Ignored("no secret action for this seat"),
            role => {
                if self.state.night.record(role, target) {
                    CommandOutcome::Applied
                } else {
                    // A later wolf acknowledges the pack's choice; the
                    // ledger entry stands.
                    CommandOutcome::Ignored("the pack has already chosen")
                }
            }
        }
    }

    fn complete_turn(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Night {
            return CommandOutcome::Ignored("no night turn to complete");
        }
        let Some(turn) = self.state.turn.as_ref() else {
            return CommandOutcome::Ignored("no turn in progress");
        };
        if turn.stage() != TurnStage::Acting {
            return CommandOutcome::Ignored("no seat is acting");
        }
        if let Some(actor) = turn.current().and_then(|id| self.state.player(id))
            && let Some(role) = actor.role
            && self.required_slot_empty(role)
        {
            return CommandOutcome::Ignored("a target must be chosen first");
        }
        // Checked above that a turn is in progress and acting.
        if self.state.turn.as_mut().is_some_and(TurnSequencer::finish_acting) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored("no seat is acting")
        }
    }

    /// Whether `role`'s ledger slot still needs a target before the seat
    /// may finish its turn.
    fn required_slot_empty(&self, role: Role) -> bool {
        match role {
            Role::Wolf => self.state.night.wolf_target().is_none(),
            Role::Seer => self.state.night.seer_target().is_none(),
            Role::Guardian => self.state.night.guardian_target().is_none(),
            Role::Villager => false,
        }
    }

    fn advance_turn(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Night {
            return CommandOutcome::Ignored("no night turn to advance");
        }
        match self.state.turn.as_mut() {
            Some(turn) => {
                if turn.advance() {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Ignored("current seat has not finished")
                }
            }
            None => CommandOutcome::Ignored("current seat has not finished"),
        }
    }

    fn resolve_night(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Night {
            return CommandOutcome::Ignored("nothing to resolve");
        }
        if !self.state.turn.as_ref().is_some_and(TurnSequencer::is_complete) {
            return CommandOutcome::Ignored("seats are still acting");
        }
        if !self.state.night.is_complete(&self.state.players) {
            // Resolution is refused outright; there is no partial state.
            return CommandOutcome::Ignored("the night ledger is incomplete");
        }

        // Count a self-protection before the roster changes.
        if let Some(ward) = self.state.night.guardian_target()
            && self
                .state
                .player(ward)
                .is_some_and(|p| p.is_living(Role::Guardian))
        {
            self.state.self_protects_used += 1;
        }

        let resolution = night::resolve_night(&self.state.night, &mut self.state.players);
        self.state.last_killed = resolution.killed;
        self.state.last_saved = resolution.saved;
        self.state
            .push_event(PublicEvent::public(Phase::Night, resolution.description));
        self.state.night.clear();
        self.state.turn = None;

        match win::evaluate(&self.state.players) {
            Some(winner) => {
                self.state.winner = Some(winner);
                self.state.set_phase(Phase::Endgame);
            }
            None => self.state.set_phase(Phase::Morning),
        }
        CommandOutcome::Applied
    }

    // -----------------------------------------------------------------------
    // Day
    // -----------------------------------------------------------------------

    fn end_morning(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Morning {
            return CommandOutcome::Ignored("it is not morning");
        }
        self.state.set_phase(Phase::Discussion);
        CommandOutcome::Applied
    }

    fn end_discussion(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Discussion {
            return CommandOutcome::Ignored("there is no discussion to close");
        }
        self.state.votes.clear();
        self.state.revote_count = 0;
        self.state.set_phase(Phase::Voting);
        CommandOutcome::Applied
    }

    fn cast_vote(&mut self, voter: PlayerId, target: PlayerId) -> CommandOutcome {
        if self.state.phase != Phase::Voting {
            return CommandOutcome::Ignored("voting is closed");
        }
        if !self.state.player(voter).is_some_and(|p| p.alive) {
            return CommandOutcome::Ignored("voter is not a living player");
        }
        if !self.state.player(target).is_some_and(|p| p.alive) {
            return CommandOutcome::Ignored("target is not a living player");
        }
        if voter == target {
            return CommandOutcome::Ignored("players cannot vote for themselves");
        }
        self.state.votes.cast(voter, target);
        CommandOutcome::Applied
    }

    fn resolve_votes(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Voting {
            return CommandOutcome::Ignored("nothing to resolve");
        }
        let living = self.state.living_count();
        if self.state.votes.count() < living {
            return CommandOutcome::Ignored("waiting for every living player to vote");
        }

        match resolve_votes(&self.state.votes, living, self.state.revote_count) {
            VoteOutcome::Revote => {
                self.state.votes.clear();
                self.state.revote_count += 1;
                // Same round, same phase: the table simply votes again.
            }
            VoteOutcome::Deadlock => {
                self.state.push_event(PublicEvent::public(
                    Phase::Voting,
                    "The vote ended in a tie again. No one was eliminated.",
                ));
                self.state.last_voted_out = None;
                self.next_round();
            }
            VoteOutcome::NoMajority => {
                self.state.push_event(PublicEvent::public(
                    Phase::Voting,
                    "No majority was reached. No one was eliminated.",
                ));
                self.state.last_voted_out = None;
                self.next_round();
            }
            VoteOutcome::Eliminated(id) => {
                let description = match self.state.players.iter_mut().find(|p| p.id == id) {
                    Some(player) => {
                        player.alive = false;
                        let role = player.role.map(|r| r.to_string()).unwrap_or_default();
                        format!("{} was voted out. They were a {}.", player.name, role)
                    }
                    None => "The vote fell on an empty chair.".to_string(),
                };
                self.state.push_event(PublicEvent::public(Phase::Voting, description));
                self.state.last_voted_out = Some(id);

                match win::evaluate(&self.state.players) {
                    Some(winner) => {
                        self.state.votes.clear();
                        self.state.revote_count = 0;
                        self.state.winner = Some(winner);
                        self.state.set_phase(Phase::Endgame);
                    }
                    None => self.next_round(),
                }
            }
        }
        CommandOutcome::Applied
    }

    /// Leave the voting phase into the next night. The round counter
    /// increments here and nowhere else.
    fn next_round(&mut self) {
        self.state.votes.clear();
        self.state.revote_count = 0;
        self.state.round += 1;
        self.enter_night();
    }

    // -----------------------------------------------------------------------
    // Narration overlay
    // -----------------------------------------------------------------------

    fn narration_ready(&mut self, token: u64, text: String) -> CommandOutcome {
        if token != self.state.narration_token {
            // The engine has moved on; the response is for a dead phase.
            return CommandOutcome::Ignored("stale narration discarded");
        }
        self.state.narration = Some(text);
        CommandOutcome::Applied
    }

    // -----------------------------------------------------------------------
    // Reset & rematch
    // -----------------------------------------------------------------------

    fn rematch(&mut self) -> CommandOutcome {
        if self.state.phase != Phase::Endgame {
            return CommandOutcome::Ignored("the match is still running");
        }
        let mut players = std::mem::take(&mut self.state.players);
        for player in &mut players {
            player.alive = true;
            player.role = None;
            player.role_revealed = false;
        }
        self.state = MatchState::new();
        self.state.players = players;
        self.deal_roles();
        self.state.push_event(PublicEvent::public(
            Phase::Setup,
            "The village gathers again. Roles have been dealt in secret.",
        ));
        self.state.set_phase(Phase::RoleDistribution);
        CommandOutcome::Applied
    }

    fn reset(&mut self) -> CommandOutcome {
        self.state = MatchState::new();
        CommandOutcome::Applied
    }
}
