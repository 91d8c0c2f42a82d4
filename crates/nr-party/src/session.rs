//! Pass-the-device session management.
//!
//! `PartySession` wraps the game engine and turns one line of input from
//! whoever is holding the device into the next screen of text. It owns
//! the collaborator seams: narration is fetched per phase change (with
//! the fixed fallback when the narrator fails), spoken through the voice
//! sink, and bios are formatted once at seating time. None of them ever
//! write game state.

use rand::SeedableRng;
use rand::rngs::StdRng;

use nr_core::{
    Command, CommandOutcome, EngineConfig, GameEngine, MatchState, Phase, Player, PlayerId, Role,
    TurnStage,
};
use nr_narrator::{
    BioFormatter, MutedVoice, NarrationRequest, Narrator, PlainBioFormatter, TemplateNarrator,
    VoiceSettings, VoiceSink, fallback_narration,
};

use crate::config::PartyConfig;
use crate::error::{PartyError, PartyResult};
use crate::filler::{FillerSignal, QuickSum};

/// How many recent public events the narrator gets to see.
const NARRATION_EVENT_WINDOW: usize = 3;

/// An interactive pass-the-device session.
pub struct PartySession {
    engine: GameEngine,
    config: PartyConfig,
    narrator: Box<dyn Narrator>,
    voice: Box<dyn VoiceSink>,
    voice_settings: VoiceSettings,
    bios: Box<dyn BioFormatter>,
    filler: Option<QuickSum>,
    rng: StdRng,
}

impl PartySession {
    /// Create a session with the built-in collaborators.
    pub fn new(config: PartyConfig) -> Self {
        let engine_config = EngineConfig {
            seed: config.seed,
            ..EngineConfig::default()
        };
        let rng = match config.seed {
            // Decorrelate the filler from the engine's deals.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(0x9e37_79b9)),
            None => StdRng::from_os_rng(),
        };
        Self {
            engine: GameEngine::new(engine_config),
            config,
            narrator: Box::new(TemplateNarrator::new()),
            voice: Box::new(MutedVoice),
            voice_settings: VoiceSettings::default(),
            bios: Box::new(PlainBioFormatter::new()),
            filler: None,
            rng,
        }
    }

    /// Swap in a narration collaborator.
    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Swap in a voice collaborator.
    pub fn with_voice(mut self, voice: Box<dyn VoiceSink>, settings: VoiceSettings) -> Self {
        self.voice = voice;
        self.voice_settings = settings;
        self
    }

    /// Swap in a bio-formatting collaborator.
    pub fn with_bios(mut self, bios: Box<dyn BioFormatter>) -> Self {
        self.bios = bios;
        self
    }

    /// Read-only view of the match state.
    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    /// Process a line of input and return the next screen of text.
    pub fn process(&mut self, input: &str) -> PartyResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = match trimmed.split_once(' ') {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "remove" => self.do_remove(rest),
            "theme" => self.do_theme(rest),
            "mode" => self.do_mode(rest),
            "begin" => self.do_begin(),
            "continue" => self.do_continue(),
            "reveal" => self.do_reveal(rest),
            "night" => self.do_night(),
            "pass" => self.do_pass(),
            "ready" => self.do_ready(),
            "pick" => self.do_pick(rest),
            "answer" => self.do_answer(rest),
            "done" => self.do_done(),
            "vote" => self.do_vote(rest),
            "tally" => self.do_tally(),
            "resolve" => self.do_resolve(),
            "rematch" => self.do_rematch(),
            "reset" => self.do_reset(),
            "status" => Ok(self.status_screen()),
            "events" => Ok(self.events_screen()),
            "export" => self.do_export(rest),
            "help" => Ok(self.help_screen()),
            "quit" | "q" => Ok("Good night.".to_string()),
            _ => Err(PartyError::UnknownCommand(trimmed.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    fn do_add(&mut self, rest: &str) -> PartyResult<String> {
        if rest.is_empty() {
            return Err(PartyError::InvalidChoice(
                "usage: add <name> [-- bio notes]".to_string(),
            ));
        }
        let (name, raw_bio) = match rest.split_once(" -- ") {
            Some((name, bio)) => (name.trim(), Some(bio.trim())),
            None => (rest, None),
        };

        match self.engine.apply(Command::AddPlayer { name: name.to_string() }) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }

        let mut output = format!(
            "{name} takes a seat. ({} at the table)",
            self.state().players().len()
        );
        if let Some(raw) = raw_bio {
            let flavor = self.bios.format(name, raw);
            if !flavor.is_empty() {
                let id = self.state().player_by_name(name).map(|p| p.id);
                if let Some(id) = id {
                    self.engine.apply(Command::SetFlavor { id, flavor });
                    output.push_str("\nTheir bio is on file for the narrator.");
                }
            }
        }
        Ok(output)
    }

    fn do_remove(&mut self, rest: &str) -> PartyResult<String> {
        let id = self.resolve_player(rest)?;
        match self.engine.apply(Command::RemovePlayer { id }) {
            CommandOutcome::Applied => Ok(format!("{rest} leaves the table.")),
            CommandOutcome::Rejected(e) => Err(e.into()),
            CommandOutcome::Ignored(reason) => Err(PartyError::InvalidChoice(reason.to_string())),
        }
    }

    fn do_theme(&mut self, rest: &str) -> PartyResult<String> {
        if rest.is_empty() {
            return Ok(format!("Theme: {}", self.config.theme));
        }
        self.config.theme = rest.to_string();
        Ok(format!("Theme set: {rest}"))
    }

    fn do_mode(&mut self, rest: &str) -> PartyResult<String> {
        match nr_narrator::NarratorMode::parse(rest) {
            Some(mode) => {
                self.config.mode = mode;
                Ok(format!("Narrator mode: {mode}"))
            }
            None => Err(PartyError::InvalidChoice(
                "usage: mode family|adult|unhinged".to_string(),
            )),
        }
    }

    fn do_begin(&mut self) -> PartyResult<String> {
        match self.engine.apply(Command::StartMatch) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }
        let narration = self.refresh_narration();
        Ok(format!(
            "{narration}\n\n{}",
            self.distribution_screen()
        ))
    }

    // -----------------------------------------------------------------------
    // Role reveal
    // -----------------------------------------------------------------------

    fn do_continue(&mut self) -> PartyResult<String> {
        match self.state().phase() {
            Phase::RoleDistribution => {
                self.engine.apply(Command::ProceedToReveal);
                let narration = self.refresh_narration();
                Ok(format!("{narration}\n\n{}", self.reveal_screen()))
            }
            Phase::Morning => {
                self.engine.apply(Command::EndMorning);
                let narration = self.refresh_narration();
                Ok(format!("{narration}\n\n{}", self.discussion_screen()))
            }
            _ => Err(PartyError::InvalidChoice(
                "nothing to continue right now".to_string(),
            )),
        }
    }

    fn do_reveal(&mut self, rest: &str) -> PartyResult<String> {
        let id = self.resolve_player(rest)?;
        match self.engine.apply(Command::RevealRole { id }) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }

        let player = self.state().player(id).cloned().expect("just revealed");
        let viewed = self
            .state()
            .players()
            .iter()
            .filter(|p| p.role_revealed)
            .count();
        let total = self.state().players().len();

        let mut output = self.role_card(&player);
        output.push_str(&format!(
            "\n\nMemorize it, then pass the device back. ({viewed}/{total} viewed)"
        ));
        if viewed == total {
            output.push_str("\nEveryone has looked. Type night to begin the first night.");
        }
        Ok(output)
    }

    fn do_night(&mut self) -> PartyResult<String> {
        match self.engine.apply(Command::BeginNight) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }
        let narration = self.refresh_narration();
        Ok(format!("{narration}\n\n{}", self.handoff_prompt()))
    }

    // -----------------------------------------------------------------------
    // Night turns
    // -----------------------------------------------------------------------

    fn do_pass(&mut self) -> PartyResult<String> {
        if self.state().phase() != Phase::Night {
            return Err(PartyError::InvalidChoice(
                "there is no device to pass right now".to_string(),
            ));
        }
        let stage = self.state().turn().map(|t| t.stage());
        match stage {
            Some(TurnStage::Acted) => {
                self.engine.apply(Command::AdvanceTurn);
                self.filler = None;
                if self.state().turn().is_some_and(|t| t.is_complete()) {
                    self.resolve_night()
                } else {
                    Ok(self.handoff_prompt())
                }
            }
            Some(TurnStage::Handoff) => Ok(self.handoff_prompt()),
            Some(TurnStage::Acting) => Err(PartyError::InvalidChoice(
                "the current seat is still acting; finish with done".to_string(),
            )),
            None => Err(PartyError::InvalidChoice("the night is over".to_string())),
        }
    }

    fn do_ready(&mut self) -> PartyResult<String> {
        if !matches!(
            self.engine.apply(Command::BeginTurn),
            CommandOutcome::Applied
        ) {
            return Err(PartyError::InvalidChoice(
                "no handoff is waiting for confirmation".to_string(),
            ));
        }
        let actor = self.engine.current_actor().cloned().expect("a seat is acting");
        Ok(self.action_screen(&actor))
    }

    fn do_pick(&mut self, rest: &str) -> PartyResult<String> {
        let actor = self
            .engine
            .current_actor()
            .cloned()
            .ok_or_else(|| PartyError::InvalidChoice("no seat is acting".to_string()))?;
        let target = self.resolve_player(rest)?;

        match self.engine.apply(Command::ChooseNightTarget { target }) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }

        let target_name = self
            .state()
            .player(target)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let output = match actor.role {
            Some(Role::Seer) => {
                let finding = self.engine.investigate(target).expect("target is seated");
                let verdict = if finding.is_wolf {
                    format!("{} runs with the wolves!", finding.target_name)
                } else {
                    format!("{} is not a wolf.", finding.target_name)
                };
                format!(
                    "{verdict}\nRemember this — it will not be shown again.\nType done."
                )
            }
            Some(Role::Wolf) => format!("The pack closes in on {target_name}. Type done."),
            Some(Role::Guardian) => format!("You will watch over {target_name} tonight. Type done."),
            _ => "Noted. Type done.".to_string(),
        };
        Ok(output)
    }

    fn do_answer(&mut self, rest: &str) -> PartyResult<String> {
        let guess: u32 = rest
            .parse()
            .map_err(|_| PartyError::InvalidChoice("usage: answer <number>".to_string()))?;
        let Some(task) = self.filler.as_mut() else {
            return Err(PartyError::InvalidChoice("no task on screen".to_string()));
        };
        match task.answer(guess) {
            FillerSignal::Complete => {
                self.filler = None;
                Ok("Task complete. Type done.".to_string())
            }
            FillerSignal::TryAgain => Ok(format!("Not quite. {}", task.prompt())),
        }
    }

    fn do_done(&mut self) -> PartyResult<String> {
        if self.filler.is_some() {
            return Err(PartyError::InvalidChoice(
                "finish the task on screen first".to_string(),
            ));
        }
        match self.engine.apply(Command::CompleteTurn) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(e) => return Err(e.into()),
            CommandOutcome::Ignored(reason) => {
                return Err(PartyError::InvalidChoice(reason.to_string()));
            }
        }
        let turn = self.state().turn().expect("a turn is running");
        let remaining = turn.seat_count() - turn.seats_done() - 1;
        if remaining == 0 {
            Ok("Turn confirmed. That was the last seat — type pass to end the night.".to_string())
        } else {
            Ok("Turn confirmed. Type pass to hand the device on.".to_string())
        }
    }

    fn resolve_night(&mut self) -> PartyResult<String> {
        if !matches!(
            self.engine.apply(Command::ResolveNight),
            CommandOutcome::Applied
        ) {
            return Err(PartyError::InvalidChoice(
                "the night is not finished yet".to_string(),
            ));
        }
        let narration = self.refresh_narration();
        let outcome = self
            .state()
            .events()
            .last()
            .map(|e| e.description.clone())
            .unwrap_or_default();

        match self.state().phase() {
            Phase::Endgame => Ok(format!("{outcome}\n\n{}", self.endgame_screen())),
            _ => Ok(format!(
                "--- Morning, round {} ---\n{outcome}\n\n{narration}\n\nType continue to open the discussion.",
                self.state().round()
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Day
    // -----------------------------------------------------------------------

    fn do_vote(&mut self, rest: &str) -> PartyResult<String> {
        match self.state().phase() {
            Phase::Discussion => {
                self.engine.apply(Command::EndDiscussion);
                let narration = self.refresh_narration();
                Ok(format!("{narration}\n\n{}", self.voting_screen()))
            }
            Phase::Voting => {
                if rest.is_empty() {
                    return Ok(self.voting_screen());
                }
                let (voter, target) = self.resolve_vote_pair(rest)?;
                match self.engine.apply(Command::CastVote { voter, target }) {
                    CommandOutcome::Applied => {
                        let cast = self.state().votes().count();
                        let living = self.state().living_count();
                        Ok(format!("Vote recorded. ({cast}/{living} cast)"))
                    }
                    CommandOutcome::Rejected(e) => Err(e.into()),
                    CommandOutcome::Ignored(reason) => {
                        Err(PartyError::InvalidChoice(reason.to_string()))
                    }
                }
            }
            _ => Err(PartyError::InvalidChoice(
                "there is no vote right now".to_string(),
            )),
        }
    }

    fn do_tally(&mut self) -> PartyResult<String> {
        if self.state().phase() != Phase::Voting {
            return Err(PartyError::InvalidChoice(
                "there is no vote right now".to_string(),
            ));
        }
        let tally = self.state().votes().tally();
        if tally.is_empty() {
            return Ok("No votes cast yet.".to_string());
        }
        let mut rows: Vec<(String, usize)> = tally
            .iter()
            .filter_map(|(id, n)| self.state().player(*id).map(|p| (p.name.clone(), *n)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut out = String::from("Current tally:\n");
        for (name, n) in rows {
            out.push_str(&format!("  {name}: {n}\n"));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_resolve(&mut self) -> PartyResult<String> {
        if self.state().phase() != Phase::Voting {
            return Err(PartyError::InvalidChoice(
                "there is no vote to resolve".to_string(),
            ));
        }
        let revotes_before = self.state().revote_count();
        if !matches!(
            self.engine.apply(Command::ResolveVotes),
            CommandOutcome::Applied
        ) {
            return Err(PartyError::InvalidChoice(
                "every living player must vote first".to_string(),
            ));
        }

        match self.state().phase() {
            Phase::Voting if self.state().revote_count() > revotes_before => Ok(
                "A tie! The votes are cleared and the village must vote again.".to_string(),
            ),
            Phase::Endgame => {
                let outcome = self
                    .state()
                    .events()
                    .last()
                    .map(|e| e.description.clone())
                    .unwrap_or_default();
                Ok(format!("{outcome}\n\n{}", self.endgame_screen()))
            }
            _ => {
                let outcome = self
                    .state()
                    .events()
                    .last()
                    .map(|e| e.description.clone())
                    .unwrap_or_default();
                let narration = self.refresh_narration();
                Ok(format!(
                    "{outcome}\n\n--- Night, round {} ---\n{narration}\n\n{}",
                    self.state().round(),
                    self.handoff_prompt()
                ))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Endgame
    // -----------------------------------------------------------------------

    fn do_rematch(&mut self) -> PartyResult<String> {
        if !matches!(self.engine.apply(Command::Rematch), CommandOutcome::Applied) {
            return Err(PartyError::InvalidChoice(
                "a rematch starts from the endgame".to_string(),
            ));
        }
        self.filler = None;
        let narration = self.refresh_narration();
        Ok(format!(
            "Same table, new secrets.\n\n{narration}\n\n{}",
            self.distribution_screen()
        ))
    }

    fn do_reset(&mut self) -> PartyResult<String> {
        self.engine.apply(Command::Reset);
        self.filler = None;
        Ok("Everything is cleared. Seat your players with add <name>.".to_string())
    }

    // -----------------------------------------------------------------------
    // Narration
    // -----------------------------------------------------------------------

    /// Fetch narration for the current phase and apply it to the state.
    ///
    /// The request is tagged with the current phase token; if the narrator
    /// is slow and the engine has moved on, the engine discards the stale
    /// response. On failure the fixed per-phase fallback is used instead.
    fn refresh_narration(&mut self) -> String {
        let state = self.engine.state();
        let request = NarrationRequest::for_phase(
            state.phase(),
            self.config.mode,
            self.config.theme.clone(),
        )
        .with_events(state.recent_events(NARRATION_EVENT_WINDOW))
        .with_winner(state.winner());
        let token = state.narration_token();

        let text = self.narrator.narrate(&request).unwrap_or_else(|e| {
            log::debug!("narrator failed, using fallback: {e}");
            fallback_narration(request.phase, request.winner, &request.instruction)
        });
        self.engine.apply(Command::NarrationReady {
            token,
            text: text.clone(),
        });
        self.voice.speak(&text, &self.voice_settings);
        text
    }

    // -----------------------------------------------------------------------
    // Screens
    // -----------------------------------------------------------------------

    fn distribution_screen(&self) -> String {
        let Some(dist) = self.state().distribution() else {
            return "No roles have been dealt.".to_string();
        };
        let mut out = String::from("Tonight's deal:\n");
        out.push_str(&format!("  Wolves: {}\n", dist.wolves));
        if dist.seers > 0 {
            out.push_str(&format!("  Seers: {}\n", dist.seers));
        }
        if dist.guardians > 0 {
            out.push_str(&format!("  Guardians: {}\n", dist.guardians));
        }
        out.push_str(&format!("  Villagers: {}\n", dist.villagers));
        out.push_str("\nType continue to begin the private reveals.");
        out
    }

    fn reveal_screen(&self) -> String {
        let mut out = String::from("Role reveal. One at a time, in private:\n");
        for p in self.state().players() {
            let mark = if p.role_revealed { "seen" } else { "waiting" };
            out.push_str(&format!("  {} [{mark}]\n", p.name));
        }
        out.push_str("\nType reveal <name> when that player alone holds the device.");
        out
    }

    fn role_card(&self, player: &Player) -> String {
        let role = player.role.expect("roles are dealt before the reveal");
        let mut out = format!("=== {} ===\nYou are a {role}.\n{}", player.name, role.blurb());
        if role == Role::Wolf {
            let packmates: Vec<&str> = self
                .state()
                .players()
                .iter()
                .filter(|p| p.role == Some(Role::Wolf) && p.id != player.id)
                .map(|p| p.name.as_str())
                .collect();
            if packmates.is_empty() {
                out.push_str("\nYou hunt alone.");
            } else {
                out.push_str(&format!("\nYour pack: {}", packmates.join(", ")));
            }
        }
        out
    }

    fn handoff_prompt(&self) -> String {
        let Some(turn) = self.state().turn() else {
            return "The night is over.".to_string();
        };
        let Some(current) = turn.current().and_then(|id| self.state().player(id)) else {
            return "All seats have acted. Type pass to end the night.".to_string();
        };
        format!(
            "Pass the device to {}. Make sure no one else can see the screen.\n\
             ({}/{} seats done) {} types ready when they have it.",
            current.name,
            turn.seats_done(),
            turn.seat_count(),
            current.name
        )
    }

    fn action_screen(&mut self, actor: &Player) -> String {
        let role = actor.role.expect("roles are dealt before night");
        let living: Vec<&str> = self
            .state()
            .living()
            .iter()
            .filter(|p| p.id != actor.id)
            .map(|p| p.name.as_str())
            .collect();
        let choices = living.join(", ");

        match role {
            Role::Wolf => {
                if let Some(prey) = self.state().night().wolf_target() {
                    let name = self
                        .state()
                        .player(prey)
                        .map(|p| p.name.clone())
                        .unwrap_or_default();
                    format!(
                        "You are a Wolf. The pack has already chosen: {name}.\n\
                         Acknowledge and type done."
                    )
                } else {
                    format!("You are a Wolf. Choose your prey: {choices}\nType pick <name>.")
                }
            }
            Role::Seer => {
                format!("You are the Seer. Investigate someone: {choices}\nType pick <name>.")
            }
            Role::Guardian => {
                let mut out = format!(
                    "You are the Guardian. Shield someone: {choices}\nType pick <name>."
                );
                if self.engine.can_self_protect() {
                    out.push_str("\nYou may also shield yourself.");
                }
                out
            }
            Role::Villager => {
                let task = QuickSum::deal(&mut self.rng);
                let prompt = task.prompt();
                self.filler = Some(task);
                format!(
                    "You are a Villager. While others act, solve this:\n  {prompt}\n\
                     Type answer <number>."
                )
            }
        }
    }

    fn discussion_screen(&self) -> String {
        let mut out = String::from("The village is awake. Discuss your suspicions.");
        if let Some(secs) = self.config.discussion_secs {
            out.push_str(&format!("\n(Suggested discussion time: {secs} seconds.)"));
        }
        out.push_str("\nType vote when the table is ready.");
        out
    }

    fn voting_screen(&self) -> String {
        let names: Vec<&str> = self
            .state()
            .living()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        let mut out = format!("Voting. Living players: {}\n", names.join(", "));
        if self.state().revote_count() > 0 {
            out.push_str("REVOTE — the previous vote was tied!\n");
        }
        out.push_str(
            "Each living player: vote <your name> <target>. A strict majority eliminates.\n\
             Type tally to see the count, resolve when everyone has voted.",
        );
        out
    }

    fn endgame_screen(&self) -> String {
        let narration = self
            .state()
            .narration()
            .map(str::to_string)
            .unwrap_or_default();
        let winner = self
            .state()
            .winner()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "The match is over".to_string());
        let mut out = format!("=== {winner}! ===\n\n{narration}\n\nFinal roles:\n");
        for p in self.state().players() {
            let role = p.role.map(|r| r.to_string()).unwrap_or_default();
            let fate = if p.alive { "survived" } else { "dead" };
            out.push_str(&format!("  {} — {role} ({fate})\n", p.name));
        }
        out.push_str("\nType rematch to play again with the same table, or reset to start over.");
        out
    }

    fn status_screen(&self) -> String {
        let state = self.state();
        let mut out = format!(
            "Phase: {}\nRound: {}\nLiving: {}/{}\n",
            state.phase(),
            state.round(),
            state.living_count(),
            state.players().len()
        );
        for p in state.players() {
            let fate = if p.alive { "" } else { " (dead)" };
            out.push_str(&format!("  {}{fate}\n", p.name));
        }
        if let Some(winner) = state.winner() {
            out.push_str(&format!("{winner}.\n"));
        }
        out.trim_end().to_string()
    }

    fn do_export(&self, format: &str) -> PartyResult<String> {
        match format.to_lowercase().as_str() {
            "json" => serde_json::to_string_pretty(self.state().events())
                .map_err(|e| PartyError::InvalidChoice(format!("export failed: {e}"))),
            "text" | "" => Ok(self.events_screen()),
            other => Err(PartyError::InvalidChoice(format!(
                "unknown format '{other}', use: json, text"
            ))),
        }
    }

    fn events_screen(&self) -> String {
        let events = self.state().events();
        if events.is_empty() {
            return "Nothing has happened yet.".to_string();
        }
        let mut out = String::from("Public record:\n");
        for e in events {
            out.push_str(&format!("  [{}] {}\n", e.phase, e.description));
        }
        out.trim_end().to_string()
    }

    fn help_screen(&self) -> String {
        "\
Setup:
  add <name> [-- bio]     Seat a player (bio is narrator flavor only)
  remove <name>           Remove a player
  theme <text>            Set the table theme
  mode family|adult|unhinged  Set the narrator mode
  begin                   Deal roles and start

Reveal:
  continue                Move from the deal to the private reveals
  reveal <name>           Show that player their role (privately!)
  night                   Begin the first night

Night (one seat at a time):
  pass                    Hand the device to the next seat
  ready                   Confirm the handoff and see your screen
  pick <name>             Choose your secret target
  answer <number>         Solve the idle task
  done                    Confirm your turn

Day:
  continue                Open the discussion
  vote                    Open the vote
  vote <voter> <target>   Cast a vote
  tally                   Show the current count
  resolve                 Close the vote

Anytime:
  status / events / help  Look around
  export [json|text]      Export the public record
  rematch                 Play again with the same table (endgame)
  reset                   Tear everything down
  quit                    Leave"
            .to_string()
    }

    // -----------------------------------------------------------------------
    // Lookup helpers
    // -----------------------------------------------------------------------

    fn resolve_player(&self, name: &str) -> PartyResult<PlayerId> {
        if name.is_empty() {
            return Err(PartyError::InvalidChoice("a player name is needed".to_string()));
        }
        self.state()
            .player_by_name(name)
            .map(|p| p.id)
            .ok_or_else(|| PartyError::InvalidChoice(format!("no player called {name}")))
    }

    /// Split "voter target" where either side may contain spaces, by
    /// finding the first split where both halves name seated players.
    fn resolve_vote_pair(&self, rest: &str) -> PartyResult<(PlayerId, PlayerId)> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        for i in 1..words.len() {
            let voter = words[..i].join(" ");
            let target = words[i..].join(" ");
            if let (Some(v), Some(t)) = (
                self.state().player_by_name(&voter),
                self.state().player_by_name(&target),
            ) {
                return Ok((v.id, t.id));
            }
        }
        Err(PartyError::InvalidChoice(
            "usage: vote <voter> <target>".to_string(),
        ))
    }
}
