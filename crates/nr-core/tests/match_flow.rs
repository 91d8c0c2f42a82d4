//! End-to-end scenarios across the phase machine: a protected night, a
//! majority elimination, and a vote that deadlocks through its revote.

use nr_core::{
    Command, EngineConfig, GameEngine, Phase, PlayerId, Role, TurnStage,
};

/// Seat `names`, deal roles, and walk through the reveal into the first
/// night.
fn start_match(names: &[&str], seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(EngineConfig::default().with_seed(seed));
    for name in names {
        assert!(
            engine
                .apply(Command::AddPlayer { name: (*name).to_string() })
                .is_applied(),
            "failed to seat {name}"
        );
    }
    assert!(engine.apply(Command::StartMatch).is_applied());
    assert!(engine.apply(Command::ProceedToReveal).is_applied());
    let ids: Vec<PlayerId> = engine.state().players().iter().map(|p| p.id).collect();
    for id in ids {
        assert!(engine.apply(Command::RevealRole { id }).is_applied());
    }
    assert!(engine.apply(Command::BeginNight).is_applied());
    engine
}

/// Drive every seat through the night. The wolves target `prey`; the
/// guardian protects `ward`; the seer investigates `prey`.
fn drive_night(engine: &mut GameEngine, prey: PlayerId, ward: PlayerId) {
    while engine.state().turn().is_some_and(|t| !t.is_complete()) {
        assert!(engine.apply(Command::BeginTurn).is_applied());
        assert_eq!(engine.state().turn().unwrap().stage(), TurnStage::Acting);

        let actor = engine.current_actor().cloned().expect("an acting seat");
        match actor.role.expect("roles are dealt") {
            Role::Wolf => {
                engine.apply(Command::ChooseNightTarget { target: prey });
            }
            Role::Seer => {
                let finding = engine.investigate(prey).expect("prey is seated");
                assert!(!finding.is_wolf);
                engine.apply(Command::ChooseNightTarget { target: prey });
            }
            Role::Guardian => {
                engine.apply(Command::ChooseNightTarget { target: ward });
            }
            Role::Villager => {}
        }
        assert!(engine.apply(Command::CompleteTurn).is_applied());
        assert!(engine.apply(Command::AdvanceTurn).is_applied());
    }
    assert!(engine.apply(Command::ResolveNight).is_applied());
}

/// The first living villager, guaranteed a valid target for everyone.
fn first_villager(engine: &GameEngine) -> PlayerId {
    engine
        .state()
        .living()
        .iter()
        .find(|p| p.role == Some(Role::Villager))
        .map(|p| p.id)
        .expect("a living villager")
}

#[test]
fn protected_night_then_round_increments_after_vote() {
    let mut engine = start_match(&["Ada", "Ben", "Cleo", "Dora", "Eli"], 5);
    assert_eq!(engine.state().round(), 1);

    // Wolves and guardian converge on the same villager: nobody dies.
    let prey = first_villager(&engine);
    drive_night(&mut engine, prey, prey);

    assert_eq!(engine.state().phase(), Phase::Morning);
    assert_eq!(engine.state().living_count(), 5);
    assert_eq!(engine.state().last_saved(), Some(prey));
    assert_eq!(engine.state().last_killed(), None);
    let morning_event = engine.state().events().last().unwrap();
    assert!(morning_event.description.contains("Nobody died"));
    // No role leaks through the protection announcement.
    assert!(!morning_event.description.contains("Villager"));

    // The round holds through morning, discussion, and voting...
    assert!(engine.apply(Command::EndMorning).is_applied());
    assert_eq!(engine.state().round(), 1);
    assert!(engine.apply(Command::EndDiscussion).is_applied());
    assert_eq!(engine.state().round(), 1);

    // ...and increments only once the vote resolves.
    let living: Vec<PlayerId> = engine.state().living().iter().map(|p| p.id).collect();
    let scapegoat = living[0];
    for voter in &living[1..] {
        assert!(
            engine
                .apply(Command::CastVote { voter: *voter, target: scapegoat })
                .is_applied()
        );
    }
    assert!(
        engine
            .apply(Command::CastVote { voter: scapegoat, target: living[1] })
            .is_applied()
    );
    assert!(engine.apply(Command::ResolveVotes).is_applied());

    if engine.state().phase() == Phase::Night {
        assert_eq!(engine.state().round(), 2);
    } else {
        // The scapegoat happened to decide the match; the round holds.
        assert_eq!(engine.state().phase(), Phase::Endgame);
        assert_eq!(engine.state().round(), 1);
    }
}

#[test]
fn three_of_four_votes_eliminate_with_public_role_reveal() {
    let mut engine = start_match(&["Ada", "Ben", "Cleo", "Dora"], 21);

    // A quiet night first, so all four players survive into the vote.
    let prey = first_villager(&engine);
    drive_night(&mut engine, prey, prey);
    assert_eq!(engine.state().living_count(), 4);

    engine.apply(Command::EndMorning);
    engine.apply(Command::EndDiscussion);

    // Three of four living players gang up on one: floor(4/2) + 1 = 3.
    let living: Vec<PlayerId> = engine.state().living().iter().map(|p| p.id).collect();
    let (target, voters) = (living[0], &living[1..]);
    for voter in voters {
        engine.apply(Command::CastVote { voter: *voter, target });
    }
    engine.apply(Command::CastVote { voter: target, target: living[1] });

    let target_role = engine.state().player(target).unwrap().role.unwrap();
    let target_name = engine.state().player(target).unwrap().name.clone();
    assert!(engine.apply(Command::ResolveVotes).is_applied());

    assert!(!engine.state().player(target).unwrap().alive);
    assert_eq!(engine.state().last_voted_out(), Some(target));
    let event = engine.state().events().last().unwrap();
    assert!(event.description.contains(&target_name));
    assert!(event.description.contains(&target_role.to_string()));
}

#[test]
fn tie_revotes_once_then_forces_no_elimination() {
    let names = ["Ada", "Ben", "Cleo", "Dora", "Eli", "Fern", "Gus", "Hana"];
    let mut engine = start_match(&names, 8);

    // Quiet night: all eight survive, giving an even voter count.
    let prey = first_villager(&engine);
    drive_night(&mut engine, prey, prey);
    assert_eq!(engine.state().living_count(), 8);

    engine.apply(Command::EndMorning);
    engine.apply(Command::EndDiscussion);

    let living: Vec<PlayerId> = engine.state().living().iter().map(|p| p.id).collect();
    let cast_split_votes = |engine: &mut GameEngine| {
        // Two blocs of four: everyone votes across the aisle, 4–4.
        for (i, voter) in living.iter().enumerate() {
            let target = if i < 4 { living[7] } else { living[0] };
            assert!(
                engine
                    .apply(Command::CastVote { voter: *voter, target })
                    .is_applied()
            );
        }
    };

    cast_split_votes(&mut engine);
    assert!(engine.apply(Command::ResolveVotes).is_applied());
    // First tie: votes cleared, one revote, still voting, same round.
    assert_eq!(engine.state().phase(), Phase::Voting);
    assert_eq!(engine.state().revote_count(), 1);
    assert_eq!(engine.state().votes().count(), 0);
    assert_eq!(engine.state().round(), 1);

    cast_split_votes(&mut engine);
    assert!(engine.apply(Command::ResolveVotes).is_applied());
    // Second tie: forced no-elimination, next night, round increments.
    assert_eq!(engine.state().phase(), Phase::Night);
    assert_eq!(engine.state().revote_count(), 0);
    assert_eq!(engine.state().round(), 2);
    assert_eq!(engine.state().living_count(), 8);
    let event = engine.state().events().last().unwrap();
    assert!(event.description.contains("tie"));
    assert!(event.description.contains("No one was eliminated"));
}

#[test]
fn investigations_never_reach_the_public_feed() {
    let names = ["Ada", "Ben", "Cleo", "Dora", "Eli", "Fern", "Gus"];
    let mut engine = start_match(&names, 3);

    let prey = first_villager(&engine);
    drive_night(&mut engine, prey, prey);

    for event in engine.state().events() {
        assert!(event.is_public);
        assert!(!event.description.to_lowercase().contains("seer"));
        assert!(!event.description.to_lowercase().contains("investigat"));
    }
}
