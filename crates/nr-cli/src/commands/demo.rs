use colored::Colorize;

use nr_core::{
    Command, EngineConfig, GameEngine, MAX_PLAYERS, MIN_PLAYERS, Phase, PlayerId, Role,
};

use super::DEMO_NAMES;

/// Scripted seats: the wolves always eat the first living non-wolf, the
/// seer investigates the prey, the guardian shields the first living
/// player other than themself, and the day vote piles onto the first
/// living player. Deterministic for a given seed.
pub fn run(seed: u64, players: usize) -> Result<(), String> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(format!(
            "tables seat {MIN_PLAYERS} to {MAX_PLAYERS} players, not {players}"
        ));
    }

    let mut engine = GameEngine::new(EngineConfig::default().with_seed(seed));
    for name in &DEMO_NAMES[..players] {
        engine.apply(Command::AddPlayer {
            name: (*name).to_string(),
        });
    }
    engine.apply(Command::StartMatch);

    println!(
        "  {} a {players}-player match (seed {seed})",
        "Dealing".bold()
    );
    let dist = *engine.state().distribution().expect("roles are dealt");
    println!(
        "  {} wolves, {} seers, {} guardians, {} villagers\n",
        dist.wolves, dist.seers, dist.guardians, dist.villagers
    );

    engine.apply(Command::ProceedToReveal);
    let ids: Vec<PlayerId> = engine.state().players().iter().map(|p| p.id).collect();
    for id in ids {
        engine.apply(Command::RevealRole { id });
    }
    engine.apply(Command::BeginNight);

    let mut printed = print_new_events(&engine, 0);
    let mut guard = 0;
    while engine.state().phase() != Phase::Endgame {
        guard += 1;
        if guard > 40 {
            return Err("the demo match failed to terminate".to_string());
        }

        println!("{}", format!("--- Night {} ---", engine.state().round()).bold());
        run_night(&mut engine);
        printed = print_new_events(&engine, printed);
        if engine.state().phase() == Phase::Endgame {
            break;
        }

        engine.apply(Command::EndMorning);
        engine.apply(Command::EndDiscussion);
        println!("{}", format!("--- Vote, round {} ---", engine.state().round()).bold());
        run_vote(&mut engine);
        printed = print_new_events(&engine, printed);
    }

    let winner = engine.state().winner().expect("the endgame has a winner");
    println!("\n  {}!", winner.to_string().bold());
    for p in engine.state().players() {
        let role = p.role.map(|r| r.to_string()).unwrap_or_default();
        let fate = if p.alive { "survived" } else { "dead" };
        println!("  {} — {role} ({fate})", p.name);
    }

    Ok(())
}

/// Walk every seat through one night and resolve it.
fn run_night(engine: &mut GameEngine) {
    let mut order: Vec<String> = Vec::new();
    while engine.state().turn().is_some_and(|t| !t.is_complete()) {
        engine.apply(Command::BeginTurn);
        let actor = engine.current_actor().cloned().expect("a seat is acting");
        order.push(actor.name.clone());

        match actor.role.expect("roles are dealt") {
            Role::Wolf => {
                if let Some(prey) = first_living(engine, |p| p.role != Some(Role::Wolf)) {
                    engine.apply(Command::ChooseNightTarget { target: prey });
                }
            }
            Role::Seer => {
                // Anyone but themself.
                let target = first_living(engine, |p| {
                    p.id != actor.id && p.role != Some(Role::Wolf)
                })
                .or_else(|| first_living(engine, |p| p.id != actor.id));
                if let Some(target) = target {
                    engine.apply(Command::ChooseNightTarget { target });
                }
            }
            Role::Guardian => {
                if let Some(ward) = first_living(engine, |p| p.id != actor.id) {
                    engine.apply(Command::ChooseNightTarget { target: ward });
                }
            }
            Role::Villager => {}
        }
        engine.apply(Command::CompleteTurn);
        engine.apply(Command::AdvanceTurn);
    }
    println!("  The device makes its rounds: {}", order.join(" → "));
    engine.apply(Command::ResolveNight);
}

/// Every living player votes for the first living player (who votes for
/// the second), then the vote resolves.
fn run_vote(engine: &mut GameEngine) {
    let living: Vec<PlayerId> = engine.state().living().iter().map(|p| p.id).collect();
    let target = living[0];
    for voter in &living[1..] {
        engine.apply(Command::CastVote {
            voter: *voter,
            target,
        });
    }
    engine.apply(Command::CastVote {
        voter: target,
        target: living[1],
    });
    engine.apply(Command::ResolveVotes);
}

fn first_living(engine: &GameEngine, pred: impl Fn(&nr_core::Player) -> bool) -> Option<PlayerId> {
    engine
        .state()
        .living()
        .into_iter()
        .find(|p| pred(p))
        .map(|p| p.id)
}

fn print_new_events(engine: &GameEngine, from: usize) -> usize {
    let events = engine.state().events();
    for event in &events[from..] {
        println!("  {} {}", "•".dimmed(), event.description);
    }
    events.len()
}
