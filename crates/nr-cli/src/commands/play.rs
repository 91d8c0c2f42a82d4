use std::io::{self, BufRead, Write};

use colored::Colorize;

use nr_narrator::NarratorMode;
use nr_party::{PartyConfig, PartySession};

pub fn run(
    seed: Option<u64>,
    mode: &str,
    theme: Option<&str>,
    players: Option<&str>,
    discussion_secs: Option<u32>,
) -> Result<(), String> {
    let mode = NarratorMode::parse(mode)
        .ok_or_else(|| format!("unknown narrator mode '{mode}' (family, adult, unhinged)"))?;

    let mut config = PartyConfig::default().with_mode(mode);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(theme) = theme {
        config = config.with_theme(theme);
    }
    if let Some(secs) = discussion_secs {
        config = config.with_discussion_secs(secs);
    }

    let mut session = PartySession::new(config);

    println!("  {} Nachtrat", "Starting".bold());
    println!("  One device, many secrets. Narrator mode: {mode}");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    if let Some(list) = players {
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match session.process(&format!("add {name}")) {
                Ok(output) => println!("{output}"),
                Err(e) => println!("{}", e.to_string().yellow()),
            }
        }
        println!();
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
