//! CLI frontend for Nachtrat.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nachtrat",
    about = "Nachtrat — a narrated social-deduction party game for one shared device",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive match on this terminal (the shared device)
    Play {
        /// RNG seed for reproducible deals and turn orders
        #[arg(short, long)]
        seed: Option<u64>,

        /// Narrator mode: family, adult, or unhinged
        #[arg(short, long, default_value = "family")]
        mode: String,

        /// Table theme woven into the narration
        #[arg(short, long)]
        theme: Option<String>,

        /// Seat players up front, comma-separated
        #[arg(short, long)]
        players: Option<String>,

        /// Suggested discussion length in seconds (presentational only)
        #[arg(long)]
        discussion_secs: Option<u32>,
    },

    /// Show the role distribution for a table size
    Roles {
        /// Number of players (4-12)
        count: usize,
    },

    /// Run a scripted, seeded match and print the public record
    Demo {
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of players (4-12)
        #[arg(short, long, default_value = "7")]
        players: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            mode,
            theme,
            players,
            discussion_secs,
        } => commands::play::run(seed, &mode, theme.as_deref(), players.as_deref(), discussion_secs),
        Commands::Roles { count } => commands::roles::run(count),
        Commands::Demo { seed, players } => commands::demo::run(seed, players),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
