use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod alerts;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "glowboard", version, about = "Glowboard daily schedule board")]
struct Cli {
    /// Schedule JSON to use instead of the configured one
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board for one instant
    Show {
        #[command(flatten)]
        when: commands::board::WhenArgs,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the next task to start
    Next {
        #[command(flatten)]
        when: commands::board::WhenArgs,
    },
    /// List the scheduled days
    Days,
    /// Check a schedule file
    Validate {
        /// Schedule file (defaults to the configured one)
        path: Option<PathBuf>,
    },
    /// Keep the board live, reading navigation commands from stdin
    Watch {
        /// Start on this weekday instead of today
        #[arg(long, value_parser = commands::board::parse_weekday)]
        day: Option<glowboard_core::Weekday>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GLOWBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let schedule = cli.schedule.as_deref();
    let result = match cli.command {
        Commands::Show { when, json } => commands::board::show(schedule, when, json),
        Commands::Next { when } => commands::board::next(schedule, when),
        Commands::Days => commands::board::days(schedule),
        Commands::Validate { path } => commands::validate::run(path.as_deref().or(schedule)),
        Commands::Watch { day } => commands::watch::run(schedule, day),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
