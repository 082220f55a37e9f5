//! # Loadcalc CLI Application
//!
//! Terminal front end for the guided NEC Article 220 calculators: list the
//! scenario catalog, print a solved worksheet, or walk through a scenario
//! step by step with progress saved after every accepted answer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "loadcalc", version, about = "Guided NEC Article 220 service load calculations")]
struct Cli {
    /// Config file path (defaults to ./loadcalc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog scenarios
    List,

    /// Print the answer key for a scenario
    Solve {
        /// Scenario id (see `list`)
        scenario: String,

        /// Emit the worksheet as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk through a scenario step by step
    Run {
        /// Scenario id (see `list`)
        scenario: String,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Continue a saved walkthrough
    Resume {
        /// Snapshot file (defaults to the configured snapshot path)
        path: Option<PathBuf>,

        #[command(flatten)]
        walk: WalkArgs,
    },
}

#[derive(clap::Args)]
struct WalkArgs {
    /// Disable `?` hints
    #[arg(long)]
    no_hints: bool,

    /// Reveal the answer after this many wrong attempts (0 = never)
    #[arg(long)]
    reveal_after: Option<u32>,

    /// Where to save progress
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl WalkArgs {
    fn apply(&self, config: &mut Config) {
        if self.no_hints {
            config.show_hints = false;
        }
        if let Some(n) = self.reveal_after {
            config.reveal_after_attempts = n;
        }
        if let Some(path) = &self.snapshot {
            config.snapshot_path = path.clone();
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config);

    match cli.command {
        Commands::List => commands::list::execute(),
        Commands::Solve { scenario, json } => commands::solve::execute(&scenario, json),
        Commands::Run { scenario, walk } => {
            walk.apply(&mut config);
            commands::run::execute(&scenario, &config)
        }
        Commands::Resume { path, walk } => {
            walk.apply(&mut config);
            let path = path.unwrap_or_else(|| config.snapshot_path.clone());
            commands::run::resume(&path, &config)
        }
    }
}
