//! SpaceScope Headless Simulation Harness
//!
//! Validates the chat, live-session and tracking logic without any UI.
//! Runs entirely in-process on a virtual clock; `--realtime` paces playback
//! against the wall clock instead of jumping ahead.
//!
//! Usage:
//!   cargo run -p spacescope-simtest -- check
//!   cargo run -p spacescope-simtest -- check --verbose
//!   cargo run -p spacescope-simtest -- --seed 7 live --event iss-stream --seconds 30
//!   cargo run -p spacescope-simtest -- track --city Tokyo
//!   cargo run -p spacescope-simtest -- chat
//!
//! Logging goes to stderr through `RUST_LOG` (default `warn`).

mod checks;
mod playback;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spacescope_core::prelude::*;
use tracing_subscriber::EnvFilter;

/// Seed used by `check` when none is given, so the sweep is reproducible.
const DEFAULT_CHECK_SEED: u64 = 42;

#[derive(Debug, Parser)]
#[command(name = "spacescope-simtest", version, about)]
struct Cli {
    /// TOML file overriding the default timings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the random source. Overrides `seed` in the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the validation sweep. Exits 1 on any failure.
    Check {
        #[arg(long)]
        verbose: bool,
        /// Print results as JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },
    /// Chat with the assistant over stdin.
    Chat {
        #[arg(long)]
        realtime: bool,
    },
    /// Play back a live event.
    Live {
        #[arg(long)]
        event: String,
        #[arg(long, default_value_t = 30)]
        seconds: u64,
        #[arg(long)]
        realtime: bool,
        /// Comments to post at the start of the session.
        #[arg(long = "comment")]
        comments: Vec<String>,
        /// Reactions to send at the start: rocket, star, heart, telescope.
        #[arg(long = "react")]
        reactions: Vec<String>,
        #[arg(long)]
        like: bool,
    },
    /// Play back the ISS tracker.
    Track {
        /// Print a pass prediction and telescope bearings for this city.
        #[arg(long)]
        city: Option<String>,
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Satellite filter chip: all, iss, communication, weather, research.
        #[arg(long, default_value = "all")]
        filter: String,
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;
    log::debug!("config: {config:?}");

    match cli.command {
        Command::Check { verbose, json } => run_check(&config, verbose, json),
        Command::Chat { realtime } => playback::chat(config, realtime),
        Command::Live {
            event,
            seconds,
            realtime,
            comments,
            reactions,
            like,
        } => playback::live(
            config,
            playback::LiveOptions {
                event: &event,
                seconds,
                realtime,
                comments: &comments,
                reactions: &reactions,
                like,
            },
        ),
        Command::Track {
            city,
            seconds,
            filter,
            realtime,
        } => playback::track(config, city.as_deref(), seconds, &filter, realtime),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig =
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

// ── Check ───────────────────────────────────────────────────────────────

fn run_check(config: &SimConfig, verbose: bool, json: bool) -> Result<()> {
    let seed = config.seed.unwrap_or(DEFAULT_CHECK_SEED);
    if !json {
        println!("=== SpaceScope Simulation Harness (seed {seed}) ===\n");
    }

    let results = checks::run_all(config, seed, verbose && !json, json);

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if json {
        let summary = serde_json::json!({
            "seed": seed,
            "passed": passed,
            "failed": failed,
            "results": results,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
