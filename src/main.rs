//! Pong entry point
//!
//! Loads settings, builds the match and runs it either in the terminal or
//! headless.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::Rng;

use pong::driver::{self, IdleInput, RunSummary};
use pong::platform::{Pacer, TerminalHost};
use pong::renderer::{Canvas, CanvasRenderer};
use pong::sim::MatchState;
use pong::{InitError, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-player Pong in the terminal", long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Serve RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second (overrides settings)
    #[arg(long)]
    tick_rate: Option<u32>,
    /// Run this many ticks without a terminal and print a JSON summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
    /// With --headless, write the final frame as a PAM image
    #[arg(long, requires = "headless")]
    snapshot: Option<PathBuf>,
}

fn load_settings(cli: &Cli) -> Result<Settings, InitError> {
    let mut settings = Settings::load(cli.settings.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(rate) = cli.tick_rate {
        settings.tick_rate = rate;
    }
    settings.validate()?;
    Ok(settings)
}

fn interactive(state: &mut MatchState, settings: &Settings) -> Result<RunSummary, Box<dyn Error>> {
    let mut host = TerminalHost::new(settings.fallback_hold_ticks)?;
    let mut pacer = Pacer::new(settings.tick_rate);
    let summary = driver::run(state, &mut host.input, &mut host.screen, &mut pacer, None)?;
    Ok(summary)
}

fn headless(
    state: &mut MatchState,
    ticks: u64,
    snapshot: Option<&Path>,
) -> Result<RunSummary, Box<dyn Error>> {
    let mut renderer = CanvasRenderer::new(Canvas::logical());
    let summary = driver::run(
        state,
        &mut IdleInput,
        &mut renderer,
        &mut Pacer::unpaced(),
        Some(ticks),
    )?;

    if let Some(path) = snapshot {
        renderer.canvas().write_pam(BufWriter::new(File::create(path)?))?;
        log::info!("Wrote final frame to {}", path.display());
    }
    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Pong starting with seed {seed}");
    let mut state = MatchState::with_names(seed, settings.names());

    let result = match cli.headless {
        Some(ticks) => headless(&mut state, ticks, cli.snapshot.as_deref()),
        None => interactive(&mut state, &settings),
    };

    match result {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(err) => log::warn!("Could not serialize summary: {err}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
