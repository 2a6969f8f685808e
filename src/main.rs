//! The Snake entry point
//!
//! Headless driver: the autopilot plays while frames go to the terminal,
//! to stdout as JSON lines, or nowhere.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;

use the_snake::Settings;
use the_snake::input::Autopilot;
use the_snake::render::{AsciiRenderer, FrameSink, JsonLinesSink, NullSink};
use the_snake::runner::{FixedStep, RunSummary, Runner};
use the_snake::sim::{GameState, ResetPolicy};

#[derive(Parser)]
#[command(name = "the-snake")]
#[command(version, about = "Toroidal Snake with a beneficial and a harmful item")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Pace ticks at the configured rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Frame output
    #[arg(long, value_enum, default_value = "ascii")]
    render: RenderMode,

    /// Where the snake restarts after hitting itself: center or in-place
    #[arg(long, value_parser = parse_reset_policy)]
    reset_policy: Option<ResetPolicy>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderMode {
    Ascii,
    Json,
    None,
}

fn parse_reset_policy(s: &str) -> Result<ResetPolicy, String> {
    ResetPolicy::from_str(s).ok_or_else(|| format!("unknown reset policy `{s}` (center, in-place)"))
}

/// Ticks to run when flat out with no explicit limit
const DEFAULT_HEADLESS_TICKS: u64 = 1_000;

fn run<S: FrameSink>(cli: &Cli, settings: &Settings, state: GameState, sink: S) -> Result<RunSummary> {
    let mut runner = Runner::new(state, Autopilot::new(), sink);
    let summary = if cli.realtime {
        let clock = FixedStep::new(settings.tick_interval());
        runner.run_realtime(clock, cli.ticks)?
    } else {
        runner.run_ticks(cli.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS))?
    };
    Ok(summary)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref())
        .context("could not load settings")?;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(policy) = cli.reset_policy {
        settings.reset_policy = policy;
    }

    let grid = settings.grid().context("invalid board settings")?;
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "The Snake starting: {}x{} board, {} ticks/s, seed {}",
        grid.width,
        grid.height,
        settings.ticks_per_second,
        seed
    );

    let state = GameState::new(seed, grid, settings.reset_policy)
        .context("could not place the starting items")?;

    let summary = match cli.render {
        RenderMode::Ascii => {
            let sink = AsciiRenderer::new(io::stdout().lock())
                .with_color(cli.realtime)
                .with_clear(cli.realtime);
            run(&cli, &settings, state, sink)?
        }
        RenderMode::Json => run(&cli, &settings, state, JsonLinesSink::new(io::stdout().lock()))?,
        RenderMode::None => run(&cli, &settings, state, NullSink)?,
    };

    log::info!(
        "Finished after {} ticks: score {}, best {}, {} eaten, {} poisoned, {} resets",
        summary.ticks,
        summary.score,
        summary.best_score,
        summary.beneficial_eaten,
        summary.harmful_eaten,
        summary.resets
    );
    Ok(())
}
