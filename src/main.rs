use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use torus_snake::game::{Difficulty, GameConfig, GameEngine};
use torus_snake::input::{DEFAULT_SWIPE_THRESHOLD, SwipeTracker};
use torus_snake::modes::PlayMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Snake on a wrap-around field, in your terminal")]
struct Cli {
    /// Speed of the first run (can be changed between runs with 1-3)
    #[arg(long, value_enum, default_value = "easy")]
    difficulty: Speed,

    /// Side length of the square field
    #[arg(long, default_value = "20")]
    field_size: usize,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum mouse drag, in terminal cells, that counts as a swipe
    #[arg(long, default_value_t = DEFAULT_SWIPE_THRESHOLD)]
    swipe_threshold: u16,

    /// Write logs here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    /// 180ms per tick
    Easy,
    /// 100ms per tick
    Medium,
    /// 60ms per tick
    Hard,
}

impl From<Speed> for Difficulty {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Easy => Difficulty::Easy,
            Speed::Medium => Difficulty::Medium,
            Speed::Hard => Difficulty::Hard,
        }
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("Failed to install log subscriber")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::new(cli.field_size).with_difficulty(cli.difficulty.into());
    config.validate().context("Invalid game configuration")?;

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .context("Failed to create game engine")?;

    tracing::info!(seed = ?cli.seed, "starting terminal session");

    let mut play_mode = PlayMode::new(engine, SwipeTracker::new(cli.swipe_threshold));
    play_mode.run().await
}
