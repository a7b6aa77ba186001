use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use grid_snake::config::{
    default_settings_path, load_settings_file, normalize_tick_delay, GameSettings, GridSize,
    MAX_GRID_SIDE, MIN_GRID_SIDE,
};
use grid_snake::error::GameError;
use grid_snake::game::GameState;
use grid_snake::game_loop::{self, SleepScheduler};
use grid_snake::input::CrosstermInput;
use grid_snake::terminal_runtime::{restore_terminal, TerminalSession};
use log::{error, LevelFilter};
use simplelog::{Config, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Milliseconds between ticks; -1 or any non-positive value uses the default.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    delay: i64,

    /// Add a greedy computer snake that races for the apple.
    #[arg(long = "with-opponent")]
    with_opponent: bool,

    /// Wrap around the walls instead of dying on them.
    #[arg(long = "no-clip")]
    no_clip: bool,

    /// Ignore 180° turns instead of letting the snake bite itself.
    #[arg(long = "reject-reversal")]
    reject_reversal: bool,

    /// Only the player's own moves into the opponent end the game.
    #[arg(long = "harmless-opponent")]
    harmless_opponent: bool,

    /// Board width including the wall ring.
    #[arg(long, value_parser = grid_side_parser())]
    width: Option<u16>,

    /// Board height including the wall ring.
    #[arg(long, value_parser = grid_side_parser())]
    height: Option<u16>,

    /// Seed for apple placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; defaults to settings.json in the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn grid_side_parser() -> clap::builder::RangedI64ValueParser<u16> {
    clap::value_parser!(u16).range(i64::from(MIN_GRID_SIDE)..=i64::from(MAX_GRID_SIDE))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        if let Err(error) = init_logging(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
        }
    }

    install_panic_hook();

    match run(&cli) {
        Ok(()) => {
            println!("Game Over");
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("{error}");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let (settings, bounds) = resolve_settings(cli, default_settings_path())?;
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(settings, bounds, seed)?,
        None => GameState::new(settings, bounds)?,
    };

    let mut session = TerminalSession::enter()?;
    let mut input = CrosstermInput;
    let mut scheduler = SleepScheduler::new(Duration::from_millis(settings.tick_delay_ms));

    game_loop::run(&mut state, &mut input, &mut session, &mut scheduler)
}

/// Layers defaults, then the settings file, then explicit flags.
///
/// An explicit `--config` must exist; the default file may be absent.
fn resolve_settings(
    cli: &Cli,
    default_path: Option<PathBuf>,
) -> Result<(GameSettings, GridSize), GameError> {
    let mut settings = GameSettings::default();
    let mut bounds = GridSize::default();

    if let Some(path) = cli.config.clone().or(default_path) {
        match load_settings_file(&path)? {
            Some(file) => file.apply(&mut settings, &mut bounds),
            None if cli.config.is_some() => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("settings file {} not found", path.display()),
                )
                .into());
            }
            None => {}
        }
    }

    if cli.delay != -1 {
        settings.tick_delay_ms = normalize_tick_delay(cli.delay);
    }
    settings.opponent_enabled |= cli.with_opponent;
    settings.no_clip |= cli.no_clip;
    settings.reject_reversal |= cli.reject_reversal;
    if cli.harmless_opponent {
        settings.opponent_collision_ends_game = false;
    }
    if let Some(width) = cli.width {
        bounds.width = width;
    }
    if let Some(height) = cli.height {
        bounds.height = height;
    }

    Ok((settings, bounds.normalized()))
}

fn init_logging(path: &Path) -> io::Result<()> {
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)
        .map_err(io::Error::other)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
