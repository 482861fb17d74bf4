//! # Tilecrush Main Entry Point
//!
//! Runs a headless session driven by the greedy autoplayer and prints a
//! summary. Useful for soak-testing configurations and seeds.

use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use tilecrush::{AutoPlayer, CrushResult, EngineConfig, GameMode, GameSession};

/// Command line arguments for the Tilecrush engine.
#[derive(Parser, Debug)]
#[command(name = "tilecrush")]
#[command(about = "A match-3 grid engine with a headless autoplayer")]
#[command(version)]
struct Args {
    /// Random seed for board generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Session mode (casual, challenge)
    #[arg(short, long, default_value = "casual")]
    mode: GameMode,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many swaps even if moves remain
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Print the final session as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Print the board after every turn
    #[arg(long)]
    show_board: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> CrushResult<()> {
    info!("Starting Tilecrush v{}", tilecrush::VERSION);

    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut session = GameSession::new(config, args.mode)?;
    let mut player = AutoPlayer::new();

    if args.show_board {
        println!("{}", session.board);
    }
    for _ in 0..args.max_turns {
        if player.play_turn(&mut session)?.is_none() {
            break;
        }
        if args.show_board {
            println!(
                "turn {} | score {} | moves left {}\n{}",
                session.turn, session.score, session.moves_remaining, session.board
            );
        }
    }

    if args.json {
        println!("{}", session.save_to_json()?);
    } else {
        print_summary(&session);
    }
    Ok(())
}

fn print_summary(session: &GameSession) {
    let stats = &session.statistics;
    println!("mode:          {:?}", session.mode);
    println!("seed:          {}", session.config().seed);
    println!("final score:   {}", session.score);
    println!("moves left:    {}", session.moves_remaining);
    println!("swaps made:    {}", stats.swaps_made);
    println!("cells cleared: {}", stats.cells_cleared);
    println!("best combo:    {}", stats.best_combo);
    println!("reshuffles:    {}", stats.reshuffles);
}

/// Initializes the logging backend for the requested level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        // Library records arrive through the log bridge installed by `init`.
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level.as_str().to_lowercase()))
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .init();
    }
}
