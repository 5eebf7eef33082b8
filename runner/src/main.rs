mod driver;
mod frame;
mod input;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use snake_common::config::{Validate, get_config_manager};
use snake_common::games::SessionRng;
use snake_common::games::snake::{GameSession, SnakeSessionSettings};
use snake_common::persistence::{BestScoreStore, FileBestScoreStore};
use snake_common::{Difficulty, log, logger};

use driver::Driver;
use input::spawn_stdin_reader;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Plays snake in the terminal, one command per line")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    profile: Option<String>,
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Only log, do not print the board.
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let mut config = get_config_manager(args.config).get_config()?;
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    config.validate()?;

    let store = FileBestScoreStore::from_file(&config.best_score_file, &config.profile);
    let best_score = match store.load_best_score() {
        Ok(best_score) => best_score,
        Err(e) => {
            log!("Failed to load best score, starting from 0: {}", e);
            0
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log!(
        "Starting {:?} game on {}x{} board for '{}' (seed {}, best {})",
        config.difficulty,
        config.board_width,
        config.board_height,
        config.profile,
        seed,
        best_score
    );

    let settings = SnakeSessionSettings::from(&config);
    let session = GameSession::new(settings, best_score, SessionRng::new(seed));

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(command_tx);

    let driver = Driver::new(session, store, args.max_ticks, !args.quiet);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let session = driver.run(command_rx, shutdown).await;

    log!(
        "Finished with score {} (best {}, seed {})",
        session.score(),
        session.best_score(),
        session.seed()
    );

    Ok(())
}
