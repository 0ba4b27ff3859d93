//! Twenty48
//!
//! Terminal front end: reads moves from stdin, draws the board on stdout.
//! Logs go to stderr, filtered by `TWENTY48_LOG` (default `warn`).

use std::io;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use twenty48::{GameConfig, GameSession, BOARD_SIZE, VERSION, WIN_TILE};

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("Invalid configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter {:?}", config.log_filter))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Twenty48 v{}", VERSION);
    info!("Board: {}x{}, winning tile {}", BOARD_SIZE, BOARD_SIZE, WIN_TILE);

    let mut session = GameSession::new(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = session
        .run(stdin.lock(), stdout.lock())
        .context("Terminal session failed")?;

    info!(
        games = summary.games_played,
        best = summary.best_score,
        "Session finished"
    );
    if tracing::enabled!(tracing::Level::DEBUG) {
        let json = serde_json::to_string(&summary.final_state)
            .context("Failed to encode final state")?;
        debug!(state = %json, "Final state");
    }

    Ok(())
}
