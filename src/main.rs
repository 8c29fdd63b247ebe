//! Match Drop server (default binary).
//!
//! Deals a board, starts the TCP adapter and applies intents from the
//! controlling client until the adapter shuts down.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use match_drop::adapter::{Adapter, EngineBridge};
use match_drop::core::{Engine, GameConfig};
use match_drop::types::Mode;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_from_env()?;
    let engine = Engine::new(config).context("invalid game configuration")?;
    let mut bridge = EngineBridge::new(engine);

    let mut adapter = Adapter::start_from_env()?;
    info!(addr = %adapter.local_addr(), "match-drop listening");

    while let Some(cmd) = adapter.recv_blocking() {
        for msg in bridge.handle(cmd) {
            adapter.send(msg);
        }
    }

    info!("adapter closed, exiting");
    Ok(())
}

fn config_from_env() -> Result<GameConfig> {
    let mut config = GameConfig::default();

    let rows = env_parse("MATCH_DROP_ROWS")?.unwrap_or(config.rows);
    let columns = env_parse("MATCH_DROP_COLUMNS")?.unwrap_or(config.columns);
    config = config.with_size(rows, columns);

    if let Some(moves) = env_parse("MATCH_DROP_MAX_MOVES")? {
        config = config.with_max_moves(moves);
    }
    if let Some(seed) = env_parse("MATCH_DROP_SEED")? {
        config = config.with_seed(seed);
    }
    if let Ok(mode) = env::var("MATCH_DROP_MODE") {
        let mode = Mode::from_str(&mode).ok_or_else(|| anyhow!("unknown MATCH_DROP_MODE {mode:?}"))?;
        config = config.with_mode(mode);
    }

    Ok(config)
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid {key}={raw:?}")),
        Err(_) => Ok(None),
    }
}
