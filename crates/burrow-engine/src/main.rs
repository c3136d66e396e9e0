//! # Burrow Engine
//!
//! Headless runner for the Burrow world engine.
//!
//! Loads `burrow.toml` (or the path given as the first argument), generates
//! a world on a worker thread, runs the fixed-tick simulation, and optionally
//! prints the resulting grid.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};

/// Builds the log subscriber with `directive` as the default filter.
fn subscriber(directive: &str) -> Result<impl tracing::Subscriber + Send + Sync + 'static> {
    Ok(tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?)))
}

/// Main entry point.
fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());

    // Config loading logs under the default filter; the configured one applies after
    let bootstrap = subscriber(&EngineConfig::default().log_filter)?;
    let mut config = tracing::subscriber::with_default(bootstrap, || EngineConfig::load_from(&path));
    config.validate();

    subscriber(&config.log_filter)?.init();

    info!("Burrow starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(seed = config.world.seed, config = %path, "World settings");

    let session = app::run(&config)?;
    info!(
        driller = ?session.driller,
        fluid_moves = session.fluid_moves,
        visible_solid = session.visible_solid,
        "Session summary"
    );

    if config.print_map {
        print!("{}", session.world.read().grid().to_glyphs());
    }

    info!("Burrow shutdown complete");
    Ok(())
}
