//! # carehub
//!
//! Composition root that wires the backend into the record facades and runs
//! one command against them.
//!
//! ## Responsibilities
//! - Parse the command line and load configuration (file, env vars)
//! - Install the `tracing` subscriber
//! - Build the in-memory backend, seeded from the configured fixture
//! - Construct the facade for the requested table and run the command
//! - Print the result as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no table logic belongs here.

mod cli;
mod commands;
mod config;

use anyhow::Context;
use carehub_adapter_memory::{MemoryBackend, MemoryConnector};
use carehub_app::notify::LogNotifier;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter)
                .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let backend = match &config.backend.fixture {
        Some(path) => MemoryBackend::from_fixture_path(path)
            .with_context(|| format!("failed to load fixture {}", path.display()))?,
        None => MemoryBackend::default(),
    };
    tracing::debug!(fixture = ?config.backend.fixture, "backend ready");
    let connector = MemoryConnector::new(backend, config.credentials());

    let output = commands::run(cli.table, connector, LogNotifier).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
