//! Glyscreen: diabetes screening inference service.
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glyscreen::adapters::ArtifactStore;
use glyscreen::config::{Config, LOG_FILE_ENV};
use glyscreen::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. Default is stdout (so container logs work);
    // GLYSCREEN_LOG_FILE switches to an append-only file through a
    // non-blocking appender.
    let (writer, _guard) = match std::env::var(LOG_FILE_ENV) {
        Ok(log_file) => {
            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                // Best-effort: don't fail startup just because the directory is missing.
                let _ = std::fs::create_dir_all(parent);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("opening log file {log_file}"))?;
            tracing_appender::non_blocking(file)
        }
        Err(_) => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting Glyscreen...");

    let config = Config::from_env().context("reading configuration")?;
    tracing::info!(
        "Configuration: bind={}, artifact_dir={:?}, positive_markers={:?}",
        config.bind_addr,
        config.artifact_dir,
        config.positive_policy.markers()
    );

    // Fail fast: a service that cannot classify must never start answering.
    let store = ArtifactStore::load(&config.artifact_dir)
        .with_context(|| format!("loading artifacts from {:?}", config.artifact_dir))?;

    let state = Arc::new(AppState::from_store(store, config.positive_policy.clone()));

    server::serve(state, config.bind_addr)
        .await
        .context("serving HTTP")?;

    tracing::info!("Glyscreen shutdown complete.");
    Ok(())
}
