//! dashbot entry point.
//!
//! Binary name: `dashbot`
//!
//! Loads `.env`, parses CLI arguments, initializes tracing, then either runs
//! the HTTP server (`serve`) or a one-shot helper command.

mod cli;
mod http;
mod state;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use dashbot_infra::config::{ConfigSource, load_config};
use dashbot_observe::tracing_setup::{default_filter, init_tracing};

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

/// How long to wait for queued notifications after the server stops.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first, so clap's env fallbacks see `.env` values.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(cli.log_format, default_filter(cli.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Sign(args) => cli::sign::run(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(ConfigSource::from(args)).context("invalid configuration")?;
    let addr = config.listen_addr();
    let session_file = config.session_file.clone();

    let (state, worker) = AppState::init(config)
        .await
        .with_context(|| format!("failed to load session file {}", session_file.display()))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        channel_id = %state.config.channel_id,
        session_file = %session_file.display(),
        "dashbot listening"
    );

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last queue sender; let the worker finish the backlog.
    if tokio::time::timeout(DRAIN_TIMEOUT, worker).await.is_err() {
        tracing::warn!("notification worker did not drain in time; pending pushes dropped");
    }

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
