mod config;
mod error;
mod metrics;
mod route;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::{
    config::{LogFormat, LogOutput, ViewerConfig},
    route::build_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 1: thread-local subscriber so config loading can log.
    // Dropped before Phase 2 installs the global one.
    let basic_tracing = init_tracing_basic();

    info!("Starting debug log viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load()
        .context("Failed to load configuration")?;

    config.validate()
        .context("Configuration validation failed")?;

    drop(basic_tracing);
    init_tracing_from_config(&config)
        .context("Failed to initialize tracing")?;

    info!("Configuration loaded successfully");
    info!("Tailing: {}", config.tailer.log_file.display());

    let state = AppState::new(config.clone());
    let app = build_router(state.clone());

    let addr: SocketAddr = config.server.bind_address
        .parse()
        .context("Invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("  - Entries: http://{}/api/debug-log", addr);
    info!("  - Stream: http://{}/api/debug-log/sse", addr);
    info!("  - Health check: http://{}/health", addr);
    info!("Listening on: http://{}", addr);

    // Open streams only end once their sessions are cancelled
    let shutdown_state = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown_state.shutdown();
        })
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Phase 1: Basic tracing init so we can log during config loading.
/// Uses RUST_LOG env var or a sensible default.
fn init_tracing_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,viewer=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: Install the global subscriber from configuration values.
fn init_tracing_from_config(config: &ViewerConfig) -> Result<()> {
    use std::sync::Arc;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let open_log_file = |path: &str| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file '{}'", path))
    };

    match &config.logging.output {
        LogOutput::Stdout => match config.logging.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
        },
        LogOutput::File { path } => {
            let file = Arc::new(open_log_file(path)?);
            match config.logging.format {
                LogFormat::Json => {
                    let layer = fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_ansi(false)
                        .with_writer(file);
                    tracing_subscriber::registry().with(filter).with(layer).init();
                }
                LogFormat::Pretty => {
                    let layer = fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_ansi(false)
                        .with_writer(file);
                    tracing_subscriber::registry().with(filter).with(layer).init();
                }
            }
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
