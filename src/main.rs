//! TaskHub server binary.
//!
//! Wires configuration, logging, the real-time engine, and the HTTP
//! router together, then serves until a shutdown signal arrives.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use taskhub_api::state::AppState;
use taskhub_core::config::{AppConfig, logging::LoggingConfig};
use taskhub_core::error::AppError;
use taskhub_realtime::engine::RealtimeEngine;

#[tokio::main]
async fn main() {
    let env = std::env::var("TASKHUB_ENV").unwrap_or_else(|_| "development".into());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Could not load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(err) = serve(config).await {
        tracing::error!("Fatal: {err}");
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.format == "json" {
        builder.json().with_thread_ids(true).init();
    } else {
        builder.pretty().init();
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting TaskHub");

    let engine = Arc::new(RealtimeEngine::new(config.realtime.clone()));
    let state = AppState {
        config: Arc::new(config.clone()),
        realtime: Arc::clone(&engine),
    };
    let router = taskhub_api::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| AppError::internal(format!("cannot bind {addr}: {err}")))?;
    tracing::info!(%addr, "TaskHub listening");

    // The engine must shut down inside the graceful-shutdown future:
    // axum keeps serving until every upgraded WebSocket task ends, and
    // those tasks end when the engine's shutdown signal fires.
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, closing connections");
            engine.shutdown();
        })
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    tracing::info!("TaskHub stopped");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigterm.recv() => {},
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
