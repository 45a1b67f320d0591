use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use trivia_api::config::Config;
use trivia_api::db::{create_pool, run_migrations, seed, SqliteRepository};
use trivia_api::observability::init_tracing;
use trivia_api::routes::{create_router, API_PREFIX};
use trivia_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = Config::parse();
    init_tracing();
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    run_migrations(&pool).await?;
    if config.seed {
        seed(&pool).await?;
    }

    let state = AppState::new(Arc::new(SqliteRepository::new(pool)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("Server running on http://{}", config.bind);
    info!("API endpoint: http://{}{}", config.bind, API_PREFIX);
    info!("OpenAPI JSON: http://{}/api-docs/openapi.json", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}
