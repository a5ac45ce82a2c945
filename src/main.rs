use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracklink::{
    alias::AliasGenerator,
    app,
    config::{AppConfig, Environment},
    db::{self, SqliteStore},
    AppState,
};

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent — env vars may already be set)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.env);

    tracing::info!(env = ?config.env, "starting tracklink");
    tracing::debug!("debug messages are enabled");

    let pool = db::connect(&config.database_url, config.db_max_connections).await?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let state = Arc::new(AppState::new(
        SqliteStore::new(pool),
        AliasGenerator::new(),
        config.alias_length,
    ));
    let app = app::router(state, config.request_timeout, &config.static_dir);
    tracing::info!(static_dir = %config.static_dir.display(), "serving front-end");

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Pretty output for local runs, JSON everywhere else. `RUST_LOG` overrides
/// the per-environment level.
fn init_tracing(env: Environment) {
    let default_filter = match env {
        Environment::Local | Environment::Dev => "tracklink=debug,tower_http=debug",
        Environment::Prod => "tracklink=info,tower_http=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        Environment::Local => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        Environment::Dev | Environment::Prod => {
            registry.with(tracing_subscriber::fmt::layer().json()).init()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
