mod config;
mod errors;
mod extract;
mod models;
mod routes;
mod shaping;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ServiceKind};
use crate::routes::{build_tutorial_router, build_twitter_router};
use crate::state::AppState;
use crate::store::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting chirp v{} ({} service)",
        env!("CARGO_PKG_VERSION"),
        config.service.name()
    );

    let app = match config.service {
        ServiceKind::Twitter => build_twitter_router(open_stores(&config).await?),
        ServiceKind::Tutorial => build_tutorial_router(),
    };
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Opens the file-backed user and tweet stores, creating empty ones on first run.
async fn open_stores(config: &Config) -> Result<AppState> {
    let users = FileStore::new(config.users_path());
    let tweets = FileStore::new(config.tweets_path());
    for store in [&users, &tweets] {
        store
            .ensure_exists()
            .await
            .with_context(|| format!("failed to initialize {}", store.path().display()))?;
    }
    info!(
        "Record stores: users={}, tweets={}",
        users.path().display(),
        tweets.path().display()
    );

    Ok(AppState::new(Arc::new(users), Arc::new(tweets)))
}
