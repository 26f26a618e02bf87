mod config;
mod db;
mod entities;
mod error;
#[cfg(test)]
mod fixtures;
mod models;
mod params;
mod routes;
mod store;
mod templates;

use std::sync::Arc;

use crate::{config::Config, db::Db};

pub struct AppState {
    pub db: Db,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = Db::open(&config.database_url, config.max_connections).await?;
    db.migrate().await?;

    let state = Arc::new(AppState { db: db.clone() });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    db.close().await?;
    tracing::info!("database closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
