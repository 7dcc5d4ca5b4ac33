//! Leads backend entry point
//!
//! Loads configuration, connects to PostgreSQL, makes sure the leads table exists
//! and serves GraphQL at /graphql.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leads::app::{AppState, build_app};
use leads::config::Config;
use leads::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leads=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting leads backend");

    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        host = %config.database_host,
        database = %config.database_name,
        "Configuration loaded"
    );

    let db = Database::connect(config.connect_options(), config.max_connections).await?;
    tracing::info!("Database connected");

    db.leads()
        .ensure_table_exists()
        .await
        .context("Failed to create leads table")?;

    let state = AppState::new(config.clone(), db);
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
