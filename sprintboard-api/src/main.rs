//! # SprintBoard API Server
//!
//! REST backend for a Kanban project-management application: projects with
//! ordered columns, tasks that move between columns, role-scoped
//! memberships, credential login, and comments.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p sprintboard-api
//! ```
//!
//! Configuration comes from the environment; see [`sprintboard_api::config`].

use sprintboard_api::app::{build_router, AppState};
use sprintboard_api::config::Config;
use sprintboard_shared::db::{
    migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
    seed,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sprintboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "SprintBoard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&pool).await?;

    if config.seed_on_startup {
        seed::run(&pool).await?;
        tracing::info!("Startup seed completed");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    // Serve until ctrl-c; in-flight requests drain before the pool closes.
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
