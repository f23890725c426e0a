/**
 * Server Initialization
 *
 * This module assembles the Axum application: it opens the database, runs
 * migrations, builds the shared state and configures the router.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and apply migrations
 * 2. Wrap pool and configuration into `AppState`
 * 3. Create the router with all routes and middleware
 *
 * Tests skip step 1 and hand an already migrated pool to
 * `create_router_with_pool`.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated; unlike optional
/// services, the board cannot run without storage.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing taskboard server");

    let db_pool = load_database(&config).await?;

    tracing::info!(
        atomic_task_moves = config.atomic_task_moves,
        "Database ready, configuring routes"
    );

    Ok(create_router_with_pool(db_pool, config))
}

/// Build the router around an existing pool
pub fn create_router_with_pool(db_pool: SqlitePool, config: ServerConfig) -> Router<()> {
    create_router(AppState::new(db_pool, config))
}
