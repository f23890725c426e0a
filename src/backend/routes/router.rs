/**
 * Router Configuration
 *
 * This module combines the API routes with the cross-cutting layers into a
 * single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` logs every request and response through `tracing`
 * - the CORS layer admits the configured browser origins with credentials
 *
 * # Fallback
 *
 * Unknown paths, inside or outside `/api/v1`, return a 404 envelope naming
 * the requested URL.
 */

use axum::{http::Uri, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::cors::cors_layer;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::shared::config::API_PREFIX;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.cors_origins);

    Router::new()
        .nest(API_PREFIX, configure_api_routes(app_state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found(format!("Requested URL not found {}", uri))
}
