/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/v1/current-user, which
 * returns the user attached to the request by the auth middleware.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::{AuthUser, UNAUTHENTICATED_MESSAGE};
use crate::shared::api::CurrentUserResponse;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - the user was deleted after the token was issued
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<CurrentUserResponse>, BackendError> {
    let user = get_user_by_id(&pool, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized(UNAUTHENTICATED_MESSAGE))?;

    Ok(Json(CurrentUserResponse {
        status: true,
        user: user.summary(),
    }))
}
