/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/v1/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by email
 * 2. Verify the password using bcrypt
 * 3. Issue a token and set the session cookie
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};
use bcrypt::verify;

use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::api::{AuthResponse, LoginRequest};
use crate::shared::error::non_blank;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - no user with this email
/// * `403 Forbidden` - wrong password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let (Some(email), Some(password)) = (
        non_blank(request.email.as_deref()),
        non_blank(request.password.as_deref()),
    ) else {
        return Err(BackendError::bad_request("please enter email and password"));
    };

    let user = get_user_by_email(&state.db_pool, email)
        .await?
        .ok_or_else(|| BackendError::unauthorized("user not exist"))?;

    if !verify(password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::forbidden("invalid credential"));
    }

    let token = create_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    tracing::info!("User logged in: {} ({})", user.id, user.email);

    Ok((
        [(SET_COOKIE, session_cookie(&token, state.config.jwt_expiry_hours))],
        Json(AuthResponse {
            status: true,
            id: user.id,
            token,
        }),
    ))
}
