/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/v1/register.
 *
 * # Registration Process
 *
 * 1. Require name, email and password
 * 2. Validate the email format
 * 3. Reject emails that are already registered
 * 4. Hash the password using bcrypt
 * 5. Create the user, issue a token and set the session cookie
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};
use bcrypt::hash;

use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::api::{AuthResponse, RegisterRequest};
use crate::shared::error::non_blank;

/// Basic email shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields or invalid email format
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing, storage or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "hunter22" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let (Some(name), Some(email), Some(password)) = (
        non_blank(request.name.as_deref()),
        non_blank(request.email.as_deref()),
        non_blank(request.password.as_deref()),
    ) else {
        return Err(BackendError::bad_request("please enter all fields"));
    };

    if !is_valid_email(email) {
        return Err(BackendError::bad_request("please enter a valid email"));
    }

    if get_user_by_email(&state.db_pool, email).await?.is_some() {
        return Err(BackendError::conflict("user already exist"));
    }

    let password_hash = hash(password, state.config.bcrypt_cost)?;
    let user = create_user(&state.db_pool, name, email, &password_hash).await?;

    let token = create_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok((
        [(SET_COOKIE, session_cookie(&token, state.config.jwt_expiry_hours))],
        Json(AuthResponse {
            status: true,
            id: user.id,
            token,
        }),
    ))
}
