//! POST /api/v1/logout

use axum::{
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};

use crate::backend::auth::sessions::cleared_cookie;
use crate::shared::ApiResponse;

/// Clear the session cookie
///
/// Tokens are stateless, so a bearer token stays valid until it expires.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_cookie())],
        Json(ApiResponse::message("user logout!")),
    )
}
