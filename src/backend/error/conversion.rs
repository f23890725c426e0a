/**
 * Error Conversion
 *
 * Turns backend errors into HTTP responses using the same envelope as
 * successful responses:
 *
 * ```json
 * { "status": false, "message": "Board not found" }
 * ```
 *
 * Internal failures are logged here, once, with their details; the client
 * receives the generic message only.
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::shared::ApiResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self.message());
        }

        (status, Json(ApiResponse::<()>::error(self.message()))).into_response()
    }
}

/// Malformed JSON bodies are reported through the envelope as 400
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::bad_request(rejection.body_text())
    }
}
