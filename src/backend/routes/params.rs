//! Path parameter extraction with envelope-shaped rejections.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::backend::error::BackendError;

/// The single `{id}` segment of a route, parsed as a UUID
///
/// A malformed ID is a 400 with the standard error envelope.
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub Uuid);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| BackendError::bad_request(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(IdParam)
            .map_err(|_| BackendError::bad_request(format!("Invalid ID: {}", raw)))
    }
}
