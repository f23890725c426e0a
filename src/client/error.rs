//! Client error types

use thiserror::Error;

use crate::shared::config::ConfigError;
use crate::shared::ordering::ReorderError;

/// Errors returned by the board client and the drag session
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with `status: false`
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the response envelope
        message: String,
    },

    /// Successful response without the expected payload
    #[error("Response from {0} carried no data")]
    MissingData(String),

    /// The drag could not be turned into a batch
    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
