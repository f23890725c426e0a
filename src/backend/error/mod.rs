//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion into
//! `{ "status": false, "message": ... }` responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and extractor rejection conversions
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use taskboard::backend::error::BackendError;
//!
//! async fn handler() -> Result<(), BackendError> {
//!     Err(BackendError::not_found("Board not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
