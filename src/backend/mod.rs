//! Backend Module
//!
//! The Axum HTTP server behind the task board. Only compiled with the `ssr`
//! feature (enabled by default).
//!
//! # Architecture
//!
//! - **`server`** - configuration, state, database loading and app creation
//! - **`routes`** - router assembly under `/api/v1`
//! - **`auth`** - users, session tokens and the auth endpoints
//! - **`middleware`** - session verification and CORS
//! - **`boards`** - boards and membership
//! - **`lists`** - ordered lists of a board
//! - **`tasks`** - tasks and the batch move endpoint
//! - **`error`** - `BackendError` and its response envelope
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── boards/         - Board handlers and queries
//! ├── lists/          - List handlers and queries
//! ├── tasks/          - Task handlers, queries and batch moves
//! └── error/          - Error types
//! ```
//!
//! # Storage
//!
//! SQLite through a `sqlx` pool held in `AppState`. Schema migrations in
//! `migrations/` run when the server starts.
//!
//! # Consistency
//!
//! Requests do not lock each other. A batch move reads the lists it
//! validates and writes afterwards, so two overlapping moves can both pass
//! validation. The board client re-fetches after every move and converges on
//! whatever was stored.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Boards and membership
pub mod boards;

/// Lists within a board
pub mod lists;

/// Tasks and batch moves
pub mod tasks;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
