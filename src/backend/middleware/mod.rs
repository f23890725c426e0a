//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - session token verification for protected routes
//! - **`cors`** - cross-origin policy for the browser client
//!
//! Request logging is handled by `tower_http::trace::TraceLayer` in the
//! router.

pub mod auth;

pub mod cors;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use cors::cors_layer;
