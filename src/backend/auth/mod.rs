//! Authentication Module
//!
//! User registration, login and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT tokens and the session cookie
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → token returned and set as cookie
//! 2. **Login**: email and password → credentials verified → token returned and set as cookie
//! 3. **Protected routes**: token read from `Authorization: Bearer` or the `token` cookie
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HMAC-signed JWTs with a configurable lifetime
//! - Password hashes are never serialized

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export handlers
pub use handlers::{get_me, login, logout, register};
