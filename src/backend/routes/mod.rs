//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly, layers and fallback
//! ├── api_routes.rs   - `/api/v1` endpoints
//! └── params.rs       - Path parameter extractor
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use taskboard::backend::routes::create_router;
//! use taskboard::backend::server::{AppState, ServerConfig};
//!
//! # fn example(pool: sqlx::SqlitePool) {
//! let router = create_router(AppState::new(pool, ServerConfig::default()));
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Path parameter extraction
pub mod params;

// Re-export commonly used functions
pub use router::create_router;
