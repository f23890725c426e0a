//! Taskboard - Main Library
//!
//! A Trello-style task board: boards hold ordered lists, lists hold ordered
//! task cards, and cards are rearranged by drag and drop.
//!
//! # Overview
//!
//! The heart of the crate is the drag-and-drop ordering protocol:
//!
//! - the client turns a drag gesture into a new dense ordering of the
//!   affected lists (`shared::ordering`)
//! - the server validates that batch and persists it
//!   (`backend::tasks::batch`)
//! - the client re-fetches the board after every move, so it always
//!   converges on what the server stored (`client::BoardSession`)
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and client
//!   - Board, list and task structures
//!   - The ordering engine
//!   - API request/response envelopes and shared errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with SQLite storage
//!   - Authentication, boards, lists, tasks and batch moves
//!
//! - **`client`** - Async HTTP client and the drag-and-drop session
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server-side code (enabled by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Board API client
pub mod client;
