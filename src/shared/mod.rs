//! Shared Module
//!
//! Types shared between the server and the board client: the board/list/task
//! model, the drag-and-drop ordering engine and the API wire types.
//!
//! # Overview
//!
//! Nothing in here performs I/O. The server serializes these types into its
//! responses; the client deserializes them and feeds them to the ordering
//! engine.

/// Board, list and task data structures
pub mod board;

/// Drag-and-drop ordering engine
pub mod ordering;

/// API request/response types
pub mod api;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use board::{Board, BoardMember, BoardView, ListWithTasks, MemberRole, Task, TaskList, TaskStatus, UserSummary};
pub use ordering::{compute_reorder, DragDrop, DropPlacement, Orderable, Reorder, ReorderError, TaskMove};
pub use api::ApiResponse;
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
