//! Board Client
//!
//! Async HTTP client for the board API and the drag-and-drop session built
//! on it.
//!
//! - **`api`** - `BoardClient`, one method per endpoint
//! - **`session`** - `BoardSession`, optimistic drops with re-fetch
//! - **`error`** - `ClientError`

pub mod api;
pub mod error;
pub mod session;

pub use api::BoardClient;
pub use error::ClientError;
pub use session::{BoardSession, PendingMove};
