//! Boards Module
//!
//! Boards, their membership, and the full board view the client renders.
//!
//! - **`db`** - board and membership queries
//! - **`handlers`** - HTTP handlers under `/api/v1/boards`

pub mod db;

pub mod handlers;
