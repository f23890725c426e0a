//! Lists Module
//!
//! Ordered columns of a board.
//!
//! - **`db`** - list queries
//! - **`handlers`** - HTTP handlers under `/api/v1/lists`

pub mod db;

pub mod handlers;
