//! Tasks Module
//!
//! Tasks, their details, and the batch move that persists drag and drop
//! reorderings.
//!
//! - **`db`** - task queries, always returning populated tasks
//! - **`batch`** - batch move validation and apply
//! - **`handlers`** - HTTP handlers

pub mod db;

pub mod batch;

pub mod handlers;
