//! API integration tests
//!
//! Drive the real router against a temporary SQLite database.

mod board_test;
mod list_test;
mod task_move_test;
mod task_test;
