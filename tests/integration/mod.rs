//! Integration tests

#[cfg(feature = "ssr")]
mod api;
