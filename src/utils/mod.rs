//! Utility functions and helpers for cachegate.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and credential-safe URI rendering.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
