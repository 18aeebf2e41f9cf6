//! Utility functions and helpers for the corpus gateway.
//!
//! This module provides cross-cutting concerns like structured logging
//! and token sanitization.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with security filters.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
