//! Application-level utilities for the Dialogue CLI.
//!
//! This module provides:
//! - Config loading and log subscriber setup
//! - Password entry with confirmation

mod context;

pub use context::AppContext;
