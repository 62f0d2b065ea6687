//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (animation timing, dial layout, colours, limits)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
