//! Logging utilities for output
//!
//! This module provides utilities for logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use self::console::{format_table, print_records};
pub use self::log::{log_file_operation, log_records_loaded, log_records_saved};
