// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for running measurement scans.
//!
//! This module contains the command-line interface logic, including argument
//! parsing and the `scan` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Terminal logging helpers.
pub mod logging;

/// Scan logic.
pub mod scan;
