//! Utils module - Shared utilities used by the command-line layer

/// Logging setup and verbose output
pub mod logging;

/// Input validation for command-line arguments
pub mod validation;
