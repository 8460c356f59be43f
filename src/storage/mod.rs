//! Persistent settings for the command line tools
//!
//! The TOML configuration file holds the connection settings used by the
//! sample servers and clients.

use crate::error::ConfigError;

pub mod config;

type Result<T> = std::result::Result<T, ConfigError>;
