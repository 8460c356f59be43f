//! Starting, watching and stopping child processes

pub mod configuration;
pub mod executor;
pub mod process_utils;

pub use configuration::ProcessConfiguration;
pub use executor::{ProcessExecutor, ProcessInputListener, ProcessWrapper};
pub use process_utils::{ShutdownGuard, TERM_TOKEN};
