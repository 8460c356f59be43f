pub use error::AppError;

/// Option-safe helper layers
pub mod data; // JSON rendering
pub mod io; // Streams, files and the file system
pub mod lang; // Assertions, strings, threads
pub mod net; // Sockets, URIs, HTTP links, sample servers
pub mod process; // Child processes and PID files
pub mod util; // Collections, properties, archives

/// Application layers (dependency flow: CLI → Tools → Storage)
pub mod cli; // Command-line interface
pub mod storage; // Configuration persistence
pub mod tools; // Diagnostic reports

/// Support modules (used across layers)
pub mod error; // Error handling
pub mod utils; // Logging and validation

pub type Result<T> = std::result::Result<T, AppError>;
