//! Stream, file and file system helpers

pub mod file_system;
pub mod files;
pub mod streams;

pub use file_system::{AllFiles, DirectoryOnly, FileFilter, FileOnly};
pub use streams::{BUFFER_SIZE, Closeable};
