//! Option-safe wrappers around core language facilities

pub mod assert;
pub mod concurrent;
pub mod in_out;
pub mod objects;
pub mod strings;
pub mod system;
pub mod throwable;
pub mod traits;
pub mod types;
pub mod values;

pub use in_out::InOutParameter;
pub use traits::{Filter, Identifiable, Initable, Orderable, Ordered};
