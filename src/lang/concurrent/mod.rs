pub mod thread_utils;
pub mod thread_wrapper;
pub mod time_unit;

pub use thread_utils::{CompletableTask, WaitTask};
pub use thread_wrapper::{ThreadState, ThreadWrapper};
pub use time_unit::TimeUnit;
