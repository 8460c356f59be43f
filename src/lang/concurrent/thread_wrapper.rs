use std::fmt;
use std::thread::{self, JoinHandle, Thread, ThreadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    Running,
    Terminated,
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadState::Running => write!(f, "RUNNING"),
            ThreadState::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// A thread handle with a readable summary of its identity and state
///
/// Wrapping the current thread keeps no `JoinHandle`, so it always reports
/// `Running` and cannot be joined.
#[derive(Debug)]
pub struct ThreadWrapper<T> {
    thread: Thread,
    handle: Option<JoinHandle<T>>,
}

impl ThreadWrapper<()> {
    pub fn current() -> Self {
        Self {
            thread: thread::current(),
            handle: None,
        }
    }
}

impl<T> ThreadWrapper<T> {
    pub fn from_handle(handle: JoinHandle<T>) -> Self {
        Self {
            thread: handle.thread().clone(),
            handle: Some(handle),
        }
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    pub fn id(&self) -> ThreadId {
        self.thread.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.thread.name()
    }

    pub fn is_alive(&self) -> bool {
        self.handle.as_ref().is_none_or(|handle| !handle.is_finished())
    }

    pub fn is_terminated(&self) -> bool {
        !self.is_alive()
    }

    pub fn state(&self) -> ThreadState {
        if self.is_alive() {
            ThreadState::Running
        } else {
            ThreadState::Terminated
        }
    }

    pub fn interrupt(&self) {
        self.thread.unpark();
    }

    /// `None` when there is no handle to join
    pub fn join(self) -> Option<thread::Result<T>> {
        self.handle.map(JoinHandle::join)
    }
}

impl<T> fmt::Display for ThreadWrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ id = {:?}, name = {}, state = {} }}",
            self.id(),
            self.name().unwrap_or("unnamed"),
            self.state()
        )
    }
}
