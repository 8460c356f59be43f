//! Option-safe thread helpers and a polling wait loop

use crate::error::AssertError;
use crate::lang::assert;
use crate::lang::concurrent::thread_wrapper::ThreadWrapper;
use crate::lang::concurrent::time_unit::TimeUnit;
use std::backtrace::Backtrace;
use std::sync::{Condvar, Mutex};
use std::thread::{self, JoinHandle, Thread, ThreadId};
use std::time::{Duration, Instant};

pub fn is_alive<T>(handle: Option<&JoinHandle<T>>) -> bool {
    handle.is_some_and(|handle| !handle.is_finished())
}

pub fn get_id(thread: Option<&Thread>) -> Option<ThreadId> {
    thread.map(Thread::id)
}

pub fn get_name(thread: Option<&Thread>) -> Option<String> {
    thread.and_then(|thread| thread.name().map(str::to_string))
}

/// Wake `thread` if it is parked; a no-op for `None`
pub fn interrupt(thread: Option<&Thread>) {
    if let Some(thread) = thread {
        thread.unpark();
    }
}

/// Block for `milliseconds` and report how long the thread actually slept
pub fn sleep(milliseconds: u64) -> u64 {
    let started = Instant::now();
    thread::sleep(Duration::from_millis(milliseconds));
    started.elapsed().as_millis() as u64
}

pub fn dump_stack(tag: &str) {
    let current = thread::current();
    log::debug!(
        "Thread @ ({}): {:?}-{}\n{}",
        tag,
        current.id(),
        current.name().unwrap_or("unnamed"),
        Backtrace::force_capture()
    );
}

pub fn thread() -> ThreadWrapper<()> {
    ThreadWrapper::current()
}

pub fn thread_of<T>(handle: JoinHandle<T>) -> ThreadWrapper<T> {
    ThreadWrapper::from_handle(handle)
}

pub fn wait_for(duration: u64) -> Result<WaitTask, AssertError> {
    WaitTask::wait_for(duration, WaitTask::DEFAULT_TIME_UNIT)
}

pub fn wait_for_with_unit(duration: u64, unit: TimeUnit) -> Result<WaitTask, AssertError> {
    WaitTask::wait_for(duration, unit)
}

pub trait CompletableTask {
    fn is_complete(&self) -> bool;
}

impl<F> CompletableTask for F
where
    F: Fn() -> bool,
{
    fn is_complete(&self) -> bool {
        self()
    }
}

/// Polls a [`CompletableTask`] until it completes or the duration elapses
#[derive(Debug)]
pub struct WaitTask {
    duration: u64,
    duration_unit: TimeUnit,
    interval: Option<(u64, TimeUnit)>,
    monitor: Mutex<()>,
    signal: Condvar,
}

impl WaitTask {
    pub const DEFAULT_TIME_UNIT: TimeUnit = TimeUnit::Milliseconds;

    pub fn wait_for(duration: u64, unit: TimeUnit) -> Result<Self, AssertError> {
        assert::legal_argument(
            duration > 0,
            format!("'Duration' ({}) must be greater than 0!", duration),
        )?;

        Ok(Self {
            duration,
            duration_unit: unit,
            interval: None,
            monitor: Mutex::new(()),
            signal: Condvar::new(),
        })
    }

    pub fn check_every(self, interval: u64) -> Result<Self, AssertError> {
        self.check_every_with_unit(interval, Self::DEFAULT_TIME_UNIT)
    }

    pub fn check_every_with_unit(mut self, interval: u64, unit: TimeUnit) -> Result<Self, AssertError> {
        let valid = interval > 0
            && unit.to_duration(interval) <= self.duration_unit.to_duration(self.duration);
        assert::legal_argument(
            valid,
            format!(
                "'Interval' ({} {}) must be greater than 0 and less than equal to 'duration' ({} {})!",
                interval, unit, self.duration, self.duration_unit
            ),
        )?;

        self.interval = Some((interval, unit));
        Ok(self)
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn duration_unit(&self) -> TimeUnit {
        self.duration_unit
    }

    /// Defaults to the whole duration when no interval was set
    pub fn interval(&self) -> u64 {
        self.interval.map_or(self.duration, |(interval, _)| interval)
    }

    pub fn interval_unit(&self) -> TimeUnit {
        self.interval.map_or(self.duration_unit, |(_, unit)| unit)
    }

    /// Wait until `task` completes or the duration runs out; returns the final completion state.
    /// A duration too long to represent as a deadline waits until the task completes.
    pub fn on(&self, task: &dyn CompletableTask) -> bool {
        let deadline = Instant::now().checked_add(self.duration_unit.to_duration(self.duration));
        let interval = self.interval_unit().to_duration(self.interval());

        while !task.is_complete() {
            let now = Instant::now();
            let timeout = match deadline {
                Some(deadline) if now >= deadline => break,
                Some(deadline) => interval.min(deadline - now),
                None => interval,
            };
            match self.monitor.lock() {
                Ok(guard) => {
                    let _ = self.signal.wait_timeout(guard, timeout);
                }
                Err(_) => thread::sleep(timeout),
            }
        }

        task.is_complete()
    }
}
