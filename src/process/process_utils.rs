//! PID files, liveness checks and the `<TERM/>` stop protocol for child processes.

use crate::error::{AssertError, FileError, ProcessError};
use crate::io::files;
use crate::lang::assert;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use walkdir::WalkDir;

pub const TERM_TOKEN: &str = "<TERM/>";

const PID_FILE_EXTENSION: &str = ".pid";

pub fn current_process_id() -> u32 {
    std::process::id()
}

/// Whether a process with this id exists; a process owned by another user still counts
#[cfg(unix)]
pub fn is_running_pid(pid: i32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    if pid <= 0 {
        return false;
    }

    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_running_pid(_pid: i32) -> bool {
    false
}

pub fn is_running(child: Option<&mut Child>) -> bool {
    match child {
        Some(child) => matches!(child.try_wait(), Ok(None)),
        None => false,
    }
}

pub fn find_and_read_pid(working_directory: &Path) -> crate::Result<i32> {
    assert::legal_argument(
        files::is_directory(Some(working_directory)),
        format!(
            "The file system pathname ({}) expected to contain a PID file is not a valid directory!",
            working_directory.display()
        ),
    )?;

    let pid_file = find_pid_file(working_directory)?.ok_or_else(|| {
        ProcessError::pid_unavailable(format!(
            "No PID file was found in working directory ({}) or any of it's sub-directories!",
            working_directory.display()
        ))
    })?;

    read_pid(&pid_file)
}

/// Depth-first search, in file name order, for the first `*.pid` file
pub fn find_pid_file(working_directory: &Path) -> crate::Result<Option<PathBuf>> {
    assert::legal_argument(
        files::is_directory(Some(working_directory)),
        format!(
            "The file system pathname ({}) is not a valid directory!",
            working_directory.display()
        ),
    )?;

    let pid_file = WalkDir::new(working_directory)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| {
            entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(PID_FILE_EXTENSION)
        })
        .map(|entry| entry.into_path());

    Ok(pid_file)
}

pub fn read_pid(pid_file: &Path) -> crate::Result<i32> {
    assert::legal_argument(
        files::is_file(Some(pid_file)),
        format!("The PID file ({}) does not exist!", pid_file.display()),
    )?;

    let failed = |source: Box<dyn std::error::Error + Send + Sync>| ProcessError::PidUnavailable {
        message: format!(
            "Failed to read process ID (PID) from file ({})!",
            pid_file.display()
        ),
        source: Some(source),
    };

    let contents = fs::read_to_string(pid_file).map_err(|err| failed(Box::new(err)))?;
    let pid = contents
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .parse::<i32>()
        .map_err(|err| failed(Box::new(err)))?;

    Ok(pid)
}

pub fn write_pid(pid_file: &Path, pid: u32) -> Result<(), FileError> {
    fs::write(pid_file, format!("{}\n", pid)).map_err(|source| FileError::Io {
        path: pid_file.display().to_string(),
        source,
    })
}

/// Spawn `command` with piped stdin so the child can later be sent [`TERM_TOKEN`].
/// Defaults to the current working directory.
pub fn start_process(command: &[&str], working_directory: Option<&Path>) -> crate::Result<Child> {
    let Some((program, args)) = command.split_first() else {
        return Err(AssertError::IllegalArgument(
            "The command used to run the process must be specified!".to_string(),
        )
        .into());
    };

    let mut builder = Command::new(program);
    builder.args(args).stdin(Stdio::piped());
    if let Some(dir) = working_directory {
        builder.current_dir(dir);
    }

    let child = builder.spawn().map_err(|source| ProcessError::Spawn {
        command: command.join(" "),
        source,
    })?;

    log::debug!("Started process ({}) with PID ({})", command.join(" "), child.id());

    Ok(child)
}

/// Ask a running child to stop by writing [`TERM_TOKEN`] to its stdin.
/// Returns false when the child has exited or its stdin is not piped.
pub fn signal_stop(child: &mut Child) -> Result<bool, ProcessError> {
    if !is_running(Some(child)) {
        return Ok(false);
    }

    let Some(stdin) = child.stdin.as_mut() else {
        return Ok(false);
    };

    stdin.write_all(format!("{}\n", TERM_TOKEN).as_bytes())?;
    stdin.flush()?;
    Ok(true)
}

/// Consume whitespace separated tokens until [`TERM_TOKEN`] arrives.
/// Returns false if input ends first.
pub fn wait_for_stop_signal<R: BufRead>(reader: R) -> io::Result<bool> {
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            if token == TERM_TOKEN {
                return Ok(true);
            }
            log::debug!("Received message ({})", token);
        }
    }
    Ok(false)
}

/// Kills and reaps the wrapped child when dropped
#[derive(Debug)]
pub struct ShutdownGuard {
    child: Option<Child>,
    descriptor: String,
    working_directory: PathBuf,
}

impl ShutdownGuard {
    pub fn new(child: Child, descriptor: impl Into<String>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            child: Some(child),
            descriptor: descriptor.into(),
            working_directory: working_directory.into(),
        }
    }

    pub fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// Disarm the guard and hand the child back
    pub fn into_inner(mut self) -> Option<Child> {
        self.child.take()
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        log::info!(
            "Stopping process ({}) running in ({})...",
            self.descriptor,
            self.working_directory.display()
        );

        if let Err(err) = child.kill() {
            log::debug!("Kill of process ({}) failed: {}", self.descriptor, err);
        }

        match child.wait() {
            Ok(_) => log::info!("STOPPED!"),
            Err(_) => log::warn!("STILL RUNNING?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn test_current_process_id() {
        assert_eq!(current_process_id(), std::process::id());
        assert!(is_running_pid(current_process_id() as i32));
        assert!(!is_running_pid(0));
    }

    #[test]
    fn test_write_and_read_pid() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let pid_file = temp_dir.path().join("server.pid");

        write_pid(&pid_file, 4242).unwrap();
        assert_eq!(read_pid(&pid_file).unwrap(), 4242);
    }

    #[test]
    fn test_read_pid_rejects_garbage() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let pid_file = temp_dir.path().join("bad.pid");
        fs::write(&pid_file, "not a number\n").unwrap();

        match read_pid(&pid_file) {
            Err(AppError::Process(ProcessError::PidUnavailable { message, source })) => {
                assert!(message.starts_with("Failed to read process ID (PID) from file"));
                assert!(source.is_some());
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            read_pid(&temp_dir.path().join("missing.pid")),
            Err(AppError::Assert(_))
        ));
    }

    #[test]
    fn test_find_and_read_pid_in_sub_directory() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();
        write_pid(&nested.join("app.pid"), 12345).unwrap();

        assert_eq!(
            find_pid_file(temp_dir.path()).unwrap(),
            Some(nested.join("app.pid"))
        );
        assert_eq!(find_and_read_pid(temp_dir.path()).unwrap(), 12345);
    }

    #[test]
    fn test_find_and_read_pid_without_pid_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");

        let err = find_and_read_pid(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("No PID file was found in working directory"));
    }

    #[test]
    fn test_wait_for_stop_signal() {
        let input = "hello there\nstill <TERM/> more\n".as_bytes();
        assert!(wait_for_stop_signal(input).unwrap());

        let input = "never stops\n".as_bytes();
        assert!(!wait_for_stop_signal(input).unwrap());
    }

    #[test]
    fn test_is_running_none() {
        assert!(!is_running(None));
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_stop_reaches_child() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let mut child = start_process(&["head", "-n", "1"], Some(temp_dir.path())).unwrap();
        assert!(is_running(Some(&mut child)));

        assert!(signal_stop(&mut child).unwrap());
        assert!(child.wait().unwrap().success());
        assert!(!is_running(Some(&mut child)));
        assert!(!signal_stop(&mut child).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_shutdown_guard_stops_child() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let child = start_process(&["sleep", "30"], None).unwrap();
        let pid = child.id() as i32;

        let guard = ShutdownGuard::new(child, "sleep 30", temp_dir.path());
        drop(guard);

        assert!(!is_running_pid(pid));
    }

    #[test]
    fn test_start_process_requires_command() {
        assert!(matches!(start_process(&[], None), Err(AppError::Assert(_))));
    }
}
