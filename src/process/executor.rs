use super::configuration::ProcessConfiguration;
use super::process_utils;
use crate::error::ProcessError;
use crate::io::files;
use crate::lang::{assert, strings};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

/// Receives each line a child process writes to its output streams
pub trait ProcessInputListener: Send + Sync {
    fn on_input(&self, input: &str);
}

impl<F> ProcessInputListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_input(&self, input: &str) {
        self(input)
    }
}

type Listeners = Arc<RwLock<Vec<Arc<dyn ProcessInputListener>>>>;

/// A running child process whose stdout (and stderr, when redirected) is
/// pumped line by line to registered listeners on background threads.
pub struct ProcessWrapper {
    child: Child,
    configuration: ProcessConfiguration,
    listeners: Listeners,
    pumps: Vec<JoinHandle<()>>,
}

impl ProcessWrapper {
    /// Spawn the configured command; `listeners` see every line from the first one on
    pub fn start(
        configuration: ProcessConfiguration,
        listeners: Vec<Arc<dyn ProcessInputListener>>,
    ) -> Result<Self, ProcessError> {
        let mut child = configuration
            .to_command()
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: configuration.command_string(),
                source,
            })?;

        let listeners: Listeners = Arc::new(RwLock::new(listeners));
        let mut pumps = Vec::with_capacity(2);

        if let Some(stdout) = child.stdout.take() {
            pumps.push(spawn_pump("stdout", stdout, Arc::clone(&listeners))?);
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(spawn_pump("stderr", stderr, Arc::clone(&listeners))?);
        }

        log::debug!("Started process ({}) with PID ({})", configuration, child.id());

        Ok(Self {
            child,
            configuration,
            listeners,
            pumps,
        })
    }

    pub fn configuration(&self) -> &ProcessConfiguration {
        &self.configuration
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn register(&self, listener: Arc<dyn ProcessInputListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Remove a listener previously passed to [`register`](Self::register) or [`start`](Self::start)
    pub fn unregister(&self, listener: &Arc<dyn ProcessInputListener>) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|registered| !Arc::ptr_eq(registered, listener));
        listeners.len() != before
    }

    pub fn is_running(&mut self) -> bool {
        process_utils::is_running(Some(&mut self.child))
    }

    /// The exit code, or `None` while running or when killed by a signal
    pub fn exit_value(&mut self) -> Option<i32> {
        self.child.try_wait().ok().flatten().and_then(|status| status.code())
    }

    pub fn signal_stop(&mut self) -> Result<bool, ProcessError> {
        process_utils::signal_stop(&mut self.child)
    }

    pub fn kill(&mut self) -> Result<(), ProcessError> {
        self.child.kill()?;
        Ok(())
    }

    /// Wait for exit and for the output pumps to drain
    pub fn wait_for(&mut self) -> Result<ExitStatus, ProcessError> {
        let status = self.child.wait()?;
        for pump in self.pumps.drain(..) {
            if pump.join().is_err() {
                log::warn!("Output pump for process ({}) panicked", self.child.id());
            }
        }
        Ok(status)
    }
}

fn spawn_pump<R>(stream_name: &str, stream: R, listeners: Listeners) -> Result<JoinHandle<()>, ProcessError>
where
    R: Read + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(format!("Process {} Reader", stream_name))
        .spawn(move || {
            for line in BufReader::new(stream).lines() {
                let Ok(line) = line else {
                    break;
                };
                let listeners = listeners.read().unwrap_or_else(PoisonError::into_inner);
                for listener in listeners.iter() {
                    listener.on_input(&line);
                }
            }
        })?;

    Ok(handle)
}

/// Launches programs with stderr merged into the forwarded output
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn launch(working_directory: &Path, program: &str, args: &[&str]) -> crate::Result<ProcessWrapper> {
        Self::launch_with_listeners(working_directory, program, args, Vec::new())
    }

    /// Like [`launch`](Self::launch), with extra listeners that see output from the first line on
    pub fn launch_with_listeners(
        working_directory: &Path,
        program: &str,
        args: &[&str],
        mut listeners: Vec<Arc<dyn ProcessInputListener>>,
    ) -> crate::Result<ProcessWrapper> {
        let working_directory = Self::validate_directory(working_directory)?;

        let mut command = Command::new(program);
        command
            .args(Self::program_args(args))
            .current_dir(working_directory);

        let configuration = ProcessConfiguration::from_command(&command, true)?;
        let fork_out: Arc<dyn ProcessInputListener> =
            Arc::new(|input: &str| log::info!("[FORK-OUT] - {}", input));

        listeners.insert(0, fork_out);

        Ok(ProcessWrapper::start(configuration, listeners)?)
    }

    /// Launch in the current working directory
    pub fn launch_here(program: &str, args: &[&str]) -> crate::Result<ProcessWrapper> {
        let working_directory = std::env::current_dir().map_err(ProcessError::Io)?;
        Self::launch(&working_directory, program, args)
    }

    fn validate_directory(working_directory: &Path) -> crate::Result<&Path> {
        assert::legal_argument(
            files::create_directory(Some(working_directory)),
            format!(
                "Working directory ({}) could not be found or does not exist!",
                working_directory.display()
            ),
        )?;
        Ok(working_directory)
    }

    fn program_args<'a>(args: &[&'a str]) -> Vec<&'a str> {
        args.iter()
            .copied()
            .filter(|arg| strings::has_text(Some(arg)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::concurrent::{TimeUnit, WaitTask};
    use crate::process::TERM_TOKEN;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn collector() -> (Arc<Mutex<Vec<String>>>, Arc<dyn ProcessInputListener>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&lines);
        let listener: Arc<dyn ProcessInputListener> = Arc::new(move |input: &str| {
            recorded.lock().unwrap().push(input.to_string());
        });
        (lines, listener)
    }

    #[test]
    fn test_program_args_drops_blank_arguments() {
        assert_eq!(
            ProcessExecutor::program_args(&["-v", " ", "", "file.txt"]),
            vec!["-v", "file.txt"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_wrapper_forwards_stdout_and_redirected_stderr() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let configuration = ProcessConfiguration::new(
            vec!["sh".into(), "-c".into(), "echo out; echo err 1>&2; exit 3".into()],
            Some(std::env::vars().collect()),
            Some(temp_dir.path()),
            true,
        )
        .unwrap();

        let (lines, listener) = collector();
        let mut process = ProcessWrapper::start(configuration, vec![listener]).unwrap();
        let status = process.wait_for().unwrap();

        assert_eq!(status.code(), Some(3));
        assert_eq!(process.exit_value(), Some(3));
        assert!(!process.is_running());

        let mut lines = lines.lock().unwrap().clone();
        lines.sort();
        assert_eq!(lines, vec!["err", "out"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_creates_working_directory_and_forwards_output() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let working_directory = temp_dir.path().join("fork");
        let (lines, listener) = collector();

        let mut process =
            ProcessExecutor::launch_with_listeners(&working_directory, "pwd", &["-P", " "], vec![listener])
                .unwrap();
        assert!(process.wait_for().unwrap().success());

        assert!(process.configuration().is_redirecting_error_stream());
        assert_eq!(process.configuration().command_string(), "pwd -P");

        let expected = std::fs::canonicalize(&working_directory).unwrap();
        assert_eq!(
            *lines.lock().unwrap(),
            vec![expected.to_string_lossy().to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_stop_reaches_child_and_unregister() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let (lines, listener) = collector();

        let mut process =
            ProcessExecutor::launch_with_listeners(temp_dir.path(), "cat", &[], vec![Arc::clone(&listener)])
                .unwrap();
        assert!(process.is_running());
        assert!(process.signal_stop().unwrap());

        // cat echoes its stdin and keeps running until stdin closes
        let echoed = WaitTask::wait_for(5_000, TimeUnit::Milliseconds)
            .unwrap()
            .check_every(10)
            .unwrap()
            .on(&|| !lines.lock().unwrap().is_empty());
        assert!(echoed);
        assert_eq!(*lines.lock().unwrap(), vec![TERM_TOKEN.to_string()]);

        process.kill().unwrap();
        process.wait_for().unwrap();
        assert!(!process.signal_stop().unwrap());
        assert!(process.unregister(&listener));
        assert!(!process.unregister(&listener));
    }
}
