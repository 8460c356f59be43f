use crate::error::AssertError;
use crate::io::files;
use crate::lang::{assert, strings};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Everything needed to start, or describe, a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfiguration {
    command: Vec<String>,
    environment: BTreeMap<String, String>,
    working_directory: PathBuf,
    redirecting_error_stream: bool,
}

impl ProcessConfiguration {
    pub fn new(
        command: Vec<String>,
        environment: Option<BTreeMap<String, String>>,
        working_directory: Option<&Path>,
        redirecting_error_stream: bool,
    ) -> Result<Self, AssertError> {
        assert::legal_argument(
            !command.is_empty(),
            "The command used to run the process must be specified!",
        )?;
        assert::legal_argument(
            files::is_directory(working_directory),
            format!(
                "The process working directory ({}) is not valid!",
                working_directory.map_or_else(|| "null".to_string(), |dir| dir.display().to_string())
            ),
        )?;
        let working_directory = assert::not_null(working_directory, "The working directory must not be null!")?;

        Ok(Self {
            command,
            environment: environment.unwrap_or_default(),
            working_directory: working_directory.to_path_buf(),
            redirecting_error_stream,
        })
    }

    /// Capture the program, arguments, effective environment and directory of `command`.
    /// The environment is the parent's, with the command's own overrides and removals applied.
    pub fn from_command(command: &Command, redirecting_error_stream: bool) -> Result<Self, AssertError> {
        let mut arguments = vec![command.get_program().to_string_lossy().into_owned()];
        arguments.extend(command.get_args().map(|arg| arg.to_string_lossy().into_owned()));

        let mut environment: BTreeMap<String, String> = std::env::vars().collect();
        for (key, value) in command.get_envs() {
            let key = key.to_string_lossy().into_owned();
            match value {
                Some(value) => {
                    environment.insert(key, value.to_string_lossy().into_owned());
                }
                None => {
                    environment.remove(&key);
                }
            }
        }

        let working_directory = match command.get_current_dir() {
            Some(dir) => Some(dir.to_path_buf()),
            None => std::env::current_dir().ok(),
        };

        Self::new(
            arguments,
            Some(environment),
            working_directory.as_deref(),
            redirecting_error_stream,
        )
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn command_string(&self) -> String {
        strings::concat(&self.command, strings::SINGLE_SPACE)
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn is_redirecting_error_stream(&self) -> bool {
        self.redirecting_error_stream
    }

    /// A [`Command`] with piped stdin and stdout; stderr is piped only when redirecting
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.command[0]);
        command
            .args(&self.command[1..])
            .current_dir(&self.working_directory)
            .env_clear()
            .envs(&self.environment)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(if self.redirecting_error_stream {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });
        command
    }
}

impl fmt::Display for ProcessConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let environment: Vec<String> = self
            .environment
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();

        write!(
            f,
            "{{ command = {}, working_directory = {}, redirecting_error_stream = {}, environment = {{{}}} }}",
            self.command_string(),
            files::canonical_or_absolute_path(&self.working_directory).display(),
            self.redirecting_error_stream,
            strings::concat(&environment, strings::COMMA_SPACE_DELIMITER)
        )
    }
}
