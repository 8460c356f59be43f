use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("AssertError: {0}")]
    Assert(#[from] AssertError),
    #[error("FileError: {0}")]
    File(#[from] FileError),
    #[error("NetError: {0}")]
    Net(#[from] NetError),
    #[error("ProcessError: {0}")]
    Process(#[from] ProcessError),
    #[error("PropertiesError: {0}")]
    Properties(#[from] PropertiesError),
    #[error("ArchiveError: {0}")]
    Archive(#[from] ArchiveError),
    #[error("DataError: {0}")]
    Data(#[from] DataError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
}

/// Argument and state checks raised by `lang::assert`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertError {
    #[error("{0}")]
    IllegalArgument(String),
    #[error("{0}")]
    IllegalState(String),
    #[error("{0}")]
    NullValue(String),
}

impl AssertError {
    pub fn message(&self) -> &str {
        match self {
            AssertError::IllegalArgument(message)
            | AssertError::IllegalState(message)
            | AssertError::NullValue(message) => message,
        }
    }
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Pathname ({path}) could not be found!")]
    NotFound { path: String },
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum NetError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        source: std::io::Error,
    },
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
    #[error("Network interfaces unavailable: {0}")]
    Interfaces(String),
    #[error("Socket I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{message}")]
    PidUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    #[error("Failed to start process ({command}): {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Process I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    pub fn pid_unavailable(message: impl Into<String>) -> Self {
        ProcessError::PidUnavailable {
            message: message.into(),
            source: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum PropertiesError {
    #[error("Failed to read properties: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed \\uXXXX encoding at line {line}")]
    MalformedUnicodeEscape { line: usize },
    #[error("Invalid properties XML: {message}")]
    Xml { message: String },
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("ZIP entry ({name}) resolves outside of the target directory")]
    UnsafeEntry { name: String },
    #[error("ZIP I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to convert object to JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Value is not a JSON object: {0}")]
    NotAnObject(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    Parse { message: String },
    #[error("Configuration serialize error: {message}")]
    Serialize { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Usage: {0}")]
    Usage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "critical",
            ErrorSeverity::High => "error",
            ErrorSeverity::Medium => "warning",
            ErrorSeverity::Low => "notice",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Assert(_) => ErrorSeverity::Medium,
            AppError::File(FileError::NotFound { .. }) => ErrorSeverity::Medium,
            AppError::File(_) => ErrorSeverity::High,
            AppError::Net(net_error) => match net_error {
                NetError::Bind { .. } => ErrorSeverity::Critical,
                NetError::InvalidAddress(_) => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            AppError::Process(_) => ErrorSeverity::High,
            AppError::Properties(_) => ErrorSeverity::Medium,
            AppError::Archive(ArchiveError::UnsafeEntry { .. }) => ErrorSeverity::Critical,
            AppError::Archive(_) => ErrorSeverity::High,
            AppError::Data(_) => ErrorSeverity::Low,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Cli(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Net(NetError::Bind { .. }) => {
                Some("Another process may own the port; try '--port <n>'".to_string())
            }
            AppError::Net(NetError::Connect { .. }) => {
                Some("Start the server first with 'cp-commons echo-server'".to_string())
            }
            AppError::Config(ConfigError::UnknownKey(_)) => Some(
                "Valid keys: server.host, server.port, server.debug, server.reuse_address, \
                 server.accept_timeout_ms, server.tcp_nodelay"
                    .to_string(),
            ),
            AppError::File(FileError::NotFound { .. }) => {
                Some("Check the pathname with 'cp-commons abs-path <path>'".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_error_display_is_bare_message() {
        let err = AssertError::IllegalArgument("The Link relation (rel) must be specified!".into());
        assert_eq!(
            format!("{}", err),
            "The Link relation (rel) must be specified!"
        );
        assert_eq!(err.message(), "The Link relation (rel) must be specified!");

        let app_err = AppError::from(err);
        assert_eq!(
            format!("{}", app_err),
            "AssertError: The Link relation (rel) must be specified!"
        );
    }

    #[test]
    fn test_file_error_display() {
        let err = FileError::NotFound {
            path: "/no/such/file".to_string(),
        };
        assert_eq!(format!("{}", err), "Pathname (/no/such/file) could not be found!");
    }

    #[test]
    fn test_pid_unavailable_without_source() {
        let err = ProcessError::pid_unavailable("The process ID (PID) is not available (x)!");
        assert_eq!(
            format!("{}", err),
            "The process ID (PID) is not available (x)!"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_severity_mapping() {
        let bind = AppError::Net(NetError::Bind {
            address: "127.0.0.1:1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        });
        assert_eq!(bind.severity(), ErrorSeverity::Critical);
        assert!(bind.troubleshooting_hint().is_some());

        let data = AppError::Data(DataError::NotAnObject("1".to_string()));
        assert_eq!(data.severity(), ErrorSeverity::Low);
        assert!(data.troubleshooting_hint().is_none());

        let unsafe_entry = AppError::Archive(ArchiveError::UnsafeEntry {
            name: "../evil".to_string(),
        });
        assert_eq!(unsafe_entry.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_config_error_display() {
        let config_err = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            format!("{}", config_err),
            "Invalid configuration value for 'server.port': abc"
        );
        if let ConfigError::InvalidValue { reason, .. } = config_err {
            assert_eq!(reason, "not a number");
        }
    }
}
