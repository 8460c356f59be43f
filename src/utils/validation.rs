//! Validation of user-supplied connection arguments

use crate::error::CliError;

/// Validate that a host name or address is usable for a socket
pub fn validate_host(host: &str) -> crate::Result<()> {
    if host.trim().is_empty() {
        return Err(CliError::InvalidArguments("Host cannot be empty".to_string()).into());
    }

    if host.chars().any(char::is_whitespace) {
        return Err(CliError::InvalidArguments(format!(
            "Invalid host '{}': host cannot contain whitespace",
            host
        ))
        .into());
    }

    Ok(())
}

/// Port 0 asks the OS for an ephemeral port and is only allowed for servers
pub fn validate_port(port: u16, allow_ephemeral: bool) -> crate::Result<()> {
    if port == 0 && !allow_ephemeral {
        return Err(CliError::InvalidArguments(
            "Port 0 is only valid when starting a server".to_string(),
        )
        .into());
    }

    Ok(())
}

/// At least one argument must be given to the report commands
pub fn require_arguments<S>(args: &[S], usage: &str) -> crate::Result<()> {
    if args.is_empty() {
        return Err(CliError::Usage(usage.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host_accepts_valid_hosts() {
        assert!(validate_host("localhost").is_ok());
        assert!(validate_host("127.0.0.1").is_ok());
        assert!(validate_host("::1").is_ok());
    }

    #[test]
    fn test_validate_host_rejects_invalid_hosts() {
        assert!(validate_host("").is_err());
        assert!(validate_host("   ").is_err());
        assert!(validate_host("local host").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(validate_port(10235, false).is_ok());
        assert!(validate_port(0, true).is_ok());
        assert!(validate_port(0, false).is_err());
    }

    #[test]
    fn test_require_arguments() {
        assert!(require_arguments(&["a"], "usage").is_ok());
        let err = require_arguments::<&str>(&[], "cp-commons env <NAME>...").unwrap_err();
        assert_eq!(err.to_string(), "CliError: Usage: cp-commons env <NAME>...");
    }
}
