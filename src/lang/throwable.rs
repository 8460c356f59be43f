use std::error::Error;
use std::fmt::Write;

/// Render an error and its `source()` chain, one cause per line
pub fn error_to_string(error: &dyn Error) -> String {
    let mut buffer = error.to_string();
    let mut cause = error.source();
    while let Some(source) = cause {
        let _ = write!(buffer, "\nCaused by: {}", source);
        cause = source.source();
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use std::io;

    #[test]
    fn test_error_without_source() {
        let error = io::Error::new(io::ErrorKind::Other, "boom");
        assert_eq!(error_to_string(&error), "boom");
    }

    #[test]
    fn test_error_with_source_chain() {
        let error = FileError::Io {
            path: "/tmp/x".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let rendered = error_to_string(&error);
        assert!(rendered.starts_with("File I/O error at /tmp/x: denied"));
        assert!(rendered.ends_with("Caused by: denied"));
    }
}
