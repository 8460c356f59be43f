use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const VERBOSE_LOG_LEVEL: &str = "debug";

/// Install the global fmt subscriber on stderr, bridging `log` records into it.
/// `RUST_LOG` wins over `verbose`; a second call is a no-op.
pub fn init_logging(verbose: bool) -> bool {
    let level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        log::debug!("{}", msg);
    }
}

pub fn print_verbose_with_prefix(verbose: bool, prefix: &str, msg: &str) {
    if verbose {
        log::debug!("{}: {}", prefix, msg);
    }
}

/// Gates diagnostic chatter behind `--verbose`
#[derive(Debug, Clone, Copy)]
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, msg: &str) {
        print_verbose(self.enabled, msg);
    }

    pub fn log_with_prefix(&self, prefix: &str, msg: &str) {
        print_verbose_with_prefix(self.enabled, prefix, msg);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        // Another test may already have installed the subscriber
        init_logging(false);
        assert!(!init_logging(true));
    }

    #[test]
    fn test_verbose_logger() {
        let logger = VerboseLogger::new(true);
        assert!(logger.is_enabled());
        logger.log("visible at debug");
        logger.log_with_prefix("Config", "loaded");
        assert!(!VerboseLogger::new(false).is_enabled());
    }
}
