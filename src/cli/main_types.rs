use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cp-commons")]
#[command(about = "Diagnostic tools and sample socket programs built on the cp-commons helpers")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, env = "CP_COMMONS_CONFIG_DIR")]
    pub config_dir: Option<String>,

    /// Host the sample programs bind to or connect to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port the sample programs bind to or connect to
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Log every message exchanged by the sample programs
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the absolute location of each pathname and whether it exists
    AbsPath {
        #[arg(required = true)]
        pathnames: Vec<String>,
    },
    /// Print the value of each environment variable
    Env {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Compare two .properties files
    PropsDiff {
        expected: String,
        actual: String,
        /// Read both files as XML properties
        #[arg(long)]
        xml: bool,
    },
    /// Report artifacts with more than one version across dependency:tree outputs
    Deps {
        #[arg(required = true)]
        files: Vec<String>,
        /// List every dependency instead of only duplicates
        #[arg(long)]
        all: bool,
    },
    /// List active network interfaces and their addresses
    Interfaces,
    /// Run the line echo server until 'exit' is entered
    EchoServer,
    /// Send lines from stdin to the echo server until 'exit'
    EchoClient,
    /// Run the length-prefixed message server until 'exit' is entered
    MessageServer,
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key, e.g. server.port
        key: String,
        /// Configuration value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "cp-commons",
            "echo-server",
            "--host",
            "127.0.0.1",
            "--port",
            "4000",
            "--debug",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::EchoServer));
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(4000));
        assert!(cli.debug);
    }

    #[test]
    fn test_report_commands_require_arguments() {
        assert!(Cli::try_parse_from(["cp-commons", "abs-path"]).is_err());
        assert!(Cli::try_parse_from(["cp-commons", "env"]).is_err());

        let cli = Cli::try_parse_from(["cp-commons", "deps", "tree.txt", "--all"]).unwrap();
        match cli.command {
            Commands::Deps { files, all } => {
                assert_eq!(files, vec!["tree.txt"]);
                assert!(all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::try_parse_from(["cp-commons", "config", "set", "server.port", "9000"]).unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Set { key, value },
            } => {
                assert_eq!(key, "server.port");
                assert_eq!(value, "9000");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
