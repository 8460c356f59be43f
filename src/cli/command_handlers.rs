use crate::cli::main_types::ConfigCommands;
use crate::error::{AppError, FileError};
use crate::net::client_server::{self, ClientRequestHandler, ServerSettings};
use crate::net::network;
use crate::net::sample::echo::{self, EchoHandler};
use crate::net::sample::message::MessageHandler;
use crate::storage::config::Config;
use crate::tools::{self, DependencyGraph};
use crate::util::PropertiesDiff;
use crate::utils::logging::print_verbose;
use crate::utils::validation;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;

const STOP_PROMPT: &str = "Please enter 'exit' to stop the server.";

/// The report style subcommands that print and exit
#[derive(Default)]
pub struct ToolsHandler;

impl ToolsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn abs_path(&self, pathnames: &[String], verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting abs-path command");
        validation::require_arguments(pathnames, "cp-commons abs-path <PATHNAME>...")?;

        for line in tools::abs_path_report(pathnames) {
            println!("{}", line);
        }
        Ok(())
    }

    pub fn env(&self, names: &[String], verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting env command");
        validation::require_arguments(names, "cp-commons env <NAME>...")?;

        for line in tools::env_var_report(names) {
            println!("{}", line);
        }
        Ok(())
    }

    pub fn props_diff(&self, expected: &str, actual: &str, xml: bool, verbose: bool) -> Result<(), AppError> {
        print_verbose(
            verbose,
            &format!("Comparing properties ({}) with ({})", expected, actual),
        );

        let expected = Path::new(expected);
        let actual = Path::new(actual);
        let report = if xml {
            PropertiesDiff::diff_xml_files(expected, actual)?
        } else {
            PropertiesDiff::diff_files(expected, actual)?
        };

        if report.is_identical() {
            println!("Properties are identical.");
        } else {
            println!("{}", report);
        }
        Ok(())
    }

    pub fn deps(&self, files: &[String], all: bool, verbose: bool) -> Result<(), AppError> {
        validation::require_arguments(files, "cp-commons deps <FILE>...")?;

        let mut graph = DependencyGraph::new();
        for file in files {
            let path = Path::new(file);
            if !path.is_file() {
                return Err(FileError::NotFound { path: file.clone() }.into());
            }
            let parsed = graph.parse_file(path)?;
            print_verbose(verbose, &format!("Parsed ({}) dependencies from ({})", parsed, file));
        }

        let dependencies = if all {
            graph.dependencies()
        } else {
            graph.duplicates()
        };
        for dependency in dependencies {
            println!("{}", dependency);
        }
        Ok(())
    }

    pub fn interfaces(&self, verbose: bool) -> Result<(), AppError> {
        print_verbose(verbose, "Listing active network interfaces");

        let interfaces = network::active_network_interfaces()?;
        if interfaces.is_empty() {
            println!("No active network interfaces found");
        }
        for interface in interfaces {
            println!("{}", interface.name);
            for address in interface.addresses {
                println!("  {}", address);
            }
        }
        Ok(())
    }
}

/// The sample socket programs
#[derive(Default)]
pub struct SampleHandler;

impl SampleHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn echo_server(&self, settings: &ServerSettings, verbose: bool) -> Result<(), AppError> {
        self.serve_until_exit("Echo Server", settings, EchoHandler, verbose).await
    }

    pub async fn message_server(&self, settings: &ServerSettings, verbose: bool) -> Result<(), AppError> {
        self.serve_until_exit("Message Server", settings, MessageHandler, verbose)
            .await
    }

    pub async fn echo_client(&self, settings: &ServerSettings, verbose: bool) -> Result<(), AppError> {
        validation::validate_host(&settings.host)?;
        validation::validate_port(settings.port, false)?;
        print_verbose(
            verbose,
            &format!("Connecting to {}:{}", settings.host, settings.port),
        );

        let stdin = BufReader::new(tokio::io::stdin());
        let exchanged = echo::run_echo_client(settings, stdin, tokio::io::stdout()).await?;
        print_verbose(verbose, &format!("Exchanged ({}) messages", exchanged));
        Ok(())
    }

    async fn serve_until_exit<H: ClientRequestHandler>(
        &self,
        name: &str,
        settings: &ServerSettings,
        handler: H,
        verbose: bool,
    ) -> Result<(), AppError> {
        validation::validate_host(&settings.host)?;
        validation::validate_port(settings.port, true)?;
        print_verbose(verbose, &format!("Starting {} with {:?}", name, settings));

        let server = client_server::start_server(name, settings, handler).await?;
        println!(
            "{} listening on {}. {}",
            server.name(),
            server.local_addr(),
            STOP_PROMPT
        );

        client_server::wait_for_user_input(BufReader::new(tokio::io::stdin()), echo::EXIT_COMMAND, STOP_PROMPT)
            .await
            .map_err(crate::error::NetError::Io)?;

        server.stop().await;
        Ok(())
    }
}

pub struct ConfigHandler {
    config_path: Option<PathBuf>,
}

impl ConfigHandler {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    pub fn handle(&self, command: ConfigCommands, config: &mut Config, verbose: bool) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");
                match &self.config_path {
                    Some(path) => println!("File: {}", path.display()),
                    None => match Config::config_file_path() {
                        Ok(path) => println!("File: {}", path.display()),
                        Err(_) => println!("File: (no configuration directory)"),
                    },
                }

                let server = &config.server;
                println!("\n[server]");
                println!("  host: {}", server.host);
                println!("  port: {}", server.port);
                println!("  debug: {}", server.debug);
                println!("  reuse_address: {}", server.reuse_address);
                println!("  accept_timeout_ms: {}", server.accept_timeout_ms);
                println!("  tcp_nodelay: {}", server.tcp_nodelay);
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set - key: {}, value: {}", key, value),
                );

                config.set_value(&key, &value)?;
                config.save(self.config_path.clone())?;
                println!("✅ Set {} to: {}", key, value);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_set_persists() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let handler = ConfigHandler::new(Some(config_path.clone()));

        let mut config = Config::default();
        handler
            .handle(
                ConfigCommands::Set {
                    key: "server.port".to_string(),
                    value: "12345".to_string(),
                },
                &mut config,
                false,
            )
            .unwrap();

        let loaded = Config::load(Some(config_path)).unwrap();
        assert_eq!(loaded.server.port, 12345);
    }

    #[test]
    fn test_config_set_rejects_unknown_key() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let handler = ConfigHandler::new(Some(config_path.clone()));

        let mut config = Config::default();
        let result = handler.handle(
            ConfigCommands::Set {
                key: "server.colour".to_string(),
                value: "blue".to_string(),
            },
            &mut config,
            false,
        );
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!config_path.exists());
    }

    #[test]
    fn test_deps_reports_missing_file() {
        let result = ToolsHandler::new().deps(&["/no/such/tree.txt".to_string()], false, false);
        assert!(matches!(result, Err(AppError::File(FileError::NotFound { .. }))));
    }

    #[test]
    fn test_props_diff_reads_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let expected = temp_dir.path().join("a.properties");
        let actual = temp_dir.path().join("b.properties");
        std::fs::write(&expected, "a=1\n").unwrap();
        std::fs::write(&actual, "a=1\n").unwrap();

        assert!(ToolsHandler::new()
            .props_diff(
                &expected.to_string_lossy(),
                &actual.to_string_lossy(),
                false,
                false
            )
            .is_ok());
    }
}
