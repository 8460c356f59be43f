use crate::cli::command_handlers::{ConfigHandler, SampleHandler, ToolsHandler};
use crate::cli::main_types::Commands;
use crate::error::AppError;
use crate::storage::config::{Config, ServerSettings};
use crate::utils::logging::VerboseLogger;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    settings: ServerSettings,
    config_path: Option<PathBuf>,
    logger: VerboseLogger,
}

impl Dispatcher {
    /// `settings` are the server settings in effect for this run: the file's, plus any flag overrides
    pub fn new(config: Config, settings: ServerSettings, config_path: Option<PathBuf>, verbose: bool) -> Self {
        let logger = VerboseLogger::new(verbose);
        logger.log_with_prefix(
            "Config",
            &format!(
                "server {}:{} (debug = {})",
                settings.host, settings.port, settings.debug
            ),
        );

        Self {
            config,
            settings,
            config_path,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    pub async fn dispatch(mut self, command: Commands) -> Result<(), AppError> {
        let verbose = self.logger.is_enabled();
        self.logger.log(&format!("Dispatching {:?}", command));

        match command {
            Commands::AbsPath { pathnames } => ToolsHandler::new().abs_path(&pathnames, verbose),
            Commands::Env { names } => ToolsHandler::new().env(&names, verbose),
            Commands::PropsDiff { expected, actual, xml } => {
                ToolsHandler::new().props_diff(&expected, &actual, xml, verbose)
            }
            Commands::Deps { files, all } => ToolsHandler::new().deps(&files, all, verbose),
            Commands::Interfaces => ToolsHandler::new().interfaces(verbose),
            Commands::EchoServer => {
                SampleHandler::new()
                    .echo_server(&self.settings, verbose)
                    .await
            }
            Commands::EchoClient => {
                SampleHandler::new()
                    .echo_client(&self.settings, verbose)
                    .await
            }
            Commands::MessageServer => {
                SampleHandler::new()
                    .message_server(&self.settings, verbose)
                    .await
            }
            Commands::Config { command } => {
                ConfigHandler::new(self.config_path.clone()).handle(command, &mut self.config, verbose)
            }
        }
    }
}
