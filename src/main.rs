use clap::Parser;
use cp_commons::cli::dispatcher::Dispatcher;
use cp_commons::cli::main_types::Cli;
use cp_commons::storage::config::Config;
use cp_commons::utils::logging::init_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    // Command-line flags override the file for this run only
    let mut settings = config.server.clone();
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if cli.debug {
        settings.debug = true;
    }

    if cli.verbose {
        if let Some(config_dir) = &cli.config_dir {
            log::debug!("Using config directory: {}", config_dir);
        }
    }

    let dispatcher = Dispatcher::new(config, settings, config_path, cli.verbose);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error ({}): {}", e.severity().label(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
