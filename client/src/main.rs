//! stratoctl - Entry Point
//!
//! A provisioning client for configuring and launching cloud deployments
//! against a Strato orchestrator backend.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use stratoctl::app::options::AppOptions;
use stratoctl::app::run::{run, Command};
use stratoctl::logs::{init_logging, LogOptions};
use stratoctl::storage::layout::StorageLayout;
use stratoctl::storage::settings::load_settings;
use stratoctl::workers::poller;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        println!("stratoctl {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // Resolve the storage layout, honoring a --home override
    let layout = match cli_args.get("home") {
        Some(home) => StorageLayout::new(home),
        None => StorageLayout::default(),
    };

    // Retrieve the settings file; defaults apply when it is absent
    let settings = match load_settings(&layout.settings_file()).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging; --log-level overrides the settings file
    let log_level = match cli_args.get("log-level") {
        Some(value) => match value.parse() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => settings.log_level.clone(),
    };
    let log_options = LogOptions {
        log_level,
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = AppOptions {
        backend_base_url: cli_args
            .get("backend")
            .cloned()
            .unwrap_or_else(|| settings.backend.base_url.clone()),
        storage: layout,
        poller: poller::Options::default(),
    };

    let command = match Command::from_args(&cli_args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(options, command).await {
        error!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
