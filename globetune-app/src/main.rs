mod commands;
mod console;
mod simulated;

use crate::commands::{parse_line, Input, HELP};
use crate::console::ConsolePresenter;
use crate::simulated::SimulatedMedia;
use globetune_core::{
    channel, Catalog, Config, Controller, CoreError, Session, SessionHandle,
};
use std::fs::File;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Catalog used when the config does not name one
const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.toml");

fn main() {
    // Check config for logging.enabled before full config load
    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigNotFound { path }) => {
            info!(
                "Created a config template at {}, continuing with defaults",
                path.display()
            );
            Config::default()
        }
        Err(CoreError::TomlParseError(parse_error)) => {
            error!(
                "Config file {} has a syntax error: {parse_error}",
                Config::config_path().display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let catalog = match load_catalog(&config) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!("Failed to load catalog: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded catalog with {} regions: {}",
        catalog.len(),
        catalog
            .regions()
            .map(|region| region.key())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // Create shared cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();

    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down gracefully...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {}", e);
    }

    let (handle, events) = channel();
    let media = SimulatedMedia::new(handle.clone(), cancel_token.child_token());
    let presenter = ConsolePresenter::new(std::io::stdout());
    let controller = Controller::new(
        Arc::clone(&catalog),
        &config,
        Box::new(media),
        Box::new(presenter),
    );
    let session = Session::new(controller, events, Some(cancel_token.clone()));

    println!("{HELP}\n");
    runtime.spawn(read_commands(handle, catalog, cancel_token));

    let controller = runtime.block_on(session.run());
    info!(
        "Session ended ({}, {} tracks in playlist)",
        controller.state().status(),
        controller.state().active_playlist().len()
    );

    // The stdin reader may still be parked on a blocking read
    runtime.shutdown_background();
}

/// Load the configured catalog file, or the bundled sample
fn load_catalog(config: &Config) -> Result<Catalog, CoreError> {
    match &config.catalog.path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            Catalog::load(path)
        }
        None => Catalog::from_toml_str(SAMPLE_CATALOG),
    }
}

/// Forward stdin commands to the session until quit, EOF or cancellation
async fn read_commands(
    handle: SessionHandle,
    catalog: Arc<Catalog>,
    cancel_token: CancellationToken,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            () = cancel_token.cancelled() => break,
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => match parse_line(&line) {
                Ok(Input::Event(event)) => {
                    if handle.send(event).is_err() {
                        break;
                    }
                }
                Ok(Input::Groups) => println!("Groups: {}", catalog.groups().join(", ")),
                Ok(Input::Help) => println!("{HELP}"),
                Ok(Input::Quit) => {
                    info!("Quit requested");
                    cancel_token.cancel();
                    break;
                }
                Ok(Input::Nothing) => {}
                Err(e) => eprintln!("{e}"),
            },
            Ok(None) => {
                info!("Input closed, shutting down");
                cancel_token.cancel();
                break;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                cancel_token.cancel();
                break;
            }
        }
    }
}

/// Check if file logging is enabled by reading the config file.
/// This is done before full config loading to set up tracing first.
/// Returns `false` if config doesn't exist or can't be parsed.
fn check_file_logging_enabled() -> bool {
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let Ok(content) = std::fs::read_to_string(Config::config_path()) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so they do not interleave with the rendered screen
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if file_logging_enabled {
        let log_path = globetune_core::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
