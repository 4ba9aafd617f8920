use clap::Parser;
use eyre::{Context, Result};
use log::{LevelFilter, error, info, warn};
use std::any::Any;
use std::fs;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;
mod config;

use cli::Cli;
use cli::display::{self, ConsoleObserver};
use config::Config;
use toolchat::llm::OpenAiClient;
use toolchat::{Settings, ToolRegistry, TurnObserver, TurnOrchestrator};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolchat")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolchat.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Pipe(target));
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
            builder.init();
        }
        Err(_) => {
            // Level comes from the config file once it is loaded
            builder.filter_level(LevelFilter::Trace);
            builder.init();
            log::set_max_level(LevelFilter::Info);
        }
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Send panic reports to the log file; a caught tool panic must not print
/// into the conversation.
fn log_panics() {
    std::panic::set_hook(Box::new(|info| {
        error!("{}", panic_summary(info.payload(), info.location()));
    }));
}

fn panic_summary(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");

    match location {
        Some(location) => format!("panic at {}:{}: {}", location.file(), location.line(), message),
        None => format!("panic: {}", message),
    }
}

fn apply_log_level(config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = &config.log_level {
        match level.parse::<LevelFilter>() {
            Ok(filter) => log::set_max_level(filter),
            Err(_) => warn!("Ignoring unknown log_level '{}'", level),
        }
    }
}

/// Environment overrides, then command-line overrides, then the credential
fn resolve_settings(cli: &Cli, config: &mut Config) -> toolchat::Result<Settings> {
    config.apply_env()?;
    cli.apply_to(config);
    config.settings()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging().context("Failed to setup logging")?;
    log_panics();

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&config);

    info!("Starting with config from: {:?}", cli.config);

    // Configuration errors are reported once; the loop never starts
    let settings = match resolve_settings(&cli, &mut config) {
        Ok(settings) => settings,
        Err(e) => {
            display::print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    info!("Using {:?}", settings);

    let client = OpenAiClient::from_settings(&settings, config.openai_config()).context("Failed to create LLM client")?;
    let registry = Arc::new(ToolRegistry::standard());
    let observer: Arc<dyn TurnObserver> = Arc::new(ConsoleObserver);

    let mut orchestrator = TurnOrchestrator::new(Arc::new(client), registry, settings, config.orchestrator_config())
        .with_observer(observer.clone());

    display::print_welcome();
    cli::repl::run(&mut orchestrator, observer.as_ref(), cli.is_verbose())
        .await
        .context("Interactive session failed")?;

    Ok(())
}
