//! cmdbus console - dispatches command lines read from stdin.

use cmdbus::config::{Config, LogFormat, LoggingConfig};
use cmdbus::console::{self, ConsoleCaller};
use cmdbus::handlers::builtin::{self, BanList, RegionStore};
use cmdbus::{Dispatcher, Registry};
use std::path::Path;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "cmdbus.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; the default path is optional
    let explicit = std::env::args().nth(1);
    let config = match explicit.as_deref() {
        Some(path) => Config::load_validated(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load_validated(DEFAULT_CONFIG)?,
        None => Config::default(),
    };

    init_tracing(&config.logging);
    cmdbus::metrics::init();

    info!(
        config = explicit.as_deref().unwrap_or(DEFAULT_CONFIG),
        default_permission = %config.dispatch.default_permission,
        join_tail = ?config.dispatch.join_tail,
        "Starting cmdbus console"
    );

    let registry = Arc::new(Registry::with_default_permission(
        config.dispatch.default_permission.clone(),
    ));
    let units = builtin::units(
        &registry,
        Arc::new(BanList::new()),
        Arc::new(RegionStore::new()),
    );
    let registered = registry.register_all(units);
    info!(registrations = registered, aliases = registry.len(), "Commands registered");

    let dispatcher = Dispatcher::from_config(Arc::clone(&registry), &config);
    let caller = ConsoleCaller::default();
    let reader = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = console::run_lines(reader, &dispatcher, &caller) => {
            match result {
                Ok(count) => info!(count, "Console closed"),
                Err(e) => error!(error = %e, "Console read failed"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    for (command, count) in registry.command_stats() {
        info!(command = %command, count, "Command usage");
    }
    tracing::debug!(metrics = %cmdbus::metrics::gather_metrics(), "Final metrics");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init(),
    }
}
