//! txweb main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use txweb_api::{start_server, AppState};
use txweb_config::{Config, ConfigError, ConfigErrorSeverity, ConfigResult};
use txweb_core::{InMemoryTransactionsRepository, TransactionsController};

#[derive(Parser, Debug)]
#[command(name = "txweb")]
#[command(version = "0.1.0")]
#[command(about = "A small in-memory transactions Web API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Disable the simulated store latency
    #[arg(long)]
    no_latency: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Log a configuration error at the level its severity calls for
fn report_config_error(error: &ConfigError) {
    match error.severity() {
        ConfigErrorSeverity::Warning => log::warn!("{}; using default configuration", error),
        ConfigErrorSeverity::Error => {
            log::error!("Invalid configuration:\n{}", error.to_details())
        }
    }
}

/// Load the config file; warning-level failures fall back to defaults
fn load_config(args: &Args) -> Result<(Config, Option<ConfigError>), ConfigError> {
    match Config::load(&args.config) {
        Ok(config) => Ok((config, None)),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => {
            Ok((Config::default(), Some(e)))
        }
        Err(e) => Err(e),
    }
}

/// Apply command line overrides and validate the result
fn apply_overrides(mut config: Config, args: &Args) -> ConfigResult<Config> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_latency {
        config = config.without_latency();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, warning) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            init_logging("info");
            report_config_error(&e);
            return Err(e.into());
        }
    };

    init_logging(&config.logging.level);
    if let Some(warning) = warning {
        report_config_error(&warning);
    }

    let config = match apply_overrides(config, &args) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&e);
            return Err(e.into());
        }
    };

    log::info!(
        "Config loaded: bind={}, seed={}",
        config.bind_address(),
        config.store.seed
    );

    let rt = Runtime::new()?;
    rt.block_on(async {
        let repository = Arc::new(InMemoryTransactionsRepository::from_config(&config.store));
        let latency = repository.latency();
        match repository.len().await {
            Some(len) => log::info!(
                "Transaction store ready: {} records, read delay {:?}, write delay {:?}",
                len,
                latency.read,
                latency.write
            ),
            None => log::warn!("Transaction store is unavailable"),
        }

        let state = AppState::new(TransactionsController::new(repository), config);
        start_server(state).await
    })?;

    Ok(())
}
