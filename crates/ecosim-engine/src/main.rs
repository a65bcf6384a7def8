//! Driver binary for the ecosystem simulation.
//!
//! Loads configuration, initializes the ecosystem, and runs the tick loop
//! until the tick bound is reached or every agent is dead.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$ECOSIM_CONFIG` or `ecosim-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the grid, resources, and initial population
//! 4. Run the simulation loop
//! 5. Log the result

mod error;

use std::path::PathBuf;

use ecosim_core::runner::{self, LoggingCallback};
use ecosim_core::config::LoggingConfig;
use ecosim_core::{Ecosystem, LogFormat, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Environment variable naming an alternative config file.
const CONFIG_ENV: &str = "ECOSIM_CONFIG";

/// Config file looked up in the working directory by default.
const DEFAULT_CONFIG_FILE: &str = "ecosim-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the ecosystem
/// cannot be built from it.
fn main() -> Result<(), EngineError> {
    // Config comes first so its log level can seed the filter. `RUST_LOG`
    // still wins when set.
    let (config, config_source) = load_config()?;

    init_tracing(&config.logging);

    info!("ecosim-engine starting");
    info!(
        source = %config_source,
        width = config.world.width,
        height = config.world.height,
        seed = ?config.world.seed,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    let mut ecosystem = Ecosystem::initialize(&config)?;

    let mut callback = LoggingCallback::new(config.simulation.summary_interval_ticks);
    let result = runner::run(&mut ecosystem, config.simulation.max_ticks, &mut callback);

    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        seed = ecosystem.seed(),
        "ecosim-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// Reads the file named by `$ECOSIM_CONFIG` if set, otherwise
/// `ecosim-config.yaml` in the working directory. A missing default file
/// falls back to built-in defaults; a missing explicit file is an error.
/// Returns the config and a description of where it came from, since
/// logging is not yet initialized.
fn load_config() -> Result<(SimulationConfig, String), EngineError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, path.display().to_string()));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        let config = SimulationConfig::from_file(&default_path)?;
        Ok((config, DEFAULT_CONFIG_FILE.to_owned()))
    } else {
        Ok((SimulationConfig::default(), "defaults".to_owned()))
    }
}

/// Install the global subscriber in the configured format.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
