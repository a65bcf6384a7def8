//! Configuration loading and typed config structures for the ecosystem
//! simulation.
//!
//! The canonical configuration lives in `ecosim-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure and a
//! loader that reads and validates the file. Every key is optional; missing
//! keys take the defaults documented on each field.
//!
//! ```yaml
//! world:
//!   width: 50
//!   height: 50
//!   seed: 42
//! population:
//!   initial_herbivores: 40
//!   initial_predators: 10
//! resources:
//!   max_grass: 20
//! agents:
//!   hunt_bonus: 5
//! simulation:
//!   max_ticks: 1000
//! logging:
//!   level: info
//!   format: pretty
//! ```

use std::path::Path;

use ecosim_agents::AgentsConfig;
use ecosim_world::{Grid, ResourceConfig};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Grid or resource parameters are invalid.
    #[error("invalid world config: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: ecosim_world::WorldError,
    },

    /// Agent parameters are invalid.
    #[error("invalid agent config: {source}")]
    Agents {
        /// The underlying agent error.
        #[from]
        source: ecosim_agents::AgentError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `ecosim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Initial population sizes.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Grass and meat parameters.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Agent energetics and evolution parameters.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Run bounds.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error if a parameter is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error if a parameter is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section against its valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] or [`ConfigError::Agents`] naming the
    /// first bad parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::new(self.world.width, self.world.height)?;
        self.resources.validate()?;
        self.agents.validate()?;
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Grid columns (default: 50).
    #[serde(default = "default_grid_side")]
    pub width: u32,

    /// Grid rows (default: 50).
    #[serde(default = "default_grid_side")]
    pub height: u32,

    /// Random seed for reproducibility. A random seed is drawn and logged
    /// when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_grid_side(),
            height: default_grid_side(),
            seed: None,
        }
    }
}

/// Initial population sizes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Herbivores placed at initialization (default: 40).
    #[serde(default = "default_initial_herbivores")]
    pub initial_herbivores: u32,

    /// Predators placed at initialization (default: 10).
    #[serde(default = "default_initial_predators")]
    pub initial_predators: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_herbivores: default_initial_herbivores(),
            initial_predators: default_initial_predators(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Log a population summary every N ticks (0 = never).
    #[serde(default = "default_summary_interval_ticks")]
    pub summary_interval_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            summary_interval_ticks: default_summary_interval_ticks(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: pretty).
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

const fn default_grid_side() -> u32 {
    50
}

const fn default_initial_herbivores() -> u32 {
    40
}

const fn default_initial_predators() -> u32 {
    10
}

const fn default_max_ticks() -> u64 {
    1000
}

const fn default_summary_interval_ticks() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}
