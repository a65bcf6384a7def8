//! Scheduling and orchestration for the ecosystem simulation.
//!
//! This crate owns the tick loop that drives the simulation: one resource
//! growth pass followed by every live agent taking its turn in a freshly
//! shuffled order.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `ecosim-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Bounded run loop with per-tick callbacks.
//! - [`scheduler`] -- The [`Ecosystem`] that owns the world and steps it.
//! - [`tick`] -- Per-tick [`TickSummary`] bookkeeping.

pub mod config;
pub mod runner;
pub mod scheduler;
pub mod tick;

pub use config::{ConfigError, LogFormat, SimulationConfig};
pub use runner::{
    LoggingCallback, NoOpCallback, SimulationEndReason, SimulationResult, TickCallback, run,
};
pub use scheduler::{Ecosystem, SchedulerError};
pub use tick::TickSummary;
