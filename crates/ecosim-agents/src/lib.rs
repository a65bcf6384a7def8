//! Agent decision, evolution, and lifecycle for the ecosystem simulation.
//!
//! This crate contains the logic layer for agents -- everything that operates
//! on agent state without owning the simulation loop. It sits between
//! `ecosim-types`/`ecosim-world` (vocabulary and substrate) and `ecosim-core`
//! (scheduling and orchestration).
//!
//! # Modules
//!
//! - [`actions`] -- Action dispatch and per-action handlers.
//! - [`agent`] -- The [`Agent`] record.
//! - [`config`] -- Per-kind energetics and evolution parameters ([`AgentsConfig`]).
//! - [`death`] -- Death conditions and carcass deposition ([`Death`]).
//! - [`decision`] -- The fuzzy cognitive map ([`DecisionEngine`]) and action selection.
//! - [`error`] -- Error types for agent configuration and bookkeeping ([`AgentError`]).
//! - [`genome`] -- [`Genome`] representation, [`mutate`], [`crossover`], [`distance`].
//! - [`lifecycle`] -- One agent's full turn ([`step_agent`]).
//! - [`perception`] -- Noisy sensing of the neighbourhood ([`Perception`]).
//! - [`population`] -- The live agent set and occupancy ([`Population`]).
//! - [`reproduction`] -- Mating, offspring, and speciation ([`Birth`]).
//! - [`species`] -- Monotonic species IDs ([`SpeciesAllocator`]).

pub mod actions;
pub mod agent;
pub mod config;
pub mod death;
pub mod decision;
pub mod error;
pub mod genome;
pub mod lifecycle;
pub mod perception;
pub mod population;
pub mod reproduction;
pub mod species;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod testing;

// Re-export primary types at crate root for convenience.
pub use actions::ActionOutcome;
pub use agent::Agent;
pub use config::{AgentsConfig, KindConfig};
pub use death::Death;
pub use decision::DecisionEngine;
pub use error::AgentError;
pub use genome::{Genome, crossover, distance, mutate};
pub use lifecycle::{StepContext, StepOutcome, step_agent};
pub use perception::{Perception, perceive};
pub use population::Population;
pub use reproduction::Birth;
pub use species::SpeciesAllocator;
