//! Configuration for agent energetics, lifespan, and evolution.
//!
//! [`AgentsConfig`] bundles every agent tunable so that callers (scheduler,
//! tests) can override defaults. It deserializes from the `agents` section
//! of the simulation YAML; every field is optional and falls back to the
//! defaults below.

use ecosim_types::AgentKind;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Per-kind energetics and lifespan.
///
/// A kind section in YAML must list every field; only whole sections fall
/// back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    /// Energy cap.
    pub max_energy: u32,

    /// Energy of agents created at initialization.
    pub initial_energy: u32,

    /// Minimum energy to initiate or accept mating.
    ///
    /// Each parent pays half of this on a successful mating.
    pub reproduction_threshold: u32,

    /// Minimum age to initiate or accept mating.
    pub min_reproduction_age: u32,

    /// Age beyond which the agent dies of old age.
    pub max_age: u32,

    /// Energy a newborn starts with.
    pub offspring_energy: u32,

    /// Energy spent at the end of every step.
    pub metabolic_cost: u32,
}

impl KindConfig {
    /// Defaults for herbivores: cheaper to sustain, breed younger.
    pub const fn herbivore() -> Self {
        Self {
            max_energy: 50,
            initial_energy: 20,
            reproduction_threshold: 20,
            min_reproduction_age: 10,
            max_age: 150,
            offspring_energy: 10,
            metabolic_cost: 1,
        }
    }

    /// Defaults for predators: larger reserves, breed later.
    pub const fn predator() -> Self {
        Self {
            max_energy: 80,
            initial_energy: 30,
            reproduction_threshold: 30,
            min_reproduction_age: 15,
            max_age: 200,
            offspring_energy: 10,
            metabolic_cost: 1,
        }
    }

    /// Energy each parent pays when an offspring is produced.
    pub const fn reproduction_cost(&self) -> u32 {
        self.reproduction_threshold / 2
    }

    fn validate(&self, kind: AgentKind) -> Result<(), AgentError> {
        if self.max_energy == 0 {
            return Err(invalid(kind, "max_energy", "must be at least 1"));
        }
        for (name, value) in [
            ("initial_energy", self.initial_energy),
            ("offspring_energy", self.offspring_energy),
        ] {
            if value == 0 || value > self.max_energy {
                return Err(invalid(
                    kind,
                    name,
                    &format!("{value} must be in [1, {}]", self.max_energy),
                ));
            }
        }
        if self.reproduction_threshold < 2 {
            return Err(invalid(kind, "reproduction_threshold", "must be at least 2"));
        }
        Ok(())
    }
}

fn invalid(kind: AgentKind, field: &str, reason: &str) -> AgentError {
    AgentError::InvalidParameter {
        name: format!("{kind}.{field}"),
        reason: reason.to_owned(),
    }
}

/// Configuration for all agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Herbivore energetics.
    pub herbivore: KindConfig,

    /// Predator energetics.
    pub predator: KindConfig,

    /// Energy a predator gains from a successful hunt (default: 5).
    pub hunt_bonus: u32,

    /// Meat left on the cell when an agent starves or dies of old age
    /// (default: 5).
    pub carcass_meat: u32,

    /// Per-weight probability of mutation in offspring (default: 0.1).
    pub mutation_rate: f64,

    /// Half-width of the uniform mutation perturbation (default: 0.2).
    pub mutation_strength: f64,

    /// Half-width of the jitter applied to seed genomes (default: 0.3).
    pub initial_weight_jitter: f64,

    /// Half-width of the noise on proximity perception (default: 0.2).
    pub perception_noise: f64,

    /// Genome distance above which an offspring founds a new species
    /// (default: 0.5).
    pub speciation_threshold: f64,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            herbivore: KindConfig::herbivore(),
            predator: KindConfig::predator(),
            hunt_bonus: 5,
            carcass_meat: 5,
            mutation_rate: 0.1,
            mutation_strength: 0.2,
            initial_weight_jitter: 0.3,
            perception_noise: 0.2,
            speciation_threshold: 0.5,
        }
    }
}

impl AgentsConfig {
    /// The energetics of the given kind.
    pub const fn kind(&self, kind: AgentKind) -> &KindConfig {
        match kind {
            AgentKind::Herbivore => &self.herbivore,
            AgentKind::Predator => &self.predator,
        }
    }

    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AgentError> {
        self.herbivore.validate(AgentKind::Herbivore)?;
        self.predator.validate(AgentKind::Predator)?;

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(global("mutation_rate", "must be a probability in [0, 1]"));
        }
        // Half-widths of uniform perturbations on unit-range values.
        for (name, value) in [
            ("mutation_strength", self.mutation_strength),
            ("initial_weight_jitter", self.initial_weight_jitter),
            ("perception_noise", self.perception_noise),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(global(name, "must be in [0, 1]"));
            }
        }
        if !self.speciation_threshold.is_finite() || self.speciation_threshold < 0.0 {
            return Err(global("speciation_threshold", "must be a finite, non-negative number"));
        }
        Ok(())
    }
}

fn global(name: &str, reason: &str) -> AgentError {
    AgentError::InvalidParameter {
        name: name.to_owned(),
        reason: reason.to_owned(),
    }
}
