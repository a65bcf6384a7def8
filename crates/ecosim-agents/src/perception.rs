//! What an agent senses at the start of its step.
//!
//! Perception is deliberately approximate. Proximity of predators (for
//! herbivores) or prey (for predators) is a coarse count over the 3x3
//! neighbourhood plus uniform noise, never an exact distance.
//!
//! | Concept   | Herbivore                  | Predator                   |
//! |-----------|----------------------------|----------------------------|
//! | `Bias`    | 1.0                        | 1.0                        |
//! | `Satiety` | energy / max energy        | energy / max energy        |
//! | `Threat`  | noisy predator proximity   | --                         |
//! | `Prey`    | --                         | noisy herbivore proximity  |
//! | `Food`    | grass level at the cell    | --                         |
//! | `Meat`    | --                         | meat level at the cell     |

use std::collections::BTreeMap;

use ecosim_types::{AgentKind, Concept, Position, ResourceKind};
use ecosim_world::ResourceField;
use rand::Rng;

use crate::agent::Agent;
use crate::population::Population;

/// Sensory values keyed by concept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perception {
    values: BTreeMap<Concept, f64>,
}

impl Perception {
    /// This perception with one value set.
    #[must_use]
    pub fn with(mut self, concept: Concept, value: f64) -> Self {
        self.values.insert(concept, value);
        self
    }

    /// The perceived value of a concept, if sensed.
    pub fn get(&self, concept: Concept) -> Option<f64> {
        self.values.get(&concept).copied()
    }

    /// All sensed values in concept order.
    pub fn iter(&self) -> impl Iterator<Item = (Concept, f64)> + '_ {
        self.values.iter().map(|(&c, &v)| (c, v))
    }
}

/// Coarse proximity of agents of `target` kind around `center`.
///
/// Agents on the same cell count double, agents on the surrounding ring
/// once, and the total saturates at 4.
pub fn proximity(population: &Population, center: Position, target: AgentKind) -> f64 {
    let grid = population.grid();
    let here = population.count_kind_at(center, target);
    let ring: usize = grid
        .neighbors(center)
        .into_iter()
        .map(|pos| population.count_kind_at(pos, target))
        .sum();
    let score = here.saturating_mul(2).saturating_add(ring).min(4);
    // `score` is at most 4.
    f64::from(u8::try_from(score).unwrap_or(4)) / 4.0
}

/// Build the perception of `agent` this step.
pub fn perceive(
    agent: &Agent,
    max_energy: u32,
    population: &Population,
    resources: &ResourceField,
    noise: f64,
    rng: &mut impl Rng,
) -> Perception {
    let satiety = f64::from(agent.energy) / f64::from(max_energy.max(1));
    let mut perception = Perception::default()
        .with(Concept::Bias, 1.0)
        .with(Concept::Satiety, satiety.clamp(0.0, 1.0));

    let pos = agent.position();
    let (signal, target) = match agent.kind {
        AgentKind::Herbivore => (Concept::Threat, AgentKind::Predator),
        AgentKind::Predator => (Concept::Prey, AgentKind::Herbivore),
    };
    let jitter = if noise > 0.0 {
        rng.random_range(-noise..=noise)
    } else {
        0.0
    };
    let sensed = (proximity(population, pos, target) + jitter).clamp(0.0, 1.0);
    perception = perception.with(signal, sensed);

    let (resource_concept, resource) = match agent.kind.diet() {
        ResourceKind::Food => (Concept::Food, ResourceKind::Food),
        ResourceKind::Meat => (Concept::Meat, ResourceKind::Meat),
    };
    perception.with(resource_concept, resources.level(resource, pos))
}
