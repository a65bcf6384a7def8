//! Mating, offspring creation, and speciation.
//!
//! An agent may reproduce when its energy is at least its kind's
//! reproduction threshold and it has reached the minimum reproduction age.
//! A mate must meet the same conditions, share the initiator's kind, and
//! stand on the same cell. One mate is picked uniformly at random.
//!
//! The offspring:
//! - gets `crossover(initiator, mate)` as its genome (mutated)
//! - starts with the per-concept mean of the parents' activations
//! - inherits the initiator's species, unless its genome is further than
//!   `speciation_threshold` from the initiator's, in which case it founds a
//!   new species
//! - is placed on the parents' cell with `offspring_energy` and age 0
//!
//! Each parent then pays half the reproduction threshold.

use ecosim_types::{AgentId, Position, SpeciesId};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::agent::Agent;
use crate::config::KindConfig;
use crate::decision::DecisionEngine;
use crate::genome::{crossover, distance};
use crate::lifecycle::StepContext;

/// Record of a successful mating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Birth {
    /// The newborn.
    pub child: AgentId,
    /// The agent that initiated mating.
    pub parent: AgentId,
    /// The chosen mate.
    pub mate: AgentId,
    /// The newborn's species.
    pub species: SpeciesId,
    /// Whether that species was minted for this newborn.
    pub new_species: bool,
    /// Genome distance between the newborn and the initiator.
    pub divergence: f64,
    /// Where the newborn was placed.
    pub position: Position,
}

/// Whether `agent` currently meets the energy and age conditions to mate.
pub const fn is_eligible(agent: &Agent, config: &KindConfig) -> bool {
    agent.energy >= config.reproduction_threshold && agent.age >= config.min_reproduction_age
}

/// Co-located agents that could mate with `id`, in arrival order.
pub fn candidate_mates(ctx: &StepContext<'_>, id: AgentId) -> Vec<AgentId> {
    let Some(agent) = ctx.population.get(id) else {
        return Vec::new();
    };
    let config = ctx.config.kind(agent.kind);
    ctx.population
        .occupants(agent.position())
        .iter()
        .copied()
        .filter(|&other| other != id)
        .filter(|&other| {
            ctx.population
                .get(other)
                .is_some_and(|m| m.kind == agent.kind && is_eligible(m, config))
        })
        .collect()
}

/// Try to mate agent `id` with a co-located partner.
///
/// Returns `None` (a no-op) if the agent is ineligible or has no mate.
pub fn reproduce(ctx: &mut StepContext<'_>, id: AgentId, rng: &mut impl Rng) -> Option<Birth> {
    let config = ctx.config;
    let parent = ctx.population.get(id)?;
    let kind = parent.kind;
    let kind_config = config.kind(kind);
    if !is_eligible(parent, kind_config) {
        return None;
    }

    let mate_id = *candidate_mates(ctx, id).choose(rng)?;
    let parent = ctx.population.get(id)?;
    let mate = ctx.population.get(mate_id)?;
    let position = parent.position();

    let genome = crossover(
        parent.engine.genome(),
        mate.engine.genome(),
        config.mutation_rate,
        config.mutation_strength,
        rng,
    );
    let activations = DecisionEngine::blend_activations(&parent.engine, &mate.engine);
    let divergence = distance(&genome, parent.engine.genome());
    let inherited = parent.species;

    let (species, new_species) = if divergence > config.speciation_threshold {
        (ctx.species.mint(), true)
    } else {
        (inherited, false)
    };

    let child = ctx.population.mint_id();
    let offspring = Agent::new(
        child,
        kind,
        position,
        kind_config.offspring_energy.min(kind_config.max_energy),
        0,
        species,
        DecisionEngine::new(genome, activations),
    );
    ctx.population.register(offspring).ok()?;

    let cost = kind_config.reproduction_cost();
    for payer in [id, mate_id] {
        if let Some(agent) = ctx.population.get_mut(payer) {
            agent.spend_energy(cost);
        }
    }

    if new_species {
        debug!(%species, parent_species = %inherited, divergence, "new species");
    }
    debug!(
        child_id = %child,
        parent_id = %id,
        mate_id = %mate_id,
        %kind,
        %species,
        %position,
        "offspring born"
    );

    Some(Birth {
        child,
        parent: id,
        mate: mate_id,
        species,
        new_species,
        divergence,
        position,
    })
}
