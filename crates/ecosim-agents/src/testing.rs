//! Shared fixtures for unit tests.

use ecosim_types::{Action, AgentId, AgentKind, Concept, Position};
use ecosim_world::{Grid, ResourceConfig, ResourceField};

use crate::agent::Agent;
use crate::config::AgentsConfig;
use crate::decision::DecisionEngine;
use crate::genome::Genome;
use crate::lifecycle::StepContext;
use crate::population::Population;
use crate::species::SpeciesAllocator;

/// An engine that always selects `action` once the bias concept is perceived.
pub(crate) fn forced(kind: AgentKind, action: Action) -> DecisionEngine {
    let mut genome = Genome::default();
    for &candidate in kind.actions() {
        let w = if candidate == action { 1000.0 } else { -1000.0 };
        genome = genome.with_edge(Concept::Bias, candidate.concept(), w);
    }
    DecisionEngine::neutral(kind, genome)
}

/// A small world with no resource growth and no reproduction age gate.
pub(crate) struct Fixture {
    pub(crate) population: Population,
    pub(crate) resources: ResourceField,
    pub(crate) species: SpeciesAllocator,
    pub(crate) config: AgentsConfig,
}

impl Fixture {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let grid = Grid::new(width, height).unwrap();
        let resources = ResourceField::new(
            grid,
            ResourceConfig {
                grass_growth_probability: 0.0,
                grass_spread_probability: 0.0,
                ..ResourceConfig::default()
            },
        )
        .unwrap();
        let mut config = AgentsConfig {
            perception_noise: 0.0,
            ..AgentsConfig::default()
        };
        config.herbivore.min_reproduction_age = 0;
        config.predator.min_reproduction_age = 0;
        Self {
            population: Population::new(grid),
            resources,
            species: SpeciesAllocator::new(),
            config,
        }
    }

    pub(crate) fn ctx(&mut self) -> StepContext<'_> {
        StepContext {
            population: &mut self.population,
            resources: &mut self.resources,
            species: &mut self.species,
            config: &self.config,
        }
    }

    pub(crate) fn spawn(&mut self, kind: AgentKind, pos: Position, energy: u32, engine: DecisionEngine) -> AgentId {
        let id = self.population.mint_id();
        let species = self.species.mint();
        let agent = Agent::new(id, kind, pos, energy, 0, species, engine);
        self.population
            .register(agent)
            .unwrap()
    }
}
