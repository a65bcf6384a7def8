//! The ecosystem scheduler: owns the world and advances it one tick at a
//! time.
//!
//! Each call to [`Ecosystem::step`]:
//!
//! 1. Runs one resource growth step over every cell.
//! 2. Snapshots the live agent IDs and shuffles them.
//! 3. Gives each agent in that order its full turn.
//!
//! Births and deaths take effect immediately. A newborn is not in the
//! snapshot, so it first acts next tick; an agent killed earlier in the tick
//! is skipped when its turn comes. Extinction is not special-cased; a tick
//! over an empty population only updates resources.
//!
//! All randomness flows from one seeded [`StdRng`], so two ecosystems built
//! from the same configuration and seed evolve identically.

use std::collections::BTreeMap;

use ecosim_agents::{
    Agent, AgentError, AgentsConfig, DecisionEngine, Population, SpeciesAllocator, StepContext,
    step_agent,
};
use ecosim_types::{AgentId, AgentKind, AgentSnapshot, CellSnapshot, Position, SpeciesId};
use ecosim_world::{Grid, ResourceConfig, ResourceField, WorldError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::{ConfigError, SimulationConfig};
use crate::tick::TickSummary;

/// Errors that can occur while building or seeding an ecosystem.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Configuration was rejected.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Grid or resource construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Agent registration failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A spawned agent's energy is outside `[1, max_energy]`.
    #[error("cannot spawn {kind} with energy {energy}: must be in [1, {max_energy}]")]
    InvalidSpawnEnergy {
        /// Requested kind.
        kind: AgentKind,
        /// Requested energy.
        energy: u32,
        /// The kind's energy cap.
        max_energy: u32,
    },

    /// A spawned agent is already older than its kind's maximum age.
    #[error("cannot spawn {kind} at age {age}: must be at most {max_age}")]
    InvalidSpawnAge {
        /// Requested kind.
        kind: AgentKind,
        /// Requested age.
        age: u32,
        /// The kind's age limit.
        max_age: u32,
    },
}

/// The whole simulated ecosystem.
#[derive(Debug)]
pub struct Ecosystem {
    grid: Grid,
    resources: ResourceField,
    population: Population,
    species: SpeciesAllocator,
    agents_config: AgentsConfig,
    rng: StdRng,
    seed: u64,
    tick: u64,
}

impl Ecosystem {
    /// Build an ecosystem from a full configuration.
    ///
    /// Every cell starts with a random amount of grass. The initial
    /// herbivores, then predators, are placed on random cells, each with a
    /// freshly minted species ID, a jittered seed genome, and random
    /// activations.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Config`] if the configuration fails
    /// validation.
    pub fn initialize(config: &SimulationConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            info!(seed, "No seed configured, drew one at random");
            seed
        });

        let grid = Grid::new(config.world.width, config.world.height)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let resources = ResourceField::seeded(grid, config.resources.clone(), &mut rng)?;

        let mut ecosystem = Self {
            grid,
            resources,
            population: Population::new(grid),
            species: SpeciesAllocator::new(),
            agents_config: config.agents.clone(),
            rng,
            seed,
            tick: 0,
        };

        for (kind, count) in [
            (AgentKind::Herbivore, config.population.initial_herbivores),
            (AgentKind::Predator, config.population.initial_predators),
        ] {
            for _ in 0..count {
                ecosystem.seed_agent(kind)?;
            }
        }

        info!(
            width = grid.width(),
            height = grid.height(),
            seed,
            herbivores = config.population.initial_herbivores,
            predators = config.population.initial_predators,
            total_food = ecosystem.resources.total_food(),
            "Ecosystem initialized"
        );
        Ok(ecosystem)
    }

    /// Build an ecosystem with default resource and agent parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Config`] if the dimensions are zero.
    pub fn new(
        width: u32,
        height: u32,
        initial_predators: u32,
        initial_preys: u32,
        seed: Option<u64>,
    ) -> Result<Self, SchedulerError> {
        let mut config = SimulationConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.world.seed = seed;
        config.population.initial_predators = initial_predators;
        config.population.initial_herbivores = initial_preys;
        Self::initialize(&config)
    }

    fn seed_agent(&mut self, kind: AgentKind) -> Result<AgentId, SchedulerError> {
        let position = self.grid.random_position(&mut self.rng);
        let engine = DecisionEngine::random(kind, self.agents_config.initial_weight_jitter, &mut self.rng);
        let energy = self.agents_config.kind(kind).initial_energy;
        self.spawn(kind, position, energy, 0, engine)
    }

    /// Introduce a new agent with a fresh species ID.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidSpawnEnergy`] if `energy` is zero or
    /// above the kind's cap, or [`SchedulerError::InvalidSpawnAge`] if `age`
    /// is past the kind's maximum.
    pub fn spawn(
        &mut self,
        kind: AgentKind,
        position: Position,
        energy: u32,
        age: u32,
        engine: DecisionEngine,
    ) -> Result<AgentId, SchedulerError> {
        let kind_config = self.agents_config.kind(kind);
        let max_energy = kind_config.max_energy;
        if energy == 0 || energy > max_energy {
            return Err(SchedulerError::InvalidSpawnEnergy {
                kind,
                energy,
                max_energy,
            });
        }
        let max_age = kind_config.max_age;
        if age > max_age {
            return Err(SchedulerError::InvalidSpawnAge { kind, age, max_age });
        }
        let id = self.population.mint_id();
        let species = self.species.mint();
        let agent = Agent::new(id, kind, position, energy, age, species, engine);
        let id = self.population.register(agent)?;
        debug!(agent_id = %id, %kind, %species, %position, energy, "agent spawned");
        Ok(id)
    }

    /// Advance exactly one tick.
    pub fn step(&mut self) -> TickSummary {
        self.tick = self.tick.saturating_add(1);
        let growth = self.resources.growth_step(&mut self.rng);

        let mut order = self.population.ids();
        order.shuffle(&mut self.rng);

        let mut actions = BTreeMap::new();
        let mut births = Vec::new();
        let mut deaths = Vec::new();
        let mut ctx = StepContext {
            population: &mut self.population,
            resources: &mut self.resources,
            species: &mut self.species,
            config: &self.agents_config,
        };
        for id in order {
            let Some(outcome) = step_agent(&mut ctx, id, &mut self.rng) else {
                continue;
            };
            let count = actions.entry(outcome.action).or_insert(0_u32);
            *count = count.saturating_add(1);
            births.extend(outcome.birth);
            deaths.extend(outcome.deaths);
        }

        let summary = TickSummary {
            tick: self.tick,
            herbivores: self.population.count_kind(AgentKind::Herbivore),
            predators: self.population.count_kind(AgentKind::Predator),
            species_alive: self.population.species_alive().len(),
            actions,
            births,
            deaths,
            growth,
            total_food: self.resources.total_food(),
            total_meat: self.resources.total_meat(),
        };
        debug!(
            tick = summary.tick,
            herbivores = summary.herbivores,
            predators = summary.predators,
            births = summary.births.len(),
            deaths = summary.deaths.len(),
            "tick complete"
        );
        summary
    }

    /// Read-only views of every live agent, in ID order.
    pub fn population(&self) -> Vec<AgentSnapshot> {
        self.population.snapshot()
    }

    /// Read-only copy of every cell's resources, row-major.
    pub fn resource_snapshot(&self) -> Vec<CellSnapshot> {
        self.resources.snapshot()
    }

    /// The live agents.
    pub const fn agents(&self) -> &Population {
        &self.population
    }

    /// A live agent by ID.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.population.get(id)
    }

    /// The resource field.
    pub const fn resources(&self) -> &ResourceField {
        &self.resources
    }

    /// Mutable resource field, for drivers that stage scenarios.
    pub const fn resources_mut(&mut self) -> &mut ResourceField {
        &mut self.resources
    }

    /// Resource parameters in effect.
    pub const fn resource_config(&self) -> &ResourceConfig {
        self.resources.config()
    }

    /// Agent parameters in effect.
    pub const fn agents_config(&self) -> &AgentsConfig {
        &self.agents_config
    }

    /// The grid.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of ticks executed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The seed all randomness derives from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The most recently minted species ID.
    pub const fn last_species(&self) -> Option<SpeciesId> {
        self.species.last()
    }

    /// Whether no agent is alive.
    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }
}
