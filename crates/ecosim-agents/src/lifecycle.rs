//! One agent's turn: perceive, decide, act, age, and possibly die.
//!
//! # Order of operations
//!
//! 1. Perceive the cell and its neighbourhood
//! 2. Update the decision engine from the perception
//! 3. Select an action from the kind's action set
//! 4. Execute the action (may kill a prey or create an offspring)
//! 5. Pay the metabolic cost and age by one step
//! 6. Die if energy reached zero or age exceeds the maximum
//!
//! The caller owns the world and lends it through a [`StepContext`].

use ecosim_types::{Action, AgentId};
use ecosim_world::ResourceField;
use rand::Rng;
use tracing::trace;

use crate::actions::{self, ActionOutcome};
use crate::config::AgentsConfig;
use crate::death::{self, Death};
use crate::perception::perceive;
use crate::population::Population;
use crate::reproduction::Birth;
use crate::species::SpeciesAllocator;

/// Mutable access to everything an agent's turn can touch.
#[derive(Debug)]
pub struct StepContext<'a> {
    /// Live agents and the occupancy index.
    pub population: &'a mut Population,
    /// Grass and meat.
    pub resources: &'a mut ResourceField,
    /// Species counter for speciating offspring.
    pub species: &'a mut SpeciesAllocator,
    /// Agent parameters.
    pub config: &'a AgentsConfig,
}

/// What happened during one agent's turn.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// The action the engine selected.
    pub action: Action,
    /// The offspring produced, if the agent reproduced.
    pub birth: Option<Birth>,
    /// Agents that died this turn: a hunted prey and/or the agent itself.
    pub deaths: Vec<Death>,
}

/// Run one full turn for agent `id`.
///
/// Returns `None` if the agent is no longer alive (for example, it was
/// hunted earlier in the same tick), in which case nothing happens.
pub fn step_agent(ctx: &mut StepContext<'_>, id: AgentId, rng: &mut impl Rng) -> Option<StepOutcome> {
    let config = ctx.config;
    let agent = ctx.population.get(id)?;
    let kind_config = config.kind(agent.kind);
    let perception = perceive(
        agent,
        kind_config.max_energy,
        ctx.population,
        ctx.resources,
        config.perception_noise,
        rng,
    );

    let agent = ctx.population.get_mut(id)?;
    agent.engine.update(&perception);
    let action = agent.engine.select_action(agent.kind.actions(), rng);
    trace!(agent_id = %id, ?action, "action selected");

    let mut outcome = StepOutcome {
        action,
        birth: None,
        deaths: Vec::new(),
    };
    match actions::execute(ctx, id, action, rng) {
        ActionOutcome::Hunted(prey) => outcome.deaths.push(prey),
        ActionOutcome::Reproduced(birth) => outcome.birth = Some(birth),
        ActionOutcome::Moved { .. } | ActionOutcome::Ate { .. } | ActionOutcome::Nothing => {}
    }

    let cause = {
        let agent = ctx.population.get_mut(id)?;
        agent.spend_energy(kind_config.metabolic_cost);
        agent.age = agent.age.saturating_add(1);
        death::check_death(agent, kind_config)
    };
    if let Some(cause) = cause
        && let Some(death) = death::kill(ctx.population, ctx.resources, config, id, cause)
    {
        outcome.deaths.push(death);
    }

    Some(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecosim_types::{AgentKind, DeathCause, Position};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::testing::{Fixture, forced};

    #[test]
    fn dead_agents_do_not_step() {
        let mut fx = Fixture::new(3, 3);
        let id = fx.spawn(AgentKind::Herbivore, Position::new(0, 0), 10, forced(AgentKind::Herbivore, Action::Eat));
        fx.population.deregister(id);
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(step_agent(&mut fx.ctx(), id, &mut rng).is_none());
    }

    #[test]
    fn step_pays_metabolism_and_ages() {
        let mut fx = Fixture::new(3, 3);
        let id = fx.spawn(AgentKind::Herbivore, Position::new(1, 1), 10, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = step_agent(&mut fx.ctx(), id, &mut rng).unwrap();
        assert_eq!(outcome.action, Action::Eat);
        assert!(outcome.deaths.is_empty());
        let agent = fx.population.get(id).unwrap();
        assert_eq!(agent.energy, 9);
        assert_eq!(agent.age, 1);
    }

    #[test]
    fn eating_adds_yield_before_metabolism() {
        let mut fx = Fixture::new(3, 3);
        let pos = Position::new(2, 2);
        fx.resources.set_food(pos, 4);
        let id = fx.spawn(AgentKind::Herbivore, pos, 10, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);

        step_agent(&mut fx.ctx(), id, &mut rng).unwrap();
        assert_eq!(fx.population.get(id).unwrap().energy, 10 + 3 - 1);
        assert_eq!(fx.resources.food_at(pos), 3);
    }

    #[test]
    fn starving_agent_dies_and_leaves_carcass() {
        let mut fx = Fixture::new(3, 3);
        let pos = Position::new(0, 2);
        let id = fx.spawn(AgentKind::Herbivore, pos, 1, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = step_agent(&mut fx.ctx(), id, &mut rng).unwrap();
        assert_eq!(outcome.deaths.len(), 1);
        assert_eq!(outcome.deaths.first().map(|d| d.cause), Some(DeathCause::Starvation));
        assert!(!fx.population.contains(id));
        assert_eq!(fx.resources.meat_at(pos), fx.config.carcass_meat);
    }

    #[test]
    fn old_agent_dies_after_max_age() {
        let mut fx = Fixture::new(3, 3);
        let id = fx.spawn(AgentKind::Predator, Position::new(1, 1), 50, forced(AgentKind::Predator, Action::Eat));
        fx.population.get_mut(id).unwrap().age = fx.config.predator.max_age;
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = step_agent(&mut fx.ctx(), id, &mut rng).unwrap();
        assert_eq!(outcome.deaths.first().map(|d| d.cause), Some(DeathCause::OldAge));
        assert!(fx.population.is_empty());
    }
}
