//! Execution handlers for individual actions.
//!
//! - Move / Evade: step to a uniformly random cell of the 8-neighbourhood
//! - Eat: consume one unit of the kind's diet at the current cell
//! - Hunt: kill one co-located prey and gain the hunt bonus

use ecosim_types::{AgentId, DeathCause};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::agent::Agent;
use crate::death;
use crate::lifecycle::StepContext;

use super::ActionOutcome;

/// Relocate to a random neighbouring cell, wrapping at the edges.
///
/// A no-op when the grid offers no neighbour (a 1x1 grid).
pub fn move_random(ctx: &mut StepContext<'_>, id: AgentId, rng: &mut impl Rng) -> ActionOutcome {
    let Some(from) = ctx.population.get(id).map(Agent::position) else {
        return ActionOutcome::Nothing;
    };
    let neighbors = ctx.population.grid().neighbors(from);
    let Some(&to) = neighbors.choose(rng) else {
        return ActionOutcome::Nothing;
    };
    ctx.population.relocate(id, to);
    ActionOutcome::Moved { from, to }
}

/// Eat one unit of the agent's diet at its cell, capped at max energy.
pub fn eat(ctx: &mut StepContext<'_>, id: AgentId) -> ActionOutcome {
    let config = ctx.config;
    let Some(agent) = ctx.population.get_mut(id) else {
        return ActionOutcome::Nothing;
    };
    let energy = ctx.resources.consume(agent.kind.diet(), agent.position());
    if energy == 0 {
        return ActionOutcome::Nothing;
    }
    let gained = agent.gain_energy(energy, config.kind(agent.kind).max_energy);
    ActionOutcome::Ate { gained }
}

/// Kill one randomly chosen co-located prey and gain the hunt bonus.
///
/// A no-op when the agent's kind hunts nothing or no prey shares its cell.
pub fn hunt(ctx: &mut StepContext<'_>, id: AgentId, rng: &mut impl Rng) -> ActionOutcome {
    let config = ctx.config;
    let Some(hunter) = ctx.population.get(id) else {
        return ActionOutcome::Nothing;
    };
    let Some(prey_kind) = hunter.kind.prey() else {
        return ActionOutcome::Nothing;
    };
    let max_energy = config.kind(hunter.kind).max_energy;
    let prey: Vec<AgentId> = ctx
        .population
        .occupants(hunter.position())
        .iter()
        .copied()
        .filter(|&other| other != id)
        .filter(|&other| ctx.population.get(other).is_some_and(|a| a.kind == prey_kind))
        .collect();
    let Some(&target) = prey.choose(rng) else {
        return ActionOutcome::Nothing;
    };

    let Some(death) = death::kill(ctx.population, ctx.resources, config, target, DeathCause::Predation)
    else {
        return ActionOutcome::Nothing;
    };
    if let Some(hunter) = ctx.population.get_mut(id) {
        let gained = hunter.gain_energy(config.hunt_bonus, max_energy);
        debug!(hunter_id = %id, prey_id = %target, gained, "hunt succeeded");
    }
    ActionOutcome::Hunted(death)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecosim_types::{Action, AgentKind, Position};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::testing::{Fixture, forced};

    #[test]
    fn move_stays_within_neighbourhood() {
        let mut fx = Fixture::new(5, 5);
        let start = Position::new(0, 0);
        let id = fx.spawn(AgentKind::Herbivore, start, 10, forced(AgentKind::Herbivore, Action::Move));
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let before = fx.population.get(id).unwrap().position();
            let outcome = move_random(&mut fx.ctx(), id, &mut rng);
            let after = fx.population.get(id).unwrap().position();
            assert_eq!(outcome, ActionOutcome::Moved { from: before, to: after });
            assert_ne!(before, after);
            assert!(fx.population.grid().within_reach(before, after));
            assert_eq!(fx.population.occupants(after), &[id]);
        }
    }

    #[test]
    fn move_on_single_cell_grid_is_noop() {
        let mut fx = Fixture::new(1, 1);
        let id = fx.spawn(AgentKind::Herbivore, Position::new(0, 0), 10, forced(AgentKind::Herbivore, Action::Move));
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(move_random(&mut fx.ctx(), id, &mut rng), ActionOutcome::Nothing);
    }

    #[test]
    fn eat_empty_cell_is_noop() {
        let mut fx = Fixture::new(2, 2);
        let id = fx.spawn(AgentKind::Herbivore, Position::new(0, 0), 10, forced(AgentKind::Herbivore, Action::Eat));
        assert_eq!(eat(&mut fx.ctx(), id), ActionOutcome::Nothing);
        assert_eq!(fx.population.get(id).unwrap().energy, 10);
    }

    #[test]
    fn predators_eat_meat_not_grass() {
        let mut fx = Fixture::new(2, 2);
        let pos = Position::new(1, 1);
        fx.resources.set_food(pos, 5);
        let id = fx.spawn(AgentKind::Predator, pos, 10, forced(AgentKind::Predator, Action::Eat));
        assert_eq!(eat(&mut fx.ctx(), id), ActionOutcome::Nothing);

        fx.resources.set_meat(pos, 1);
        assert_eq!(eat(&mut fx.ctx(), id), ActionOutcome::Ate { gained: 5 });
        assert_eq!(fx.resources.meat_at(pos), 0);
        assert_eq!(fx.resources.food_at(pos), 5);
    }

    #[test]
    fn eat_caps_at_max_energy() {
        let mut fx = Fixture::new(2, 2);
        let pos = Position::new(0, 1);
        fx.resources.set_food(pos, 5);
        let max = fx.config.herbivore.max_energy;
        let id = fx.spawn(AgentKind::Herbivore, pos, max - 1, forced(AgentKind::Herbivore, Action::Eat));
        assert_eq!(eat(&mut fx.ctx(), id), ActionOutcome::Ate { gained: 1 });
        assert_eq!(fx.population.get(id).unwrap().energy, max);
    }

    #[test]
    fn hunt_kills_co_located_prey() {
        let mut fx = Fixture::new(3, 3);
        let pos = Position::new(2, 0);
        let hunter = fx.spawn(AgentKind::Predator, pos, 20, forced(AgentKind::Predator, Action::Hunt));
        let prey = fx.spawn(AgentKind::Herbivore, pos, 20, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);

        let outcome = hunt(&mut fx.ctx(), hunter, &mut rng);
        assert!(matches!(
            outcome,
            ActionOutcome::Hunted(death) if death.agent == prey && death.cause == DeathCause::Predation
        ));
        assert!(!fx.population.contains(prey));
        assert_eq!(fx.population.get(hunter).unwrap().energy, 20 + fx.config.hunt_bonus);
        assert_eq!(fx.resources.meat_at(pos), 0);
    }

    #[test]
    fn hunt_without_prey_is_noop() {
        let mut fx = Fixture::new(3, 3);
        let hunter = fx.spawn(AgentKind::Predator, Position::new(0, 0), 20, forced(AgentKind::Predator, Action::Hunt));
        fx.spawn(AgentKind::Predator, Position::new(0, 0), 20, forced(AgentKind::Predator, Action::Hunt));
        fx.spawn(AgentKind::Herbivore, Position::new(1, 0), 20, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);

        assert_eq!(hunt(&mut fx.ctx(), hunter, &mut rng), ActionOutcome::Nothing);
        assert_eq!(fx.population.len(), 3);
    }

    #[test]
    fn herbivores_cannot_hunt() {
        let mut fx = Fixture::new(3, 3);
        let pos = Position::new(0, 0);
        let herbivore = fx.spawn(AgentKind::Herbivore, pos, 20, forced(AgentKind::Herbivore, Action::Eat));
        fx.spawn(AgentKind::Herbivore, pos, 20, forced(AgentKind::Herbivore, Action::Eat));
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(hunt(&mut fx.ctx(), herbivore, &mut rng), ActionOutcome::Nothing);
    }
}
