//! Per-tick bookkeeping.
//!
//! A [`TickSummary`] records what one call to
//! [`Ecosystem::step`](crate::scheduler::Ecosystem::step) did: the actions
//! taken, every birth and death, and the population and resource totals at
//! the end of the tick.

use std::collections::BTreeMap;

use ecosim_agents::{Birth, Death};
use ecosim_types::{Action, DeathCause};
use ecosim_world::GrowthReport;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed (first tick is 1).
    pub tick: u64,
    /// Living herbivores at end of tick.
    pub herbivores: usize,
    /// Living predators at end of tick.
    pub predators: usize,
    /// Distinct species with a living member at end of tick.
    pub species_alive: usize,
    /// How many agents chose each action.
    pub actions: BTreeMap<Action, u32>,
    /// Offspring born this tick.
    pub births: Vec<Birth>,
    /// Agents who died this tick.
    pub deaths: Vec<Death>,
    /// What the resource update changed.
    pub growth: GrowthReport,
    /// Grass on the grid at end of tick.
    pub total_food: u64,
    /// Meat on the grid at end of tick.
    pub total_meat: u64,
}

impl TickSummary {
    /// Living agents of both kinds.
    pub const fn agents_alive(&self) -> usize {
        self.herbivores.saturating_add(self.predators)
    }

    /// Deaths this tick grouped by cause.
    pub fn deaths_by_cause(&self) -> BTreeMap<DeathCause, u32> {
        let mut out = BTreeMap::new();
        for death in &self.deaths {
            let count = out.entry(death.cause).or_insert(0_u32);
            *count = count.saturating_add(1);
        }
        out
    }

    /// Births that founded a new species.
    pub fn new_species(&self) -> usize {
        self.births.iter().filter(|b| b.new_species).count()
    }
}

#[cfg(test)]
mod tests {
    use ecosim_types::{AgentId, AgentKind, Position, SpeciesId};

    use super::*;

    fn death(cause: DeathCause) -> Death {
        Death {
            agent: AgentId::new(1),
            kind: AgentKind::Herbivore,
            species: SpeciesId::new(1),
            cause,
            position: Position::new(0, 0),
            age: 3,
            carcass: 0,
        }
    }

    #[test]
    fn groups_deaths_by_cause() {
        let summary = TickSummary {
            tick: 1,
            herbivores: 2,
            predators: 1,
            species_alive: 2,
            actions: BTreeMap::new(),
            births: Vec::new(),
            deaths: vec![
                death(DeathCause::Starvation),
                death(DeathCause::Predation),
                death(DeathCause::Starvation),
            ],
            growth: GrowthReport::default(),
            total_food: 0,
            total_meat: 0,
        };
        let by_cause = summary.deaths_by_cause();
        assert_eq!(by_cause.get(&DeathCause::Starvation), Some(&2));
        assert_eq!(by_cause.get(&DeathCause::Predation), Some(&1));
        assert_eq!(by_cause.get(&DeathCause::OldAge), None);
        assert_eq!(summary.agents_alive(), 3);
        assert_eq!(summary.new_species(), 0);
    }
}
