//! Death conditions and consequences for agents.
//!
//! Agents die when:
//! - Energy reaches 0 ([`DeathCause::Starvation`])
//! - Age exceeds the kind's maximum ([`DeathCause::OldAge`])
//! - A predator hunts them ([`DeathCause::Predation`])
//!
//! Starved and aged bodies leave `carcass_meat` on their cell, capped at the
//! cell's meat maximum. Hunted prey leave nothing; the hunter ate them.

use ecosim_types::{AgentId, AgentKind, DeathCause, Position, SpeciesId};
use ecosim_world::ResourceField;
use tracing::debug;

use crate::agent::Agent;
use crate::config::{AgentsConfig, KindConfig};
use crate::population::Population;

/// Check whether an agent meets a natural death condition.
///
/// Returns `Some(cause)` if the agent must die, `None` if alive. Old age
/// takes precedence when both apply.
pub const fn check_death(agent: &Agent, config: &KindConfig) -> Option<DeathCause> {
    if agent.age > config.max_age {
        return Some(DeathCause::OldAge);
    }
    if agent.energy == 0 {
        return Some(DeathCause::Starvation);
    }
    None
}

/// Record of an agent that died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death {
    /// The agent who died.
    pub agent: AgentId,
    /// Its kind.
    pub kind: AgentKind,
    /// Its lineage.
    pub species: SpeciesId,
    /// Why it died.
    pub cause: DeathCause,
    /// The cell it died on.
    pub position: Position,
    /// Its age at death.
    pub age: u32,
    /// Meat left on the cell.
    pub carcass: u32,
}

/// Remove an agent from the world and apply the consequences of its death.
///
/// Returns `None` if the agent was not alive.
pub fn kill(
    population: &mut Population,
    resources: &mut ResourceField,
    config: &AgentsConfig,
    id: AgentId,
    cause: DeathCause,
) -> Option<Death> {
    let agent = population.deregister(id)?;
    let position = agent.position();
    let carcass = match cause {
        DeathCause::Predation => 0,
        DeathCause::Starvation | DeathCause::OldAge => resources.deposit_meat(position, config.carcass_meat),
    };

    debug!(
        agent_id = %id,
        kind = %agent.kind,
        species = %agent.species,
        %cause,
        %position,
        age = agent.age,
        carcass,
        "agent died"
    );

    Some(Death {
        agent: id,
        kind: agent.kind,
        species: agent.species,
        cause,
        position,
        age: agent.age,
        carcass,
    })
}
