//! A single animal: identity, body state, and its decision engine.
//!
//! An [`Agent`] owns its state exclusively. The [`Population`] refers to it
//! by [`AgentId`] and is the only place that may change its position, so the
//! occupancy index can never drift from the agent's own record.
//!
//! [`Population`]: crate::population::Population

use ecosim_types::{AgentId, AgentKind, AgentSnapshot, Position, SpeciesId};

use crate::decision::DecisionEngine;

/// One live herbivore or predator.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Stable identifier, never reused.
    pub id: AgentId,
    /// Herbivore or predator. Never changes.
    pub kind: AgentKind,
    pub(crate) position: Position,
    /// Current energy, `0..=max_energy`.
    pub energy: u32,
    /// Steps survived.
    pub age: u32,
    /// Lineage this agent belongs to.
    pub species: SpeciesId,
    /// The agent's fuzzy cognitive map.
    pub engine: DecisionEngine,
}

impl Agent {
    /// Build an agent. It does not exist in the world until registered with
    /// a [`Population`](crate::population::Population).
    pub const fn new(
        id: AgentId,
        kind: AgentKind,
        position: Position,
        energy: u32,
        age: u32,
        species: SpeciesId,
        engine: DecisionEngine,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            energy,
            age,
            species,
            engine,
        }
    }

    /// Current cell.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Add energy, capped at `max_energy`. Returns the amount actually gained.
    pub fn gain_energy(&mut self, amount: u32, max_energy: u32) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(amount).min(max_energy);
        self.energy.saturating_sub(before)
    }

    /// Remove energy, stopping at zero.
    pub const fn spend_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    /// Read-only view for drivers and visualization.
    pub const fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            energy: self.energy,
            age: self.age,
            species: self.species,
        }
    }
}
