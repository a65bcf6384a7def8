//! The set of live agents and where they stand.
//!
//! Agents are owned by a `BTreeMap` keyed by [`AgentId`], so iteration order
//! is deterministic and lookups survive removals. The [`Occupancy`] index is
//! kept in lockstep: every registered agent occupies exactly one cell.

use std::collections::{BTreeMap, BTreeSet};

use ecosim_types::{AgentId, AgentKind, AgentSnapshot, Position, SpeciesId};
use ecosim_world::{Grid, Occupancy};

use crate::agent::Agent;
use crate::error::AgentError;

/// Owning container for every live agent.
#[derive(Debug, Clone)]
pub struct Population {
    agents: BTreeMap<AgentId, Agent>,
    occupancy: Occupancy,
    next_id: AgentId,
}

impl Population {
    /// An empty population on the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            agents: BTreeMap::new(),
            occupancy: Occupancy::new(grid),
            next_id: AgentId::new(1),
        }
    }

    /// The grid agents live on.
    pub const fn grid(&self) -> Grid {
        self.occupancy.grid()
    }

    /// Allocate a fresh agent ID. IDs are never reused.
    pub const fn mint_id(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id = id.successor();
        id
    }

    /// Add an agent to the population and place it on its cell.
    ///
    /// The agent's position is wrapped onto the grid first.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DuplicateAgent`] if the ID is already live.
    pub fn register(&mut self, mut agent: Agent) -> Result<AgentId, AgentError> {
        let id = agent.id;
        if self.agents.contains_key(&id) {
            return Err(AgentError::DuplicateAgent(id));
        }
        agent.position = self.grid().normalize(agent.position);
        self.occupancy.place(id, agent.position);
        if id >= self.next_id {
            self.next_id = id.successor();
        }
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Remove an agent from the population and its cell.
    pub fn deregister(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.agents.remove(&id)?;
        self.occupancy.remove(id, agent.position);
        Some(agent)
    }

    /// Move an agent to `to` (wrapped). No-op for unknown IDs.
    pub fn relocate(&mut self, id: AgentId, to: Position) {
        let to = self.grid().normalize(to);
        if let Some(agent) = self.agents.get_mut(&id) {
            self.occupancy.relocate(id, agent.position, to);
            agent.position = to;
        }
    }

    /// Look up a live agent.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Look up a live agent mutably.
    ///
    /// Position is not writable from here; use [`Population::relocate`].
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Whether the agent is alive.
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is alive.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Live agent IDs in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Live agents in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Agents on the cell at `pos`, in arrival order.
    pub fn occupants(&self, pos: Position) -> &[AgentId] {
        self.occupancy.occupants(pos)
    }

    /// Number of agents of `kind` on the cell at `pos`.
    pub fn count_kind_at(&self, pos: Position, kind: AgentKind) -> usize {
        self.occupants(pos)
            .iter()
            .filter(|id| self.agents.get(id).is_some_and(|a| a.kind == kind))
            .count()
    }

    /// Number of live agents of `kind`.
    pub fn count_kind(&self, kind: AgentKind) -> usize {
        self.agents.values().filter(|a| a.kind == kind).count()
    }

    /// Distinct species with at least one live member.
    pub fn species_alive(&self) -> BTreeSet<SpeciesId> {
        self.agents.values().map(|a| a.species).collect()
    }

    /// Read-only views of every live agent, in ID order.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.agents.values().map(Agent::snapshot).collect()
    }
}
