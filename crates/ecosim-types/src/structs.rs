//! Core structs shared across crates.
//!
//! [`AgentSnapshot`] and [`CellSnapshot`] are the read-only views handed to
//! whatever draws or records the simulation. They carry no references back
//! into simulation state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::AgentKind;
use crate::ids::{AgentId, SpeciesId};

/// A cell coordinate on the toroidal grid.
///
/// Always in range for the grid that produced it; wrapping is done by the
/// grid, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column, `0..width`.
    pub x: u32,
    /// Row, `0..height`.
    pub y: u32,
}

impl Position {
    /// Construct a position from raw coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Read-only view of one live agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentSnapshot {
    /// The agent's identifier.
    pub id: AgentId,
    /// Herbivore or predator.
    pub kind: AgentKind,
    /// Current cell.
    pub position: Position,
    /// Current energy, `0..=max_energy(kind)`.
    pub energy: u32,
    /// Steps survived.
    pub age: u32,
    /// Lineage identifier.
    pub species: SpeciesId,
}

/// Read-only view of one cell's resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CellSnapshot {
    /// The cell's coordinate.
    pub position: Position,
    /// Grass amount, `0..=max_grass`.
    pub food: u32,
    /// Meat amount, `0..=max_meat`.
    pub meat: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_snapshot_json_shape() {
        let snap = AgentSnapshot {
            id: AgentId::new(1),
            kind: AgentKind::Predator,
            position: Position::new(2, 3),
            energy: 10,
            age: 4,
            species: SpeciesId::new(5),
        };
        let value = serde_json::to_value(&snap).unwrap_or_default();
        assert_eq!(value["kind"], "Predator");
        assert_eq!(value["position"]["y"], 3);
        assert_eq!(value["species"], 5);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(4, 9).to_string(), "(4, 9)");
    }
}
