//! Shared type definitions for the ecosystem simulation.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the workspace. Snapshot types flow downstream to `TypeScript` via `ts-rs`
//! for whatever front-end renders the simulation.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential identifier newtypes for agents and species
//! - [`enums`] -- Agent kinds, actions, concepts, resources, death causes
//! - [`structs`] -- Grid positions and read-only agent/cell snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Action, AgentKind, Concept, ConceptRole, DeathCause, ResourceKind};
pub use ids::{AgentId, SpeciesId};
pub use structs::{AgentSnapshot, CellSnapshot, Position};

#[cfg(test)]
mod tests {
    //! Binding generation for the visualization front-end.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files land in `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::SpeciesId::export_all();

        // Enums
        let _ = crate::enums::AgentKind::export_all();
        let _ = crate::enums::Action::export_all();
        let _ = crate::enums::ConceptRole::export_all();
        let _ = crate::enums::Concept::export_all();
        let _ = crate::enums::ResourceKind::export_all();
        let _ = crate::enums::DeathCause::export_all();

        // Structs
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::AgentSnapshot::export_all();
        let _ = crate::structs::CellSnapshot::export_all();
    }
}
