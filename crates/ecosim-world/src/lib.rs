//! Spatial substrate for the ecosystem simulation.
//!
//! This crate models the physical world the agents live in: a toroidal grid,
//! an index of which agents stand on which cell, and the renewable grass and
//! meat each cell holds.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world construction.
//! - [`grid`] -- [`Grid`] geometry: wrapping, Moore neighbourhoods, and
//!   row-major cell indexing.
//! - [`occupancy`] -- [`Occupancy`], a multi-occupant per-cell agent index.
//! - [`resource`] -- [`ResourceField`] growth, decay, spread, and
//!   consumption, configured by [`ResourceConfig`].

pub mod error;
pub mod grid;
pub mod occupancy;
pub mod resource;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::Grid;
pub use occupancy::Occupancy;
pub use resource::{Cell, GrowthReport, ResourceConfig, ResourceField};
