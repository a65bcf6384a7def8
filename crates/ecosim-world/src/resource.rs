//! Renewable per-cell resources: grass (`food`) and carcass `meat`.
//!
//! A [`ResourceField`] stores one [`Cell`] per grid position in row-major
//! order. Quantities are unsigned and every mutation clamps into
//! `0..=max`, so the bounds hold by construction rather than by checking.
//!
//! One [`ResourceField::growth_step`] runs at the start of every tick:
//!
//! 1. Each cell independently gains `grass_growth_amount` with probability
//!    `grass_growth_probability`.
//! 2. Each cell that was empty *before* the step and borders a cell that had
//!    grass *before* the step gains `grass_growth_amount` with probability
//!    `grass_spread_probability`. Spread reads the pre-step state only, so
//!    cell order does not matter.
//! 3. Meat on every cell decays by `meat_decay_amount`, stopping at zero.

use ecosim_types::{CellSnapshot, Position, ResourceKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::WorldError;
use crate::grid::Grid;

/// Fixed-at-init parameters of the resource field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Grass cap per cell.
    pub max_grass: u32,
    /// Meat cap per cell.
    pub max_meat: u32,
    /// Grass added to a cell when it grows or receives spread.
    pub grass_growth_amount: u32,
    /// Chance that any given cell grows this tick.
    pub grass_growth_probability: f64,
    /// Chance that an empty cell next to grass is seeded this tick.
    pub grass_spread_probability: f64,
    /// Meat removed from every cell per tick.
    pub meat_decay_amount: u32,
    /// Energy gained per unit of grass eaten.
    pub food_yield: u32,
    /// Energy gained per unit of meat eaten.
    pub meat_yield: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_grass: 20,
            max_meat: 20,
            grass_growth_amount: 1,
            grass_growth_probability: 0.5,
            grass_spread_probability: 0.05,
            meat_decay_amount: 1,
            food_yield: 3,
            meat_yield: 5,
        }
    }
}

impl ResourceConfig {
    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.max_grass == 0 {
            return Err(invalid("max_grass", "must be at least 1"));
        }
        if self.max_meat == 0 {
            return Err(invalid("max_meat", "must be at least 1"));
        }
        check_probability("grass_growth_probability", self.grass_growth_probability)?;
        check_probability("grass_spread_probability", self.grass_spread_probability)?;

        if self.grass_growth_amount == 0 || self.grass_growth_probability <= 0.0 {
            warn!(
                amount = self.grass_growth_amount,
                probability = self.grass_growth_probability,
                "grass will never grow back"
            );
        }
        Ok(())
    }

    /// Energy yield for one unit of the given resource.
    pub const fn yield_of(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Food => self.food_yield,
            ResourceKind::Meat => self.meat_yield,
        }
    }
}

fn invalid(name: &'static str, reason: &str) -> WorldError {
    WorldError::InvalidParameter {
        name,
        reason: reason.to_owned(),
    }
}

fn check_probability(name: &'static str, p: f64) -> Result<(), WorldError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(WorldError::InvalidParameter {
            name,
            reason: format!("{p} is not a probability in [0, 1]"),
        })
    }
}

/// Resources held by one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Grass, `0..=max_grass`.
    pub food: u32,
    /// Meat, `0..=max_meat`.
    pub meat: u32,
}

/// What one [`ResourceField::growth_step`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthReport {
    /// Cells that grew in place.
    pub cells_grown: u32,
    /// Empty cells seeded from a grassy neighbour.
    pub cells_spread: u32,
    /// Total meat removed by decay.
    pub meat_decayed: u64,
}

/// Grid-aligned grass and meat quantities.
#[derive(Debug, Clone)]
pub struct ResourceField {
    grid: Grid,
    config: ResourceConfig,
    cells: Vec<Cell>,
}

impl ResourceField {
    /// A field with every cell empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidParameter`] if `config` fails validation.
    pub fn new(grid: Grid, config: ResourceConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            grid,
            config,
            cells: vec![Cell::default(); grid.cell_count()],
        })
    }

    /// A field whose cells start with a uniformly random amount of grass in
    /// `0..=max_grass` and no meat.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidParameter`] if `config` fails validation.
    pub fn seeded(grid: Grid, config: ResourceConfig, rng: &mut impl Rng) -> Result<Self, WorldError> {
        let mut field = Self::new(grid, config)?;
        let max = field.config.max_grass;
        for cell in &mut field.cells {
            cell.food = rng.random_range(0..=max);
        }
        Ok(field)
    }

    /// The grid this field is laid over.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// The parameters this field was built with.
    pub const fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Advance grass growth, grass spread, and meat decay by one tick.
    pub fn growth_step(&mut self, rng: &mut impl Rng) -> GrowthReport {
        let mut report = GrowthReport::default();
        let had_grass: Vec<bool> = self.cells.iter().map(|c| c.food > 0).collect();
        let amount = self.config.grass_growth_amount;
        let max_grass = self.config.max_grass;

        for cell in &mut self.cells {
            if rng.random::<f64>() < self.config.grass_growth_probability {
                cell.food = cell.food.saturating_add(amount).min(max_grass);
                report.cells_grown = report.cells_grown.saturating_add(1);
            }
        }

        if self.config.grass_spread_probability > 0.0 {
            for (idx, pos) in self.grid.positions().enumerate() {
                if had_grass.get(idx).copied().unwrap_or(true) {
                    continue;
                }
                let seeded_by_neighbour = self
                    .grid
                    .neighbors(pos)
                    .into_iter()
                    .any(|n| had_grass.get(self.grid.index(n)).copied().unwrap_or(false));
                if !seeded_by_neighbour {
                    continue;
                }
                if rng.random::<f64>() < self.config.grass_spread_probability
                    && let Some(cell) = self.cells.get_mut(idx)
                {
                    cell.food = cell.food.saturating_add(amount).min(max_grass);
                    report.cells_spread = report.cells_spread.saturating_add(1);
                }
            }
        }

        let decay = self.config.meat_decay_amount;
        for cell in &mut self.cells {
            let after = cell.meat.saturating_sub(decay);
            report.meat_decayed = report
                .meat_decayed
                .saturating_add(u64::from(cell.meat.saturating_sub(after)));
            cell.meat = after;
        }

        report
    }

    /// Eat one unit of grass at `pos`. Returns the energy yield, or 0 if the
    /// cell has no grass.
    pub fn consume_food(&mut self, pos: Position) -> u32 {
        let yield_ = self.config.food_yield;
        match self.cell_mut(pos) {
            Some(cell) if cell.food > 0 => {
                cell.food = cell.food.saturating_sub(1);
                yield_
            }
            _ => 0,
        }
    }

    /// Eat one unit of meat at `pos`. Returns the energy yield, or 0 if the
    /// cell has no meat.
    pub fn consume_meat(&mut self, pos: Position) -> u32 {
        let yield_ = self.config.meat_yield;
        match self.cell_mut(pos) {
            Some(cell) if cell.meat > 0 => {
                cell.meat = cell.meat.saturating_sub(1);
                yield_
            }
            _ => 0,
        }
    }

    /// Eat one unit of the given resource at `pos`.
    pub fn consume(&mut self, kind: ResourceKind, pos: Position) -> u32 {
        match kind {
            ResourceKind::Food => self.consume_food(pos),
            ResourceKind::Meat => self.consume_meat(pos),
        }
    }

    /// Add meat to `pos`, capped at `max_meat`. Returns the amount added.
    pub fn deposit_meat(&mut self, pos: Position, amount: u32) -> u32 {
        let max = self.config.max_meat;
        self.cell_mut(pos).map_or(0, |cell| {
            let before = cell.meat;
            cell.meat = cell.meat.saturating_add(amount).min(max);
            cell.meat.saturating_sub(before)
        })
    }

    /// Overwrite the grass at `pos`, clamped to the cap.
    pub fn set_food(&mut self, pos: Position, amount: u32) {
        let max = self.config.max_grass;
        if let Some(cell) = self.cell_mut(pos) {
            cell.food = amount.min(max);
        }
    }

    /// Overwrite the meat at `pos`, clamped to the cap.
    pub fn set_meat(&mut self, pos: Position, amount: u32) {
        let max = self.config.max_meat;
        if let Some(cell) = self.cell_mut(pos) {
            cell.meat = amount.min(max);
        }
    }

    /// The cell at `pos` (wrapped).
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells
            .get(self.grid.index(pos))
            .copied()
            .unwrap_or_default()
    }

    /// Grass at `pos`.
    pub fn food_at(&self, pos: Position) -> u32 {
        self.cell(pos).food
    }

    /// Meat at `pos`.
    pub fn meat_at(&self, pos: Position) -> u32 {
        self.cell(pos).meat
    }

    /// Amount of the given resource at `pos`, as a fraction of its cap.
    pub fn level(&self, kind: ResourceKind, pos: Position) -> f64 {
        let cell = self.cell(pos);
        let (have, max) = match kind {
            ResourceKind::Food => (cell.food, self.config.max_grass),
            ResourceKind::Meat => (cell.meat, self.config.max_meat),
        };
        (f64::from(have) / f64::from(max.max(1))).clamp(0.0, 1.0)
    }

    /// Sum of grass over all cells.
    pub fn total_food(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.food)).sum()
    }

    /// Sum of meat over all cells.
    pub fn total_meat(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.meat)).sum()
    }

    /// Read-only copy of every cell, row-major.
    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.grid
            .positions()
            .zip(&self.cells)
            .map(|(position, cell)| CellSnapshot {
                position,
                food: cell.food,
                meat: cell.meat,
            })
            .collect()
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let idx = self.grid.index(pos);
        self.cells.get_mut(idx)
    }
}
