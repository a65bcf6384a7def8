//! Which agents stand on which cell.
//!
//! Cells hold any number of occupants. Each cell keeps its occupants in
//! arrival order so that scans over a cell are deterministic for a given
//! history.

use ecosim_types::{AgentId, Position};

use crate::grid::Grid;

/// Per-cell occupant index over a [`Grid`].
#[derive(Debug, Clone)]
pub struct Occupancy {
    grid: Grid,
    cells: Vec<Vec<AgentId>>,
}

impl Occupancy {
    /// An empty index for the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![Vec::new(); grid.cell_count()],
        }
    }

    /// The grid this index covers.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Record `agent` as standing on `pos`.
    pub fn place(&mut self, agent: AgentId, pos: Position) {
        let idx = self.grid.index(pos);
        if let Some(cell) = self.cells.get_mut(idx)
            && !cell.contains(&agent)
        {
            cell.push(agent);
        }
    }

    /// Remove `agent` from `pos`. Returns whether it was there.
    pub fn remove(&mut self, agent: AgentId, pos: Position) -> bool {
        let idx = self.grid.index(pos);
        let Some(cell) = self.cells.get_mut(idx) else {
            return false;
        };
        let before = cell.len();
        cell.retain(|id| *id != agent);
        cell.len() != before
    }

    /// Move `agent` from one cell to another.
    pub fn relocate(&mut self, agent: AgentId, from: Position, to: Position) {
        if self.remove(agent, from) {
            self.place(agent, to);
        }
    }

    /// Agents on the cell at `pos`, in arrival order.
    pub fn occupants(&self, pos: Position) -> &[AgentId] {
        self.cells
            .get(self.grid.index(pos))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of agents on the cell at `pos`.
    pub fn count(&self, pos: Position) -> usize {
        self.occupants(pos).len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn occupancy() -> Occupancy {
        Occupancy::new(Grid::new(4, 4).unwrap())
    }

    #[test]
    fn place_is_idempotent() {
        let mut occ = occupancy();
        let pos = Position::new(1, 2);
        occ.place(AgentId::new(1), pos);
        occ.place(AgentId::new(1), pos);
        assert_eq!(occ.count(pos), 1);
    }

    #[test]
    fn multiple_occupants_keep_arrival_order() {
        let mut occ = occupancy();
        let pos = Position::new(3, 3);
        occ.place(AgentId::new(5), pos);
        occ.place(AgentId::new(2), pos);
        occ.place(AgentId::new(9), pos);
        assert_eq!(occ.occupants(pos), &[AgentId::new(5), AgentId::new(2), AgentId::new(9)]);
    }

    #[test]
    fn relocate_moves_between_cells() {
        let mut occ = occupancy();
        let a = Position::new(0, 0);
        let b = Position::new(3, 3);
        occ.place(AgentId::new(1), a);
        occ.relocate(AgentId::new(1), a, b);
        assert_eq!(occ.count(a), 0);
        assert_eq!(occ.occupants(b), &[AgentId::new(1)]);
        assert_eq!(occ.count(b), 1);
    }

    #[test]
    fn remove_missing_is_false() {
        let mut occ = occupancy();
        assert!(!occ.remove(AgentId::new(1), Position::new(0, 0)));
    }

    #[test]
    fn out_of_range_positions_wrap() {
        let mut occ = occupancy();
        occ.place(AgentId::new(1), Position::new(5, 4));
        assert_eq!(occ.occupants(Position::new(1, 0)), &[AgentId::new(1)]);
    }
}
