//! Toroidal grid geometry.
//!
//! The [`Grid`] only knows its dimensions. It wraps coordinates, enumerates
//! Moore (8-cell) neighbourhoods, and maps positions to flat cell indices
//! for the row-major storage used by [`ResourceField`] and [`Occupancy`].
//!
//! On grids narrower than three cells the wrapped neighbours coincide; the
//! neighbourhood lists are de-duplicated so a 1x1 grid has no neighbours.
//!
//! [`ResourceField`]: crate::resource::ResourceField
//! [`Occupancy`]: crate::occupancy::Occupancy

use ecosim_types::Position;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Offsets of the 8-neighbourhood in a fixed scan order.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Dimensions of a wrap-around grid.
///
/// Deserialization goes through [`Grid::new`], so a decoded grid is never
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: u32,
    height: u32,
}

/// Unchecked wire form of [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
}

impl TryFrom<RawGrid> for Grid {
    type Error = WorldError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl Grid {
    /// Create a grid of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero, or
    /// [`WorldError::GridTooLarge`] if the cell count does not fit `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let cells = u64::from(width).checked_mul(u64::from(height));
        if cells.and_then(|c| usize::try_from(c).ok()).is_none() {
            return Err(WorldError::GridTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        // Checked in the constructor.
        u64::from(self.width)
            .checked_mul(u64::from(self.height))
            .and_then(|c| usize::try_from(c).ok())
            .unwrap_or(0)
    }

    /// Wrap arbitrary signed coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        let wx = x.rem_euclid(i64::from(self.width));
        let wy = y.rem_euclid(i64::from(self.height));
        Position::new(
            u32::try_from(wx).unwrap_or(0),
            u32::try_from(wy).unwrap_or(0),
        )
    }

    /// Wrap a possibly out-of-range position onto the torus.
    pub fn normalize(&self, pos: Position) -> Position {
        self.wrap(i64::from(pos.x), i64::from(pos.y))
    }

    /// Whether the position is already inside the grid bounds.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Distinct cells of the 8-neighbourhood, excluding `pos` itself.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let center = self.normalize(pos);
        let mut out = Vec::with_capacity(MOORE_OFFSETS.len());
        for (dx, dy) in MOORE_OFFSETS {
            let next = self.wrap(
                i64::from(center.x).saturating_add(dx),
                i64::from(center.y).saturating_add(dy),
            );
            if next != center && !out.contains(&next) {
                out.push(next);
            }
        }
        out
    }

    /// Distinct cells of the 3x3 block centred on `pos`, centre first.
    pub fn neighborhood(&self, pos: Position) -> Vec<Position> {
        let center = self.normalize(pos);
        let mut out = Vec::with_capacity(MOORE_OFFSETS.len().saturating_add(1));
        out.push(center);
        out.extend(self.neighbors(center));
        out
    }

    /// Whether `to` lies in the 3x3 block around `from` (inclusive),
    /// measuring distance the short way round the torus.
    pub fn within_reach(&self, from: Position, to: Position) -> bool {
        let a = self.normalize(from);
        let b = self.normalize(to);
        axis_distance(a.x, b.x, self.width) <= 1 && axis_distance(a.y, b.y, self.height) <= 1
    }

    /// Row-major index of a position, wrapping it first.
    pub fn index(&self, pos: Position) -> usize {
        let p = self.normalize(pos);
        u64::from(p.y)
            .checked_mul(u64::from(self.width))
            .and_then(|row| row.checked_add(u64::from(p.x)))
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(0)
    }

    /// Inverse of [`Grid::index`].
    pub fn position_at(&self, index: usize) -> Option<Position> {
        let i = u64::try_from(index).ok()?;
        let width = u64::from(self.width);
        let y = u32::try_from(i.checked_div(width)?).ok()?;
        let x = u32::try_from(i.checked_rem(width)?).ok()?;
        let pos = Position::new(x, y);
        self.contains(pos).then_some(pos)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// A uniformly random cell.
    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        Position::new(rng.random_range(0..self.width), rng.random_range(0..self.height))
    }
}

/// Shortest wrapped distance between two coordinates on an axis of `len`.
fn axis_distance(a: u32, b: u32, len: u32) -> u32 {
    let direct = a.abs_diff(b);
    direct.min(len.saturating_sub(direct))
}
