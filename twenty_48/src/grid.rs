use std::{
    fmt::{self, Display},
    num::NonZeroU32,
};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, TileError};

// which power of two. NonZero because two is the lowest
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Tile(NonZeroU32);

impl Tile {
    pub const TWO: Tile = Tile(NonZeroU32::MIN);
    pub const FOUR: Tile = Tile(NonZeroU32::MIN.saturating_add(1));

    /// Largest exponent whose value still fits a `u64`.
    pub const MAX_EXPONENT: u32 = u64::BITS - 1;

    /// The next tile up, or `None` once doubling would overflow a `u64`.
    pub const fn double(&self) -> Option<Tile> {
        if self.0.get() >= Tile::MAX_EXPONENT {
            None
        } else {
            Some(Tile(self.0.saturating_add(1)))
        }
    }

    pub fn as_u64(&self) -> u64 {
        1_u64 << self.0.get()
    }

    pub fn exponent(&self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u64> for Tile {
    type Error = TileError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value < 2 || !value.is_power_of_two() {
            return Err(TileError::NotPowerOfTwo(value));
        }
        NonZeroU32::new(value.trailing_zeros())
            .map(Tile)
            .ok_or(TileError::NotPowerOfTwo(value))
    }
}

impl From<Tile> for u64 {
    fn from(tile: Tile) -> u64 {
        tile.as_u64()
    }
}

/// A grid position: a tile or nothing.
pub type Cell = Option<Tile>;

/// Rows of cells, top row first.
///
/// Construction does not enforce the rectangular invariant, so that snapshots
/// coming from outside can be carried around and rejected by [`Grid::validate`]
/// at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Grid {
            rows: vec![vec![None; cols]; rows],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    /// Builds a grid from plain numbers, `0` meaning an empty cell.
    pub fn from_values<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self, TileError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| match v {
                        0 => Ok(None),
                        v => Tile::try_from(v).map(Some),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Grid { rows })
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row; an empty grid has no columns.
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_rectangular(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), GridError> {
        let expected = self.col_count();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, cells)) => Err(GridError::Malformed {
                row,
                expected,
                found: cells.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.rows.iter().flatten().filter_map(|c| *c)
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_none())
                    .map(move |(c, _)| (r, c))
            })
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_some)
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn max_tile(&self) -> Option<Tile> {
        self.tiles().max()
    }

    pub fn contains_value(&self, value: u64) -> bool {
        self.tiles().any(|t| t.as_u64() == value)
    }

    /// Copy of this grid with one cell replaced. Out of range positions leave
    /// the copy unchanged.
    pub fn with_tile(&self, row: usize, col: usize, tile: Tile) -> Grid {
        let mut next = self.clone();
        if let Some(cell) = next.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = Some(tile);
        }
        next
    }

    fn print_row(f: &mut impl fmt::Write, row: &[Cell]) -> fmt::Result {
        for tile in row.iter() {
            match tile {
                Some(tile) => write!(f, "|{: ^5}", tile.as_u64())?,
                None => write!(f, "|{: ^5}", " ")?,
            }
        }
        Ok(())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            Grid::print_row(f, row)?;
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
