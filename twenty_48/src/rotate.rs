use crate::{
    error::RotationError,
    grid::{Cell, Grid},
    state::Direction,
};

/// Counter-clockwise quarter turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = RotationError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            d => Err(RotationError::InvalidAngle(d)),
        }
    }
}

impl Direction {
    /// Turn that brings this direction round to `Left`, so a left slide on
    /// the rotated grid is a slide this way on the original.
    pub fn to_left(self) -> Rotation {
        match self {
            Direction::Up => Rotation::Deg90,
            Direction::Right => Rotation::Deg180,
            Direction::Down => Rotation::Deg270,
            Direction::Left => Rotation::Deg0,
        }
    }

    /// Turn that undoes [`Direction::to_left`].
    pub fn from_left(self) -> Rotation {
        self.to_left().inverse()
    }
}

impl Grid {
    /// New grid turned counter-clockwise. Quarter turns swap the row and
    /// column counts.
    pub fn rotate(&self, rotation: Rotation) -> Grid {
        let rows = self.row_count();
        let cols = self.col_count();
        if rows == 0 || cols == 0 {
            return self.clone();
        }

        match rotation {
            Rotation::Deg0 => self.clone(),
            Rotation::Deg90 => Grid::build(cols, rows, |r, c| self.get(c, cols - r - 1)),
            Rotation::Deg180 => Grid::build(rows, cols, |r, c| self.get(rows - r - 1, cols - c - 1)),
            Rotation::Deg270 => Grid::build(cols, rows, |r, c| self.get(rows - c - 1, r)),
        }
    }

    fn build(rows: usize, cols: usize, at: impl Fn(usize, usize) -> Cell) -> Grid {
        Grid::from_rows(
            (0..rows)
                .map(|r| (0..cols).map(|c| at(r, c)).collect())
                .collect(),
        )
    }
}
