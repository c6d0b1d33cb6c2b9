use crate::grid::{Cell, Grid, Tile};

/// Result of sliding a single row left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub row: Vec<Cell>,
    pub moved: bool,
    pub points: u64,
}

/// Result of sliding a whole grid in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Whether any cell changed value or emptiness.
    pub moved: bool,
    /// Sum of the merged tile values produced by this move.
    pub points: u64,
}

// scans left to right carrying at most one unmatched tile; a tile produced by
// a merge is emitted straight away so it never merges twice in one pass
pub fn slide_row_left(row: &[Cell]) -> RowOutcome {
    let mut out: Vec<Cell> = Vec::with_capacity(row.len());
    let mut carried: Option<Tile> = None;
    let mut points: u64 = 0;

    for &tile in row.iter().flatten() {
        match carried.take() {
            None => carried = Some(tile),
            Some(prev) => match merge(prev, tile) {
                Some(merged) => {
                    points = points.saturating_add(merged.as_u64());
                    out.push(Some(merged));
                }
                None => {
                    out.push(Some(prev));
                    carried = Some(tile);
                }
            },
        }
    }
    if let Some(prev) = carried {
        out.push(Some(prev));
    }
    out.resize(row.len(), None);

    RowOutcome {
        moved: out.as_slice() != row,
        row: out,
        points,
    }
}

// tiles already at the largest value stay apart
fn merge(prev: Tile, tile: Tile) -> Option<Tile> {
    if prev == tile {
        prev.double()
    } else {
        None
    }
}

pub fn slide_left(grid: &Grid) -> MoveOutcome {
    let mut moved = false;
    let mut points: u64 = 0;
    let rows = grid
        .rows()
        .iter()
        .map(|row| {
            let outcome = slide_row_left(row);
            moved |= outcome.moved;
            points = points.saturating_add(outcome.points);
            outcome.row
        })
        .collect();

    MoveOutcome {
        grid: Grid::from_rows(rows),
        moved,
        points,
    }
}
