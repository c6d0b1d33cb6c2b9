use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{Grid, Tile};

/// Every spawned tile is a two.
pub const SPAWN_TILE: Tile = Tile::TWO;

/// Picks which of the open cells receives the next tile.
///
/// `next_index` is called with the number of open cells and should answer
/// with an index below it, or `0` when there are none.
pub trait IndexSource {
    fn next_index(&mut self, open: usize) -> usize;
}

/// Uniform picks from a [`rand`] generator.
#[derive(Clone, Debug)]
pub struct RandomIndex<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomIndex<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomIndex<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> IndexSource for RandomIndex<R> {
    fn next_index(&mut self, open: usize) -> usize {
        if open == 0 {
            return 0;
        }
        self.rng.random_range(0..open)
    }
}

/// Replays a scripted list of picks, then keeps answering `0`.
/// Picks past the number of open cells wrap around.
#[derive(Clone, Debug, Default)]
pub struct FixedIndices {
    picks: VecDeque<usize>,
}

impl FixedIndices {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl IndexSource for FixedIndices {
    fn next_index(&mut self, open: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.checked_rem(open).unwrap_or(0)
    }
}

/// Places a [`SPAWN_TILE`] in one open cell. A full grid comes back unchanged.
pub fn add_random_block(grid: &Grid, source: &mut impl IndexSource) -> Grid {
    let open = grid.empty_cells();
    if open.is_empty() {
        return grid.clone();
    }

    let pick = source.next_index(open.len()).min(open.len() - 1);
    let (row, col) = open[pick];
    log::trace!("spawning {} at ({row}, {col})", SPAWN_TILE.as_u64());
    grid.with_tile(row, col, SPAWN_TILE)
}
