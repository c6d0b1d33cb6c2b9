//! Rules engine for 2048.
//!
//! Every direction is handled by rotating the grid so the move becomes a
//! slide to the left, sliding, and rotating back. All operations take a grid
//! or a [`GameState`] and return a new one; the only source of randomness is
//! the [`IndexSource`] passed in for tile spawns.

pub mod error;
pub mod grid;
pub mod rotate;
pub mod rules;
pub mod slide;
pub mod spawn;
pub mod state;

pub use error::{ConfigError, GridError, RotationError, TileError};
pub use grid::{Cell, Grid, Tile};
pub use rotate::Rotation;
pub use rules::{BestScoreUpdate, RuleConfig, Rules};
pub use slide::{slide_left, slide_row_left, MoveOutcome, RowOutcome};
pub use spawn::{add_random_block, FixedIndices, IndexSource, RandomIndex, SPAWN_TILE};
pub use state::{Direction, GameState, GameStatus};
