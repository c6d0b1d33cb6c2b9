use serde::{Deserialize, Serialize};

use crate::grid::Grid;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "playing")]
    Playing,
    #[serde(rename = "win")]
    Won,
    #[serde(rename = "lose")]
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Snapshot of one game. Moves produce a fresh snapshot rather than editing
/// this one.
///
/// Serialises to `{"map": [[2, null, ...], ...], "score": 0, "bestScore": 0,
/// "gameStatus": "playing"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(rename = "map")]
    pub grid: Grid,
    pub score: u64,
    pub best_score: u64,
    #[serde(rename = "gameStatus")]
    pub status: GameStatus,
}
