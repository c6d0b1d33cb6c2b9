use crate::{
    error::{ConfigError, GridError},
    grid::Grid,
    slide::{slide_left, MoveOutcome},
    spawn::{add_random_block, IndexSource},
    state::{Direction, GameState, GameStatus},
};

/// When the best score picks up the current score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BestScoreUpdate {
    /// Best score includes the points of the move just played.
    #[default]
    AfterMove,
    /// Best score only sees the score as it stood before the move, so it
    /// trails by one move.
    BeforeMove,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub rows: usize,
    pub cols: usize,
    pub winning_value: u64,
    pub best_score_update: BestScoreUpdate,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            winning_value: 2048,
            best_score_update: BestScoreUpdate::AfterMove,
        }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(ConfigError::InvalidWinningValue(self.winning_value));
        }
        Ok(())
    }
}

/// The game rules for one board configuration.
///
/// Holds no game: every call takes a snapshot and hands back a new one.
/// Callers stop calling [`Rules::make_move`] once a game is won or lost.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    config: RuleConfig,
}

impl Rules {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Fresh board with two starting tiles and zeroed scores.
    pub fn reset_game(&self, source: &mut impl IndexSource) -> GameState {
        self.new_game(0, source)
    }

    /// Fresh board that keeps an earlier best score.
    pub fn new_game(&self, best_score: u64, source: &mut impl IndexSource) -> GameState {
        let empty = Grid::empty(self.config.rows, self.config.cols);
        let grid = add_random_block(&add_random_block(&empty, source), source);
        GameState {
            grid,
            score: 0,
            best_score,
            status: GameStatus::Playing,
        }
    }

    /// Slides the grid in `direction` without spawning.
    pub fn slide(&self, grid: &Grid, direction: Direction) -> Result<MoveOutcome, GridError> {
        if let Err(e) = grid.validate() {
            log::warn!("rejecting move {direction:?}: {e}");
            return Err(e);
        }

        let turned = grid.rotate(direction.to_left());
        let MoveOutcome {
            grid: slid,
            moved,
            points,
        } = slide_left(&turned);

        Ok(MoveOutcome {
            grid: slid.rotate(direction.from_left()),
            moved,
            points,
        })
    }

    pub fn make_move(
        &self,
        state: &GameState,
        direction: Direction,
        source: &mut impl IndexSource,
    ) -> Result<GameState, GridError> {
        let outcome = self.slide(&state.grid, direction)?;
        log::debug!(
            "move {direction:?}: moved={} points={}",
            outcome.moved,
            outcome.points
        );

        let grid = if outcome.moved {
            add_random_block(&outcome.grid, source)
        } else {
            outcome.grid
        };

        let score = state.score.saturating_add(outcome.points);
        let best_score = match self.config.best_score_update {
            BestScoreUpdate::AfterMove => state.best_score.max(score),
            BestScoreUpdate::BeforeMove => state.best_score.max(state.score),
        };

        let status = self.status_of(&grid);
        if status != state.status {
            log::debug!("status {:?} -> {status:?}", state.status);
        }

        Ok(GameState {
            grid,
            score,
            best_score,
            status,
        })
    }

    pub fn status_of(&self, grid: &Grid) -> GameStatus {
        if self.is_game_win(grid) {
            GameStatus::Won
        } else if self.is_game_lose(grid) {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_game_win(&self, grid: &Grid) -> bool {
        grid.contains_value(self.config.winning_value)
    }

    /// Full and stuck: no direction changes anything.
    pub fn is_game_lose(&self, grid: &Grid) -> bool {
        if !grid.is_full() {
            return false;
        }
        !Direction::ALL
            .iter()
            .any(|&d| slide_left(&grid.rotate(d.to_left())).moved)
    }
}
