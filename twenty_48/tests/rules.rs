use proptest::prelude::*;
use twenty_48::{
    slide_left, Direction, FixedIndices, GameState, GameStatus, Grid, GridError, RandomIndex,
    Rules, Tile,
};

fn playing(grid: Grid) -> GameState {
    GameState {
        grid,
        score: 0,
        best_score: 0,
        status: GameStatus::Playing,
    }
}

#[test]
fn up_merges_into_top_left_and_spawns_once() {
    let rules = Rules::default();
    let before = playing(Grid::from_values(&[[2, 0, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]).unwrap());

    let after = rules
        .make_move(&before, Direction::Up, &mut RandomIndex::from_seed(3))
        .unwrap();

    assert_eq!(after.grid.get(0, 0), Some(Tile::FOUR));
    assert_eq!(after.grid.occupied_count(), 2);
    assert_eq!(after.score, 4);
    assert_eq!(after.best_score, 4);
    assert_eq!(after.status, GameStatus::Playing);
    // the old snapshot is untouched
    assert_eq!(before.grid.get(1, 0), Some(Tile::TWO));
}

#[test]
fn left_slide_without_merge_spawns_third_tile() {
    let rules = Rules::default();
    let before = playing(Grid::from_values(&[[0; 4], [0; 4], [0, 0, 0, 2], [0, 0, 0, 2]]).unwrap());

    let after = rules
        .make_move(&before, Direction::Left, &mut FixedIndices::new([0]))
        .unwrap();

    assert_eq!(after.grid.get(2, 0), Some(Tile::TWO));
    assert_eq!(after.grid.get(3, 0), Some(Tile::TWO));
    assert_eq!(after.grid.occupied_count(), 3);
    assert_eq!(after.score, 0);
}

// | 128 | 64  | 32  |  8  |
// |  8  |  4  |  8  |  4  |
// |     |     |     |     |
// |     |     |     |     |
#[test]
fn packed_rows_cannot_move_right() {
    let grid = Grid::from_values(&[[128, 64, 32, 8], [8, 4, 8, 4], [0; 4], [0; 4]]).unwrap();
    let rules = Rules::default();

    assert!(!rules.slide(&grid, Direction::Right).unwrap().moved);
    assert!(rules.slide(&grid, Direction::Down).unwrap().moved);
}

#[test]
fn no_op_move_keeps_grid_and_keeps_playing() {
    let rules = Rules::default();
    let before = playing(Grid::from_values(&[[2, 0, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]).unwrap());

    let after = rules
        .make_move(&before, Direction::Left, &mut RandomIndex::from_seed(1))
        .unwrap();

    assert_eq!(after.grid, before.grid);
    assert_eq!(after.status, GameStatus::Playing);
}

#[test]
fn stuck_board_loses_on_no_op_move() {
    let rules = Rules::default();
    let before = playing(
        Grid::from_values(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap(),
    );

    let after = rules
        .make_move(&before, Direction::Left, &mut RandomIndex::from_seed(1))
        .unwrap();

    assert_eq!(after.grid, before.grid);
    assert_eq!(after.status, GameStatus::Lost);
}

#[test]
fn full_board_with_no_moves_left_is_lost() {
    let rules = Rules::default();
    let before = playing(
        Grid::from_values(&[[2, 4, 2, 4], [4, 2, 4, 8], [2, 8, 2, 4], [4, 2, 4, 2]]).unwrap(),
    );

    let after = rules
        .make_move(&before, Direction::Left, &mut RandomIndex::from_seed(1))
        .unwrap();

    assert_eq!(after.status, GameStatus::Lost);
}

#[test]
fn reaching_2048_wins() {
    let rules = Rules::default();
    let before = playing(Grid::from_values(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap());

    let after = rules
        .make_move(&before, Direction::Left, &mut RandomIndex::from_seed(1))
        .unwrap();

    assert_eq!(after.status, GameStatus::Won);
    assert!(rules.is_game_win(&after.grid));
}

#[test]
fn any_2048_tile_is_a_win() {
    let rules = Rules::default();
    let grid = Grid::from_values(&[[0; 4], [0; 4], [0, 0, 2048, 0], [0; 4]]).unwrap();
    assert!(rules.is_game_win(&grid));
    assert!(!rules.is_game_win(&Grid::empty(4, 4)));
}

#[test]
fn win_beats_loss_on_a_stuck_board() {
    let rules = Rules::default();
    let grid = Grid::from_values(&[[2048, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
        .unwrap();
    assert!(rules.is_game_lose(&grid));
    assert_eq!(rules.status_of(&grid), GameStatus::Won);
}

#[test]
fn full_board_with_a_merge_is_not_lost() {
    let rules = Rules::default();
    let grid = Grid::from_values(&[[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]])
        .unwrap();
    assert!(!rules.is_game_lose(&grid));
}

#[test]
fn ragged_grid_is_rejected() {
    let rules = Rules::default();
    let before = playing(Grid::from_rows(vec![
        vec![Some(Tile::TWO), Some(Tile::TWO), None],
        vec![None, None],
        vec![None, None, None, None],
    ]));

    let err = rules
        .make_move(&before, Direction::Left, &mut RandomIndex::from_seed(1))
        .unwrap_err();

    assert_eq!(
        err,
        GridError::Malformed {
            row: 1,
            expected: 3,
            found: 2
        }
    );
    assert!(err.to_string().starts_with("grid rows have unequal length"));
}

#[test]
fn rectangular_non_square_board_plays() {
    let rules = Rules::new(twenty_48::RuleConfig {
        rows: 3,
        cols: 5,
        ..Default::default()
    });
    let game = rules.reset_game(&mut RandomIndex::from_seed(9));
    assert_eq!((game.grid.row_count(), game.grid.col_count()), (3, 5));

    let before = playing(Grid::from_values(&[[2, 0, 0, 0, 2], [0; 5], [0; 5]]).unwrap());
    let after = rules
        .make_move(&before, Direction::Up, &mut FixedIndices::default())
        .unwrap();
    assert!(after.grid.is_rectangular());
    assert_eq!((after.grid.row_count(), after.grid.col_count()), (3, 5));

    let after = rules
        .make_move(&before, Direction::Right, &mut FixedIndices::new([0]))
        .unwrap();
    assert_eq!(after.grid.get(0, 4), Some(Tile::FOUR));
}

fn arb_board() -> impl Strategy<Value = Grid> {
    prop::collection::vec(prop::option::of(1u32..6), 16).prop_map(|cells| {
        Grid::from_rows(
            cells
                .chunks(4)
                .map(|row| {
                    row.iter()
                        .map(|e| e.and_then(|e| Tile::try_from(1_u64 << e).ok()))
                        .collect()
                })
                .collect(),
        )
    })
}

// small exponents keep equal neighbours common, so both outcomes show up
fn arb_full_board() -> impl Strategy<Value = Grid> {
    prop::collection::vec(1u32..4, 16).prop_map(|cells| {
        Grid::from_rows(
            cells
                .chunks(4)
                .map(|row| row.iter().map(|&e| Tile::try_from(1_u64 << e).ok()).collect())
                .collect(),
        )
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn best_score_never_drops(
        grid in arb_board(),
        direction in arb_direction(),
        score in 0u64..10_000,
        extra in 0u64..10_000,
        seed in any::<u64>(),
    ) {
        let before = GameState { grid, score, best_score: score + extra, status: GameStatus::Playing };
        let after = Rules::default()
            .make_move(&before, direction, &mut RandomIndex::from_seed(seed))
            .unwrap();
        prop_assert!(after.best_score >= before.best_score);
        prop_assert!(after.score >= before.score);
        prop_assert!(after.best_score >= after.score);
    }

    #[test]
    fn no_spawn_without_movement(grid in arb_board(), direction in arb_direction(), seed in any::<u64>()) {
        let rules = Rules::default();
        let outcome = rules.slide(&grid, direction).unwrap();
        let after = rules
            .make_move(&playing(grid.clone()), direction, &mut RandomIndex::from_seed(seed))
            .unwrap();
        if outcome.moved {
            prop_assert_eq!(after.grid.occupied_count(), outcome.grid.occupied_count() + 1);
        } else {
            prop_assert_eq!(after.grid.occupied_count(), grid.occupied_count());
            prop_assert_eq!(&after.grid, &grid);
        }
    }

    #[test]
    fn lose_check_matches_every_direction(grid in arb_board()) {
        let rules = Rules::default();
        let any_moves = Direction::ALL
            .iter()
            .any(|&d| rules.slide(&grid, d).unwrap().moved);
        prop_assert_eq!(rules.is_game_lose(&grid), grid.is_full() && !any_moves);
    }

    #[test]
    fn full_board_lose_check_matches_every_direction(grid in arb_full_board()) {
        let rules = Rules::default();
        prop_assert!(grid.is_full());
        let any_moves = Direction::ALL
            .iter()
            .any(|&d| rules.slide(&grid, d).unwrap().moved);
        prop_assert_eq!(rules.is_game_lose(&grid), !any_moves);
        let status = if any_moves { GameStatus::Playing } else { GameStatus::Lost };
        prop_assert_eq!(rules.status_of(&grid), status);
    }

    #[test]
    fn left_matches_slide_left(grid in arb_board()) {
        prop_assert_eq!(Rules::default().slide(&grid, Direction::Left).unwrap(), slide_left(&grid));
    }
}
