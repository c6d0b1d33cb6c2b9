use twenty_48::{GameState, RuleConfig};
use web_sys::Storage;

const KEY: &str = "gameState";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load(config: &RuleConfig) -> Option<GameState> {
    let text = match local_storage()?.get_item(KEY) {
        Ok(text) => text?,
        Err(e) => {
            log::warn!("failed to read saved game: {e:?}");
            return None;
        }
    };
    decode(&text, config)
}

pub fn save(state: &GameState) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(state) {
        Ok(text) => {
            if let Err(e) = storage.set_item(KEY, &text) {
                log::warn!("failed to save game: {e:?}");
            }
        }
        Err(e) => log::warn!("failed to encode game: {e}"),
    }
}

/// The saved game if there is one, otherwise a fresh game that is handed to
/// `store` before it is returned.
pub fn resume_or(
    saved: Option<GameState>,
    fresh: impl FnOnce() -> GameState,
    store: impl FnOnce(&GameState),
) -> GameState {
    saved.unwrap_or_else(|| {
        let state = fresh();
        store(&state);
        state
    })
}

/// Parses a saved game, discarding it when it is corrupt or was played on a
/// different board size.
pub fn decode(text: &str, config: &RuleConfig) -> Option<GameState> {
    let state: GameState = match serde_json::from_str(text) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("discarding corrupt saved game: {e}");
            return None;
        }
    };
    let grid = &state.grid;
    if !grid.is_rectangular() || grid.row_count() != config.rows || grid.col_count() != config.cols {
        log::warn!("discarding saved game with a board that does not fit");
        return None;
    }
    Some(state)
}
