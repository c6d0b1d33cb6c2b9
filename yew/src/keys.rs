use twenty_48::Direction;

/// Minimum travel, in CSS pixels, before a touch counts as a swipe.
pub const SWIPE_THRESHOLD: i32 = 30;

/// Maps a `KeyboardEvent.key` value to a direction.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        _ => None,
    }
}

pub fn is_arrow(key: &str) -> bool {
    key.starts_with("Arrow")
}

// screen y grows downwards
pub fn swipe_direction(start: (i32, i32), end: (i32, i32)) -> Option<Direction> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    if dx.abs().max(dy.abs()) < SWIPE_THRESHOLD {
        return None;
    }
    Some(if dx.abs() >= dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    })
}
