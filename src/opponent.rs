//! Greedy computer-controlled snake.
//!
//! The opponent closes the horizontal gap to the apple first and only then the
//! vertical one. It never plans around obstacles and never avoids its own
//! body, so it can trap itself; it also cannot die on its own.

use crate::config::OPPONENT_SPAWN;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Creates the opponent at its fixed spawn cell.
#[must_use]
pub fn spawn() -> Snake {
    Snake::new(Position::new(OPPONENT_SPAWN.0, OPPONENT_SPAWN.1))
}

/// Direction the opponent takes from `head` toward `apple`, or `None` when it
/// is already on the apple.
#[must_use]
pub fn greedy_direction(head: Position, apple: Position) -> Option<Direction> {
    if apple.x > head.x {
        Some(Direction::Right)
    } else if apple.x < head.x {
        Some(Direction::Left)
    } else if apple.y > head.y {
        Some(Direction::Down)
    } else if apple.y < head.y {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Moves `opponent` one greedy step toward `apple`. Returns true when the
/// step lands on the apple, in which case the tail is kept.
pub fn step(opponent: &mut Snake, apple: Position) -> bool {
    let Some(direction) = greedy_direction(opponent.head(), apple) else {
        return false;
    };

    let next = opponent.head().stepped(direction);
    let ate = next == apple;
    opponent.advance(next, ate);
    ate
}
