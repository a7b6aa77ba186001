use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::{Position, Snake};

/// The single apple on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns an apple on a free interior cell.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: &[&Snake],
    ) -> Result<Self, GameError> {
        spawn_position(rng, bounds, occupied).map(Self::at)
    }
}

/// Picks a uniformly random interior cell that no snake occupies.
///
/// Returns [`GameError::BoardFull`] when every interior cell is taken.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &[&Snake],
) -> Result<Position, GameError> {
    let mut candidates = Vec::with_capacity(bounds.interior_cells());

    for y in 1..i32::from(bounds.height) - 1 {
        for x in 1..i32::from(bounds.width) - 1 {
            let position = Position { x, y };
            if !occupied.iter().any(|snake| snake.occupies(position)) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(GameError::BoardFull(bounds));
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
