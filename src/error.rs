use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::GridSize;

/// Failures that stop a game session.
///
/// Collisions are not errors; they end the run through
/// [`GameStatus::Over`](crate::game::GameStatus::Over).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no free cell left for an apple on the {0} board")]
    BoardFull(GridSize),
    #[error("failed to parse settings file {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
