use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Coordinates {coords:?} are outside the board")]
    OutOfBounds { coords: Coord2 },
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}

impl GameError {
    /// Whether the caller can simply ignore this error and keep playing.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration(_))
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
