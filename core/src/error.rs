use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid size must be between 2 and 26, got {0}")]
    InvalidSize(usize),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, requested {requested} but only {capacity} cells")]
    TooManyMines { requested: usize, capacity: usize },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a coordinate string like `B3` was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No coordinates given")]
    Empty,
    #[error("Row must be a letter")]
    InvalidRow,
    #[error("Column must be a number")]
    InvalidColumn,
    #[error("Coordinates are outside the grid")]
    OutOfBounds,
}
