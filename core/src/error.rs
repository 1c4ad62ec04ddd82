use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions or mine count")]
    InvalidDimensions,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Mine placement does not fit the board")]
    InvalidMineLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
