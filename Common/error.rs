use thiserror::Error;

use crate::board::BoardError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no players remain")]
    NoPlayers,
    #[error("rotation degrees must be a multiple of 90")]
    InvalidRotation,
    #[error(transparent)]
    Board(#[from] BoardError),
}
