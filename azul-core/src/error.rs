//! Error taxonomy shared by the simulator, the search and the handler layer

use crate::model::{Color, Seat};
use thiserror::Error;

/// Errors surfaced by a single decision call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AzulError {
    /// The supplied state could not be parsed or is structurally incomplete
    #[error("invalid game state: {0}")]
    InvalidInput(String),

    /// A move was applied on behalf of a player who is not on turn
    #[error("not player {player}'s turn, it is player {current}'s")]
    InvalidTurn { player: Seat, current: Seat },

    #[error("no factory with id {0}")]
    UnknownFactory(u32),

    #[error("no {color} tiles in the chosen source")]
    ColorNotInSource { color: Color },

    #[error("no legal moves available")]
    NoLegalMoves,

    /// Search finished without a single child at the root
    #[error("no valid action found")]
    NoValidAction,
}

pub type Result<T> = std::result::Result<T, AzulError>;

impl From<serde_json::Error> for AzulError {
    fn from(err: serde_json::Error) -> Self {
        AzulError::InvalidInput(err.to_string())
    }
}
