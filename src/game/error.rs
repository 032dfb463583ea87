//! Errors raised by the rules core.
//!
//! All of these are contract violations reported to the immediate caller. The
//! core never retries nor partially applies an operation that fails.

use thiserror::Error;

#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum ChessError {
    #[error("Square ({row}, {col}) is outside of the board")]
    InvalidSquare { row: u8, col: u8 },
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("No move left to undo")]
    EmptyLog,
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}
