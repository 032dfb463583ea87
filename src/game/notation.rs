//! # Coordinate notation
//! Conversions between internal (row, column) squares and algebraic names, and
//! long algebraic (pure coordinate) notation for moves, i.e. `<from><to>[promotion]`.
//!
//! Standard Algebraic Notation (piece letters, captures, check markers) is not
//! produced here.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::{walk_whitespace, PartialFromStr};

use super::{
    action::Move,
    piece::{Piece, PieceKind},
    square::Square,
};

/// File letters, indexed by column.
const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
/// Rank digits, indexed by row (row 0 is the eighth rank).
const RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum NotationError {
    #[error("Unexpected end of input")]
    EmptyInput,
    #[error("{0} is not a valid file")]
    InvalidFile(char),
    #[error("{0} is not a valid rank")]
    InvalidRank(char),
    #[error("{0} is not a valid piece symbol")]
    InvalidPiece(char),
    #[error("Pawns cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    #[error("Unexpected trailing input")]
    TrailingInput,
}

/// Returns the algebraic name of a square.
/// # Example
/// ```
/// # use chess_rules::game::{notation::square_to_algebraic, square::Square};
/// assert_eq!(square_to_algebraic(Square::new(0, 0).unwrap()), "a8");
/// assert_eq!(square_to_algebraic(Square::E1), "e1");
/// ```
pub fn square_to_algebraic(square: Square) -> String {
    let mut name = String::with_capacity(2);
    name.push(FILES[square.col() as usize]);
    name.push(RANKS[square.row() as usize]);
    name
}

/// Returns the square corresponding to an algebraic name such as "e4".
pub fn algebraic_to_square(name: &str) -> Result<Square, NotationError> {
    name.parse()
}

/// Returns the long algebraic notation of a move: the origin and target squares,
/// followed by the promotion piece if any (as in `e7e8q`).
pub fn move_to_algebraic(mv: &Move) -> String {
    CoordinateMove::from(mv).to_string()
}

impl PartialFromStr for Square {
    type Err = NotationError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(NotationError::EmptyInput)?;
        let rank = chars.next().ok_or(NotationError::EmptyInput)?;
        let col = FILES
            .iter()
            .position(|&f| f == file.to_ascii_lowercase())
            .ok_or(NotationError::InvalidFile(file))?;
        let row = RANKS
            .iter()
            .position(|&r| r == rank)
            .ok_or(NotationError::InvalidRank(rank))?;

        Ok((Square::from_coords(row as u8, col as u8), chars.as_str()))
    }
}
impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (square, "") => Ok(square),
            _ => Err(NotationError::TrailingInput),
        }
    }
}

impl PartialFromStr for PieceKind {
    type Err = NotationError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let symbol = s.chars().next().ok_or(NotationError::EmptyInput)?;
        Piece::partial_from_str(s)
            .map(|(piece, rest)| (piece.kind, rest))
            .map_err(|_| NotationError::InvalidPiece(symbol))
    }
}

/// Pure coordinate notation move, as typed by a user or sent by a front end.
///
/// These carry no information about the pieces involved, and can be handed to a
/// [`GameState`](super::state::GameState) to be resolved into a legal [`Move`].
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promoting_to: Option<PieceKind>,
}
impl From<&Move> for CoordinateMove {
    fn from(mv: &Move) -> Self {
        Self {
            from: mv.from(),
            to: mv.to(),
            promoting_to: mv.promotion(),
        }
    }
}
impl std::fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promoting_to {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}
impl PartialFromStr for CoordinateMove {
    type Err = NotationError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (from, rest) = Square::partial_from_str(s)?;
        let (to, rest) = Square::partial_from_str(rest)?;
        let (promoting_to, rest) = match Option::<PieceKind>::partial_from_str(rest) {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        };
        if let Some(kind) = promoting_to.filter(|kind| !kind.is_valid_promotion_target()) {
            return Err(NotationError::InvalidPromotion(kind));
        }

        Ok((
            Self {
                from,
                to,
                promoting_to,
            },
            rest,
        ))
    }
}
impl FromStr for CoordinateMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mv, rest) = Self::partial_from_str(walk_whitespace(s))?;
        if walk_whitespace(rest).is_empty() {
            Ok(mv)
        } else {
            Err(NotationError::TrailingInput)
        }
    }
}
