//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::colour::Colour;

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];
const PIECE_SYMBOLS_UNICODE: [char; 12] =
    ['♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚'];

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King. Usually
/// paired with the colour of the piece in a [`Piece`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// Kinds a pawn may promote to, most valuable first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Checks if this piece kind is a diagonal slider (bishops and queens).
    #[inline(always)]
    pub fn is_diagonal_slider(self) -> bool {
        matches!(self, Self::Bishop | Self::Queen)
    }

    /// Checks if this piece kind is an orthogonal slider (rooks and queens).
    #[inline(always)]
    pub fn is_orthogonal_slider(self) -> bool {
        matches!(self, Self::Rook | Self::Queen)
    }

    /// Checks if a pawn can promote to this kind of piece.
    #[inline(always)]
    pub fn is_valid_promotion_target(self) -> bool {
        !matches!(self, Self::Pawn | Self::King)
    }

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
        .into_iter()
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_SYMBOLS[6 + *self as usize])
    }
}
impl FromStr for PieceKind {
    type Err = PieceParseError;

    /// Parses a piece kind from its symbol, regardless of case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Piece::from_str(s).map(|piece| piece.kind)
    }
}

/// Complete set of information for identifying a piece (colour and kind).
///
/// # Parsing
/// Pieces can be parsed from their symbol ('p', 'n', 'b', 'r', 'q', 'k' for black,
/// uppercase for white) or unicode symbols (U+2654 to U+2659 for white, U+265A to U+265F for black)
/// using Rust's [`FromStr`] trait.
/// ```
/// # use chess_rules::game::piece::*;
/// # use chess_rules::game::colour::*;
/// assert_eq!("p".parse(), Ok(Piece::new(PieceKind::Pawn, Colour::Black)));
/// assert_eq!("♕".parse(), Ok(Piece::new(PieceKind::Queen, Colour::White)));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}
impl Piece {
    /// Creates a new `kind` piece of the given `colour`.
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    /// Returns the piece's symbol.
    /// # Example
    /// ```
    /// # use chess_rules::game::piece::*;
    /// # use chess_rules::game::colour::*;
    /// assert_eq!(Piece::new(PieceKind::Pawn, Colour::Black).symbol(), 'p');
    /// ```
    pub fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.colour as usize * 6 + self.kind as usize]
    }

    /// Returns the piece's Unicode symbol.
    /// # Example
    /// ```
    /// # use chess_rules::game::piece::*;
    /// # use chess_rules::game::colour::*;
    /// assert_eq!(Piece::new(PieceKind::Rook, Colour::Black).unicode_symbol(), '♜');
    /// ```
    pub fn unicode_symbol(&self) -> char {
        PIECE_SYMBOLS_UNICODE[self.colour as usize * 6 + self.kind as usize]
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
pub enum PieceParseError {
    #[error("{0} is not a valid piece symbol")]
    InvalidPieceSymbol(char),
    #[error("Empty input")]
    EmptyInput,
    #[error("A piece can only be one character long")]
    InputTooLong,
}

impl PartialFromStr for Piece {
    type Err = PieceParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let symbol = s.chars().next().ok_or(PieceParseError::EmptyInput)?;
        let piece = match symbol {
            'p' | '♟' => Self::new(PieceKind::Pawn, Colour::Black),
            'n' | '♞' => Self::new(PieceKind::Knight, Colour::Black),
            'b' | '♝' => Self::new(PieceKind::Bishop, Colour::Black),
            'r' | '♜' => Self::new(PieceKind::Rook, Colour::Black),
            'q' | '♛' => Self::new(PieceKind::Queen, Colour::Black),
            'k' | '♚' => Self::new(PieceKind::King, Colour::Black),
            'P' | '♙' => Self::new(PieceKind::Pawn, Colour::White),
            'N' | '♘' => Self::new(PieceKind::Knight, Colour::White),
            'B' | '♗' => Self::new(PieceKind::Bishop, Colour::White),
            'R' | '♖' => Self::new(PieceKind::Rook, Colour::White),
            'Q' | '♕' => Self::new(PieceKind::Queen, Colour::White),
            'K' | '♔' => Self::new(PieceKind::King, Colour::White),
            _ => Err(PieceParseError::InvalidPieceSymbol(symbol))?,
        };

        Ok((piece, &s[symbol.len_utf8()..]))
    }
}
impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::partial_from_str(s).and_then(|(result, rest)| {
            if rest.is_empty() {
                Ok(result)
            } else {
                Err(PieceParseError::InputTooLong)
            }
        })
    }
}
