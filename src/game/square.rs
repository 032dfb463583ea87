//! Board coordinates and the directions pieces move along.
//!
//! Squares are (row, column) pairs. Row 0 is the eighth rank (black's back rank)
//! and column 0 is the a-file, which matches the order a board is drawn in.

use super::error::ChessError;

/// A square of the chessboard.
///
/// A `Square` is always on the board: the only fallible constructor is
/// [`Square::new`], and translations return `None` instead of leaving the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    row: u8,
    col: u8,
}

macro_rules! named_squares {
    ($($name:ident = ($row:literal, $col:literal)),* $(,)?) => {
        impl Square {
            $(
                pub const $name: Square = Square { row: $row, col: $col };
            )*
        }
    };
}
named_squares! {
    A8 = (0, 0), B8 = (0, 1), C8 = (0, 2), D8 = (0, 3),
    E8 = (0, 4), F8 = (0, 5), G8 = (0, 6), H8 = (0, 7),
    A1 = (7, 0), B1 = (7, 1), C1 = (7, 2), D1 = (7, 3),
    E1 = (7, 4), F1 = (7, 5), G1 = (7, 6), H1 = (7, 7),
}

impl Square {
    /// Instantiates a new square from its row and column.
    /// # Errors
    /// Fails with [`ChessError::InvalidSquare`] if either coordinate is more than 7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Result<Self, ChessError> {
        if row < 8 && col < 8 {
            Ok(Self { row, col })
        } else {
            Err(ChessError::InvalidSquare { row, col })
        }
    }

    /// Instantiates a square from coordinates known to be on the board.
    #[inline]
    pub(crate) const fn from_coords(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    /// Returns the row of the square, 0 being the eighth rank.
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column of the square, 0 being the a-file.
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        self.offset(delta.rows, delta.cols)
    }

    /// Moves this square by the given number of rows and columns.
    ///
    /// Returns `None` if the result would go out of the board.
    #[inline]
    pub const fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        let row = self.row as i8 + rows;
        let col = self.col as i8 + cols;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// An iterator over all squares, row by row from a8 to h1.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Self { row, col }))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", super::notation::square_to_algebraic(*self))
    }
}

/// Deltas represent directions in which pieces can move, as a number of rows
/// and columns to travel.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Delta {
    pub rows: i8,
    pub cols: i8,
}
impl Delta {
    pub const NORTH: Self = Self::new(-1, 0);
    pub const SOUTH: Self = Self::new(1, 0);
    pub const EAST: Self = Self::new(0, 1);
    pub const WEST: Self = Self::new(0, -1);
    pub const NORTH_EAST: Self = Self::new(-1, 1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    pub const SOUTH_EAST: Self = Self::new(1, 1);
    pub const SOUTH_WEST: Self = Self::new(1, -1);

    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::new(-2, 1),
        Self::new(-2, -1),
        Self::new(2, 1),
        Self::new(2, -1),
        Self::new(-1, 2),
        Self::new(-1, -2),
        Self::new(1, 2),
        Self::new(1, -2),
    ];
    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];

    pub const fn new(rows: i8, cols: i8) -> Self {
        Self { rows, cols }
    }
}
