//! The 8x8 grid of pieces.
//!
//! A [`Board`] knows nothing about the rules: it only stores which piece sits on
//! which square.

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
    square::Square,
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of squares, each either empty or holding a single piece.
///
/// Rows are indexed from the eighth rank down, columns from the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}
impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The starting position of chess.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            for colour in [Colour::White, Colour::Black] {
                board.squares[colour.back_row() as usize][col] = Some(Piece::new(kind, colour));
                board.squares[colour.pawn_row() as usize][col] =
                    Some(Piece::new(PieceKind::Pawn, colour));
            }
        }
        board
    }

    /// Returns the piece sitting on a given square, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Puts a piece on a square (or empties it), returning what was there before.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    /// Empties a square, returning the piece that was on it.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    /// Checks whether a square is empty.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Iterator over every occupied square and the piece on it.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::squares_iter().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    /// Returns the square holding the king of the given colour.
    ///
    /// Returns `None` if there is no such king, which can only happen on a board
    /// that is not a playable position.
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == Piece::new(PieceKind::King, colour))
            .map(|(square, _)| square)
    }

    /// Number of pieces of a given kind and colour on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let square = Square::from_coords(row, col);
                write!(
                    f,
                    "{} ",
                    match self.get(square) {
                        None => '.',
                        Some(piece) => piece.symbol(),
                    }
                )?
            }
            writeln!(f)?
        }
        write!(f, "  a b c d e f g h")
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initial_board_layout() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_square(Colour::White), Some(Square::E1));
        assert_eq!(board.king_square(Colour::Black), Some(Square::E8));
        assert_eq!(
            board.get(Square::D1),
            Some(Piece::new(PieceKind::Queen, Colour::White))
        );
        assert_eq!(
            board.get(Square::A8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );
        assert_eq!(board.count(Piece::new(PieceKind::Pawn, Colour::Black)), 8);
        assert!(board.is_empty("e4".parse().unwrap()));
    }

    #[test]
    fn set_and_take() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceKind::Knight, Colour::White);
        let c3 = "c3".parse().unwrap();
        assert_eq!(board.set(c3, Some(knight)), None);
        assert_eq!(board.get(c3), Some(knight));
        assert_eq!(board.take(c3), Some(knight));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn board_diagram() {
        let diagram = Board::initial().to_string();
        let first = diagram.lines().next().unwrap();
        assert_eq!(first, "8 r n b q k b n r ");
        assert_eq!(diagram.lines().last(), Some("  a b c d e f g h"));
    }
}
