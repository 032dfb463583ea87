//! # Actions (or moves)

use super::{
    board::Board,
    colour::Colour,
    error::ChessError,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Special-move markers carried by a [`Move`].
///
/// At most one of these is set on any given move. Promotions are described by
/// [`Move::promotion`] instead, since they carry the kind being promoted to.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFlags(u8);
impl MoveFlags {
    pub const NONE: Self = Self(0);
    pub const DOUBLE_PUSH: Self = Self(1 << 0);
    pub const EN_PASSANT: Self = Self(1 << 1);
    pub const KINGSIDE_CASTLE: Self = Self(1 << 2);
    pub const QUEENSIDE_CASTLE: Self = Self(1 << 3);

    /// Checks if all flags in `other` are set.
    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}
impl std::ops::BitOr for MoveFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// One ply: which piece went where, what it captured and how to take it back.
///
/// A move is immutable once built. It stores the identity of the moved and
/// captured pieces so that undoing it never has to look anything up; the
/// position metadata it overwrites (castling rights, en passant target) is kept
/// alongside it in the game history.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}
impl Move {
    /// Creates a new move that does not capture anything.
    #[inline(always)]
    pub const fn new_quiet(from: Square, to: Square, moved: Piece) -> Self {
        Self {
            from,
            to,
            moved,
            captured: None,
            promotion: None,
            flags: MoveFlags::NONE,
        }
    }

    /// Creates a new capture of the piece standing on `to`.
    #[inline(always)]
    pub const fn new_capture(from: Square, to: Square, moved: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            moved,
            captured: Some(captured),
            promotion: None,
            flags: MoveFlags::NONE,
        }
    }

    /// Creates a new double push, which allows en passant on the next ply.
    #[inline(always)]
    pub const fn new_double_push(from: Square, to: Square, moved: Piece) -> Self {
        Self {
            from,
            to,
            moved,
            captured: None,
            promotion: None,
            flags: MoveFlags::DOUBLE_PUSH,
        }
    }

    /// Creates an en passant capture. `captured` is the pawn standing next to the
    /// origin square, on the target's column.
    #[inline(always)]
    pub const fn new_en_passant(from: Square, to: Square, moved: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            moved,
            captured: Some(captured),
            promotion: None,
            flags: MoveFlags::EN_PASSANT,
        }
    }

    /// Creates the set of promotions from a pawn push or capture, one per
    /// promotion kind.
    #[inline(always)]
    pub const fn new_promotions(
        from: Square,
        to: Square,
        moved: Piece,
        captured: Option<Piece>,
    ) -> [Self; 4] {
        let general_move = Self {
            from,
            to,
            moved,
            captured,
            promotion: None,
            flags: MoveFlags::NONE,
        };
        [
            general_move.promoting_to(PieceKind::PROMOTIONS[0]),
            general_move.promoting_to(PieceKind::PROMOTIONS[1]),
            general_move.promoting_to(PieceKind::PROMOTIONS[2]),
            general_move.promoting_to(PieceKind::PROMOTIONS[3]),
        ]
    }

    const fn promoting_to(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Creates a kingside castle move for the given side.
    #[inline(always)]
    pub const fn new_kingside_castle(side: Colour) -> Self {
        let (from, to) = if side.is_black() {
            (Square::E8, Square::G8)
        } else {
            (Square::E1, Square::G1)
        };
        Self {
            from,
            to,
            moved: Piece::new(PieceKind::King, side),
            captured: None,
            promotion: None,
            flags: MoveFlags::KINGSIDE_CASTLE,
        }
    }

    /// Creates a queenside castle move for the given side.
    #[inline(always)]
    pub const fn new_queenside_castle(side: Colour) -> Self {
        let (from, to) = if side.is_black() {
            (Square::E8, Square::C8)
        } else {
            (Square::E1, Square::C1)
        };
        Self {
            from,
            to,
            moved: Piece::new(PieceKind::King, side),
            captured: None,
            promotion: None,
            flags: MoveFlags::QUEENSIDE_CASTLE,
        }
    }

    /// Builds a plain move record from two squares picked on a board, the way a
    /// front end does from two clicks.
    ///
    /// The result carries no special-move flags: hand it to
    /// [`GameState::resolve`](super::state::GameState::resolve) to obtain the
    /// matching legal move.
    /// # Errors
    /// Fails with [`ChessError::IllegalMove`] if `from` is empty.
    pub fn from_board(
        from: Square,
        to: Square,
        board: &Board,
        promotion: Option<PieceKind>,
    ) -> Result<Self, ChessError> {
        let moved = board
            .get(from)
            .ok_or_else(|| ChessError::IllegalMove(format!("no piece on {from}")))?;
        Ok(Self {
            from,
            to,
            moved,
            captured: board.get(to),
            promotion,
            flags: MoveFlags::NONE,
        })
    }

    /// Returns the square the move originates from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }
    /// Returns the square the move targets.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }
    /// Returns the piece being moved, as it stood on the origin square.
    #[inline(always)]
    pub const fn moved(&self) -> Piece {
        self.moved
    }
    /// Returns the captured piece, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }
    /// Returns the kind of piece the pawn promotes to, if this is a promotion.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns the piece standing on the target square once the move is made.
    #[inline(always)]
    pub const fn placed(&self) -> Piece {
        match self.promotion {
            Some(kind) => Piece::new(kind, self.moved.colour),
            None => self.moved,
        }
    }

    /// Checks if this move is a capture (en passant included).
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
    /// Checks if this move is a pawn double push.
    #[inline(always)]
    pub const fn is_double_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PUSH)
    }
    /// Checks if this move is an en passant capture.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }
    /// Checks if this move encodes a kingside castle.
    #[inline(always)]
    pub const fn is_kingside_castle(&self) -> bool {
        self.flags.contains(MoveFlags::KINGSIDE_CASTLE)
    }
    /// Checks if this move encodes a queenside castle.
    #[inline(always)]
    pub const fn is_queenside_castle(&self) -> bool {
        self.flags.contains(MoveFlags::QUEENSIDE_CASTLE)
    }
    /// Checks if this move is a castle on either wing.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    /// Square the captured piece stood on. Differs from the target square only
    /// for en passant captures.
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant() {
            Square::from_coords(self.from.row(), self.to.col())
        } else {
            self.to
        }
    }

    /// For castling moves, the origin and target squares of the rook.
    pub fn castling_rook(&self) -> Option<(Square, Square)> {
        let row = self.from.row();
        if self.is_kingside_castle() {
            Some((Square::from_coords(row, 7), Square::from_coords(row, 5)))
        } else if self.is_queenside_castle() {
            Some((Square::from_coords(row, 0), Square::from_coords(row, 3)))
        } else {
            None
        }
    }

    /// For double pushes, the square passed over (the new en passant target).
    pub fn passed_square(&self) -> Option<Square> {
        if self.is_double_push() {
            Some(Square::from_coords(
                (self.from.row() + self.to.row()) / 2,
                self.from.col(),
            ))
        } else {
            None
        }
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", super::notation::move_to_algebraic(self))
    }
}
