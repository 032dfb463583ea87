//! Main API to represent and interact with a game of chess.
//!
//! This includes making, unmaking and generating moves, and querying whether the
//! game is over.

use super::{
    action::Move,
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    error::ChessError,
    history::HistoryEntry,
    movegen::{self, MoveList},
    piece::{Piece, PieceKind},
    square::Square,
};

/// Where a game stands, derived from the position each time it is asked for.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Colour },
    Stalemate,
}

/// Represents a game of chess: the board, whose turn it is, and everything needed
/// to take moves back.
///
/// The board is always the result of replaying the move log on top of the
/// position the game started from, and the side to move flips exactly once per
/// logged move.
#[derive(PartialEq, Eq, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    history: Vec<HistoryEntry>,
}
impl Default for GameState {
    /// The initial position of chess.
    fn default() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Colour::White,
            castling_rights: CastlingRights::full(),
            en_passant: None,
            history: Vec::new(),
        }
    }
}
impl GameState {
    /// The initial position of chess, white to move.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Sets up a game from an arbitrary position.
    /// # Errors
    /// Returns [`ChessError::InvalidPosition`] if either side does not have
    /// exactly one king, has more than 16 pieces or 8 pawns, if a pawn stands on
    /// the first or last rank, or if the en passant target is not right behind a
    /// pawn that could have just double pushed.
    pub fn from_parts(
        board: Board,
        side_to_move: Colour,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, ChessError> {
        for colour in [Colour::White, Colour::Black] {
            let kings = board.count(Piece::new(PieceKind::King, colour));
            if kings != 1 {
                return Err(ChessError::InvalidPosition(format!(
                    "{colour} has {kings} kings"
                )));
            }
            if board.pieces().filter(|(_, p)| p.colour == colour).count() > 16 {
                return Err(ChessError::InvalidPosition(format!(
                    "{colour} has more than 16 pieces"
                )));
            }
            if board.count(Piece::new(PieceKind::Pawn, colour)) > 8 {
                return Err(ChessError::InvalidPosition(format!(
                    "{colour} has more than 8 pawns"
                )));
            }
        }
        if let Some((square, _)) = board
            .pieces()
            .find(|(sq, p)| p.kind == PieceKind::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            return Err(ChessError::InvalidPosition(format!("pawn on {square}")));
        }
        if let Some(target) = en_passant {
            // The pawn that just moved belongs to the side not to move.
            let mover = side_to_move.inverse();
            let pushed_to = target.offset(mover.forward(), 0);
            let valid = target.row() as i8 == mover.pawn_row() as i8 + mover.forward()
                && board.is_empty(target)
                && pushed_to.and_then(|sq| board.get(sq))
                    == Some(Piece::new(PieceKind::Pawn, mover));
            if !valid {
                return Err(ChessError::InvalidPosition(format!(
                    "{target} is not a valid en passant target"
                )));
            }
        }

        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            history: Vec::new(),
        })
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current side to move.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the current castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the square a pawn can currently capture en passant onto, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the full history of the game, oldest move first.
    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Iterator over the moves played so far, oldest first.
    pub fn move_log(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|entry| &entry.played)
    }

    /// Returns the last move played, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.played)
    }

    /// Makes a move on the board, modifying the game.
    ///
    /// The move is trusted to come from [`GameState::valid_moves`]: only its
    /// origin square is checked against the board.
    /// # Errors
    /// Returns [`ChessError::IllegalMove`] if the origin square is empty or does
    /// not hold the moving piece of the side to move. The game is left untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        match self.board.get(mv.from()) {
            None => Err(ChessError::IllegalMove(format!(
                "{mv}: no piece on {}",
                mv.from()
            ))),
            Some(piece) if piece != mv.moved() || piece.colour != self.side_to_move => {
                Err(ChessError::IllegalMove(format!(
                    "{mv}: {} stands on {}, it is {} to move",
                    piece,
                    mv.from(),
                    self.side_to_move
                )))
            }
            Some(_) => {
                log::debug!("making {mv}");
                self.apply(mv);
                Ok(())
            }
        }
    }

    /// Undoes the last move played, restoring the game as it was before it.
    ///
    /// Returns the move that was taken back.
    /// # Errors
    /// Returns [`ChessError::EmptyLog`] if no move has been played.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        let mv = self.revert().ok_or(ChessError::EmptyLog)?;
        log::debug!("undid {mv}");
        Ok(mv)
    }

    /// Returns the legal moves for the side to move.
    ///
    /// The list is a snapshot: it is only valid until the next move is made or
    /// undone.
    pub fn valid_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Finds the legal move going from `from` to `to`.
    ///
    /// When the move is a promotion, `promotion` picks the new piece and defaults
    /// to a queen.
    /// # Errors
    /// Returns [`ChessError::IllegalMove`] if no legal move matches.
    pub fn resolve_squares(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, ChessError> {
        self.valid_moves()
            .into_iter()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && match (mv.promotion(), promotion) {
                        (None, None) => true,
                        (Some(kind), None) => kind == PieceKind::Queen,
                        (Some(kind), Some(wanted)) => kind == wanted,
                        (None, Some(_)) => false,
                    }
            })
            .ok_or_else(|| {
                let promotion = promotion.map(|kind| kind.to_string()).unwrap_or_default();
                ChessError::IllegalMove(format!("{from}{to}{promotion}"))
            })
    }

    /// Maps a move record built from two squares (see [`Move::from_board`]) onto
    /// the matching legal move, with all its flags filled in.
    /// # Errors
    /// Returns [`ChessError::IllegalMove`] if no legal move matches.
    pub fn resolve(&self, candidate: &Move) -> Result<Move, ChessError> {
        self.resolve_squares(candidate.from(), candidate.to(), candidate.promotion())
    }

    /// Resolves and plays the legal move going from `from` to `to`, returning it.
    /// # Errors
    /// Returns [`ChessError::IllegalMove`] if no legal move matches, in which case
    /// the game is left untouched.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, ChessError> {
        let mv = self.resolve_squares(from, to, promotion)?;
        self.make_move(mv)?;
        Ok(mv)
    }

    /// Checks if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        movegen::is_in_check(self)
    }

    /// Checks if the side to move has been checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate {
            winner: self.side_to_move.inverse(),
        }
    }

    /// Checks if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// Returns whether the game is over, and how.
    pub fn status(&self) -> GameStatus {
        if !self.valid_moves().is_empty() {
            GameStatus::Ongoing
        } else if self.is_in_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move.inverse(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// A copy of the game without its history, for trying moves out.
    pub(crate) fn scratch(&self) -> Self {
        Self {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            history: Vec::with_capacity(1),
        }
    }

    /// Makes a move without any verification.
    pub(crate) fn apply(&mut self, mv: Move) {
        self.history.push(HistoryEntry {
            played: mv,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        });

        self.board.take(mv.from());
        if mv.is_en_passant() {
            self.board.take(mv.capture_square());
        }
        self.board.set(mv.to(), Some(mv.placed()));
        if let Some((rook_from, rook_to)) = mv.castling_rook() {
            let rook = self.board.take(rook_from);
            self.board.set(rook_to, rook);
        }

        self.castling_rights.revoke_touching(mv.from());
        self.castling_rights.revoke_touching(mv.to());
        self.en_passant = mv.passed_square();
        self.side_to_move.invert();
    }

    /// Takes back the last move, if any.
    pub(crate) fn revert(&mut self) -> Option<Move> {
        let HistoryEntry {
            played,
            castling_rights,
            en_passant,
        } = self.history.pop()?;

        self.castling_rights = castling_rights;
        self.en_passant = en_passant;
        self.side_to_move.invert();

        if let Some((rook_from, rook_to)) = played.castling_rook() {
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }
        self.board.take(played.to());
        if let Some(captured) = played.captured() {
            self.board.set(played.capture_square(), Some(captured));
        }
        self.board.set(played.from(), Some(played.moved()));

        Some(played)
    }
}
impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.board)?;
        writeln!(f, "side to move: {}", self.side_to_move)?;
        writeln!(f, "castling rights: {}", self.castling_rights)?;
        writeln!(
            f,
            "en passant: {}",
            self.en_passant
                .map(|sq| sq.to_string())
                .unwrap_or_else(|| "-".to_string())
        )?;
        write!(f, "moves played: {}", self.history.len())
    }
}
impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::setup;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn initial_state() {
        let state = GameState::initial();
        assert_eq!(state.side_to_move(), Colour::White);
        assert_eq!(state.castling_rights(), CastlingRights::full());
        assert_eq!(state.en_passant(), None);
        assert!(state.history().is_empty());
        assert_eq!(state.status(), GameStatus::Ongoing);
    }

    #[test]
    fn make_and_undo_double_push() {
        let mut state = GameState::initial();
        let mv = state.play(sq("e2"), sq("e4"), None).unwrap();
        assert!(mv.is_double_push());
        assert_eq!(state.en_passant(), Some(sq("e3")));
        assert_eq!(state.side_to_move(), Colour::Black);
        assert_eq!(state.board().get(sq("e2")), None);
        assert_eq!(
            state.board().get(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );

        assert_eq!(state.undo_move(), Ok(mv));
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn undo_on_empty_log() {
        let mut state = GameState::initial();
        assert_eq!(state.undo_move(), Err(ChessError::EmptyLog));
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn make_rejects_empty_origin() {
        let mut state = GameState::initial();
        let ghost = Move::new_quiet(
            sq("e4"),
            sq("e5"),
            Piece::new(PieceKind::Pawn, Colour::White),
        );
        assert!(matches!(
            state.make_move(ghost),
            Err(ChessError::IllegalMove(_))
        ));
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn make_rejects_wrong_side() {
        let mut state = GameState::initial();
        let black_push = Move::new_quiet(
            sq("e7"),
            sq("e6"),
            Piece::new(PieceKind::Pawn, Colour::Black),
        );
        assert!(matches!(
            state.make_move(black_push),
            Err(ChessError::IllegalMove(_))
        ));
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn play_rejects_illegal_squares() {
        let mut state = GameState::initial();
        assert!(matches!(
            state.play(sq("e2"), sq("e5"), None),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            state.play(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
            Err(ChessError::IllegalMove(_))
        ));
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn resolve_candidate_from_two_squares() {
        let state = setup("4k3/8/8/3pP3/8/8/8/4K3 w - d6");
        let candidate = Move::from_board(sq("e5"), sq("d6"), state.board(), None).unwrap();
        assert!(!candidate.is_en_passant());
        let resolved = state.resolve(&candidate).unwrap();
        assert!(resolved.is_en_passant());
        assert_eq!(
            resolved.captured(),
            Some(Piece::new(PieceKind::Pawn, Colour::Black))
        );
    }

    #[test]
    fn en_passant_make_and_undo() {
        let mut state = setup("4k3/8/8/3pP3/8/8/8/4K3 w - d6");
        let before = state.clone();
        let mv = state.play(sq("e5"), sq("d6"), None).unwrap();
        assert!(mv.is_en_passant());
        assert_eq!(state.board().get(sq("d5")), None);
        assert_eq!(
            state.board().get(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );
        assert_eq!(state.en_passant(), None);

        state.undo_move().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut state = setup("4k3/3p4/8/4P3/8/8/8/4K3 b - -");
        state.play(sq("d7"), sq("d5"), None).unwrap();
        // White declines, black moves, and the chance is gone.
        state.play(sq("e1"), sq("f1"), None).unwrap();
        state.play(sq("e8"), sq("f8"), None).unwrap();
        assert_eq!(state.en_passant(), None);
        assert!(!state.valid_moves().iter().any(|mv| mv.is_en_passant()));
    }

    #[test]
    fn castling_moves_rook_and_undoes() {
        let mut state = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        let before = state.clone();

        let castle = state.play(Square::E1, Square::G1, None).unwrap();
        assert!(castle.is_kingside_castle());
        assert_eq!(
            state.board().get(Square::F1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(state.board().get(Square::H1), None);
        assert!(!state.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(!state.castling_rights().queenside_castle_allowed(Colour::White));
        assert!(state.castling_rights().kingside_castle_allowed(Colour::Black));

        let long = state.play(Square::E8, Square::C8, None).unwrap();
        assert!(long.is_queenside_castle());
        assert_eq!(
            state.board().get(Square::D8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );

        state.undo_move().unwrap();
        state.undo_move().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn castling_rights_never_come_back() {
        let mut state = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        state.play(Square::H1, Square::G1, None).unwrap();
        state.play(Square::A8, Square::B8, None).unwrap();
        state.play(Square::G1, Square::H1, None).unwrap();
        state.play(Square::B8, Square::A8, None).unwrap();

        assert!(!state.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(!state.castling_rights().queenside_castle_allowed(Colour::Black));
        let castles: Vec<_> = state
            .valid_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect();
        assert_eq!(castles, [Move::new_queenside_castle(Colour::White)]);
    }

    #[test]
    fn capturing_a_rook_at_home_revokes_rights() {
        let mut state = setup("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq -");
        let before = state.clone();
        let capture = state.play(sq("g2"), Square::H1, None).unwrap();
        assert_eq!(
            capture.captured(),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert!(!state.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(state.castling_rights().queenside_castle_allowed(Colour::White));

        state.undo_move().unwrap();
        assert_eq!(state, before);
        assert!(state.castling_rights().kingside_castle_allowed(Colour::White));
    }

    #[test]
    fn promotion_undo_restores_pawn() {
        let mut state = setup("1r2k3/P7/8/8/8/8/8/4K3 w - -");
        let before = state.clone();

        let mv = state.play(sq("a7"), Square::B8, Some(PieceKind::Knight)).unwrap();
        assert_eq!(
            state.board().get(Square::B8),
            Some(Piece::new(PieceKind::Knight, Colour::White))
        );
        assert_eq!(mv.moved().kind, PieceKind::Pawn);

        state.undo_move().unwrap();
        assert_eq!(state, before);
        assert_eq!(
            state.board().get(sq("a7")),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );
        assert_eq!(
            state.board().get(Square::B8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut state = setup("4k3/P7/8/8/8/8/8/4K3 w - -");
        let mv = state.play(sq("a7"), Square::A8, None).unwrap();
        assert_eq!(mv.promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn from_parts_validation() {
        let mut board = Board::empty();
        board.set(Square::E1, Some(Piece::new(PieceKind::King, Colour::White)));
        assert!(matches!(
            GameState::from_parts(board, Colour::White, CastlingRights::none(), None),
            Err(ChessError::InvalidPosition(_))
        ));

        board.set(Square::E8, Some(Piece::new(PieceKind::King, Colour::Black)));
        assert!(GameState::from_parts(board, Colour::White, CastlingRights::none(), None).is_ok());

        assert!(matches!(
            GameState::from_parts(board, Colour::White, CastlingRights::none(), Some(sq("d6"))),
            Err(ChessError::InvalidPosition(_))
        ));

        board.set(Square::A1, Some(Piece::new(PieceKind::Pawn, Colour::White)));
        assert!(matches!(
            GameState::from_parts(board, Colour::White, CastlingRights::none(), None),
            Err(ChessError::InvalidPosition(_))
        ));
    }

    #[test]
    fn status_queries() {
        let mate = setup("4k3/4Q3/4K3/8/8/8/8/8 b - -");
        assert!(mate.is_in_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());
        assert_eq!(
            mate.status(),
            GameStatus::Checkmate {
                winner: Colour::White
            }
        );

        let stalemate = setup("7k/5K2/6Q1/8/8/8/8/8 b - -");
        assert!(!stalemate.is_in_check());
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());
    }

    #[test]
    fn move_log_records_moves() {
        let mut state = GameState::initial();
        let e4 = state.play(sq("e2"), sq("e4"), None).unwrap();
        let c5 = state.play(sq("c7"), sq("c5"), None).unwrap();
        assert_eq!(state.move_log().copied().collect::<Vec<_>>(), [e4, c5]);
        assert_eq!(state.last_move(), Some(&c5));
        assert_eq!(state.history()[1].en_passant, Some(sq("e3")));
    }
}
