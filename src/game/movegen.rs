//! Move generation.
//!
//! Moves are first generated pseudo-legally, following each piece's movement
//! pattern and the occupancy of the board. The legality filter then tries each
//! candidate on a scratch copy of the game and drops the ones leaving the
//! mover's king attacked.

use super::{
    action::Move,
    board::Board,
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Delta, Square},
    state::GameState,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so a fixed-size buffer is
/// enough and avoids heap allocations during move generation.
pub type MoveList = heapless::Vec<Move, 256>;

#[inline(always)]
fn push(moves: &mut MoveList, mv: Move) {
    let pushed = moves.push(mv);
    debug_assert!(pushed.is_ok(), "move list overflow");
}

/// Checks whether any piece of colour `by` attacks `square`.
///
/// This looks outwards from the square for each kind of attacker instead of
/// generating every opponent move. Unlike pawn moves, pawn attacks are counted
/// even when the attacked square is empty, which is what castling needs.
pub fn is_square_attacked(board: &Board, square: Square, by: Colour) -> bool {
    let is = |sq: Option<Square>, kind: PieceKind| {
        sq.and_then(|sq| board.get(sq)) == Some(Piece::new(kind, by))
    };

    // A pawn attacks diagonally forward, so it sits one row "behind" its target.
    if is(square.offset(-by.forward(), -1), PieceKind::Pawn)
        || is(square.offset(-by.forward(), 1), PieceKind::Pawn)
    {
        return true;
    }

    if Delta::KNIGHT_DELTAS
        .iter()
        .any(|&d| is(square.translate(d), PieceKind::Knight))
    {
        return true;
    }

    if Delta::QUEEN_DELTAS
        .iter()
        .any(|&d| is(square.translate(d), PieceKind::King))
    {
        return true;
    }

    let slider_attacks = |deltas: &[Delta], is_slider: fn(PieceKind) -> bool| {
        deltas.iter().any(|&delta| {
            let mut current = square;
            while let Some(next) = current.translate(delta) {
                match board.get(next) {
                    None => current = next,
                    Some(piece) => return piece.colour == by && is_slider(piece.kind),
                }
            }
            false
        })
    };
    slider_attacks(&Delta::ORTHOGONAL_DELTAS, PieceKind::is_orthogonal_slider)
        || slider_attacks(&Delta::DIAGONAL_DELTAS, PieceKind::is_diagonal_slider)
}

/// Checks if the side to move has its king attacked.
pub fn is_in_check(state: &GameState) -> bool {
    let us = state.side_to_move();
    state
        .board()
        .king_square(us)
        .is_some_and(|king| is_square_attacked(state.board(), king, us.inverse()))
}

/// Generates every move the side to move could make, without checking whether
/// it leaves its own king in check.
pub fn pseudo_legal_moves(state: &GameState) -> MoveList {
    let us = state.side_to_move();
    let board = state.board();
    let mut moves = MoveList::new();

    for (from, piece) in board.pieces().filter(|(_, piece)| piece.colour == us) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(state, from, piece, &mut moves),
            PieceKind::Knight => step_moves(board, from, piece, &Delta::KNIGHT_DELTAS, &mut moves),
            PieceKind::Bishop => {
                slide_moves(board, from, piece, &Delta::DIAGONAL_DELTAS, &mut moves)
            }
            PieceKind::Rook => {
                slide_moves(board, from, piece, &Delta::ORTHOGONAL_DELTAS, &mut moves)
            }
            PieceKind::Queen => slide_moves(board, from, piece, &Delta::QUEEN_DELTAS, &mut moves),
            PieceKind::King => {
                step_moves(board, from, piece, &Delta::QUEEN_DELTAS, &mut moves);
                castling_moves(state, from, &mut moves)
            }
        }
    }

    moves
}

/// Generates the moves of the side to move that do not leave its own king in
/// check.
///
/// Each candidate is made then unmade on a scratch copy of `state`, so the
/// state itself is never touched.
pub fn legal_moves(state: &GameState) -> MoveList {
    let us = state.side_to_move();
    let them = us.inverse();
    let Some(own_king) = state.board().king_square(us) else {
        return MoveList::new();
    };
    let mut scratch = state.scratch();

    pseudo_legal_moves(state)
        .into_iter()
        .filter(|mv| {
            if mv.is_castle() {
                let passing = Square::from_coords(
                    mv.from().row(),
                    (mv.from().col() + mv.to().col()) / 2,
                );
                if is_square_attacked(state.board(), passing, them) {
                    log::trace!("rejecting {mv}: castling through an attacked square");
                    return false;
                }
            }

            let king = if mv.moved().kind == PieceKind::King {
                mv.to()
            } else {
                own_king
            };
            scratch.apply(*mv);
            let legal = !is_square_attacked(scratch.board(), king, them);
            scratch.revert();

            if !legal {
                log::trace!("rejecting {mv}: leaves the king in check");
            }
            legal
        })
        .collect()
}

fn pawn_moves(state: &GameState, from: Square, pawn: Piece, moves: &mut MoveList) {
    let board = state.board();
    let us = pawn.colour;
    let forward = us.forward();
    let promotes = |to: Square| to.row() == us.promotion_row();

    if let Some(to) = from.offset(forward, 0).filter(|&to| board.is_empty(to)) {
        if promotes(to) {
            for mv in Move::new_promotions(from, to, pawn, None) {
                push(moves, mv)
            }
        } else {
            push(moves, Move::new_quiet(from, to, pawn));

            if from.row() == us.pawn_row() {
                if let Some(double) = to.offset(forward, 0).filter(|&sq| board.is_empty(sq)) {
                    push(moves, Move::new_double_push(from, double, pawn))
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(to) = from.offset(forward, side) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.colour != us => {
                if promotes(to) {
                    for mv in Move::new_promotions(from, to, pawn, Some(target)) {
                        push(moves, mv)
                    }
                } else {
                    push(moves, Move::new_capture(from, to, pawn, target))
                }
            }
            None if state.en_passant() == Some(to) => {
                // The pawn being taken stands beside us, not on the target square.
                let beside = Square::from_coords(from.row(), to.col());
                let enemy_pawn = Piece::new(PieceKind::Pawn, us.inverse());
                if board.get(beside) == Some(enemy_pawn) {
                    push(moves, Move::new_en_passant(from, to, pawn, enemy_pawn))
                }
            }
            _ => (),
        }
    }
}

/// Knight and king moves: a single step along each delta.
fn step_moves(board: &Board, from: Square, piece: Piece, deltas: &[Delta], moves: &mut MoveList) {
    for to in deltas.iter().filter_map(|&d| from.translate(d)) {
        match board.get(to) {
            None => push(moves, Move::new_quiet(from, to, piece)),
            Some(target) if target.colour != piece.colour => {
                push(moves, Move::new_capture(from, to, piece, target))
            }
            Some(_) => (),
        }
    }
}

/// Bishop, rook and queen moves: slides along each delta until blocked.
fn slide_moves(board: &Board, from: Square, piece: Piece, deltas: &[Delta], moves: &mut MoveList) {
    for &delta in deltas {
        let mut current = from;
        while let Some(to) = current.translate(delta) {
            match board.get(to) {
                None => {
                    push(moves, Move::new_quiet(from, to, piece));
                    current = to
                }
                Some(target) => {
                    if target.colour != piece.colour {
                        push(moves, Move::new_capture(from, to, piece, target))
                    }
                    break;
                }
            }
        }
    }
}

/// Castling moves for the king standing on `from`.
///
/// Requires the right to be held, the rook on its corner, empty squares in
/// between and the king not in check. Whether the squares the king crosses are
/// attacked is left to the legality filter.
fn castling_moves(state: &GameState, from: Square, moves: &mut MoveList) {
    let board = state.board();
    let us = state.side_to_move();
    let row = us.back_row();
    if from != Square::from_coords(row, 4) {
        return;
    }

    let rook = Some(Piece::new(PieceKind::Rook, us));
    let empty = |cols: &[u8]| {
        cols.iter()
            .all(|&col| board.is_empty(Square::from_coords(row, col)))
    };
    let kingside = state.castling_rights().kingside_castle_allowed(us)
        && board.get(Square::from_coords(row, 7)) == rook
        && empty(&[5, 6]);
    let queenside = state.castling_rights().queenside_castle_allowed(us)
        && board.get(Square::from_coords(row, 0)) == rook
        && empty(&[1, 2, 3]);

    if !(kingside || queenside) || is_square_attacked(board, from, us.inverse()) {
        return;
    }
    if kingside {
        push(moves, Move::new_kingside_castle(us))
    }
    if queenside {
        push(moves, Move::new_queenside_castle(us))
    }
}
