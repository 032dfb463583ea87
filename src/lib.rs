//! # Chess rules
//! The rules core of a chess game: it owns the board, enumerates the legal moves
//! of the side to move, makes and takes back moves, and tells when the game is
//! over by checkmate or stalemate.
//!
//! Front ends (graphical or not) only ever ask for the legal moves, submit one of
//! them and read the board back.
//! ```
//! # use chess_rules::game::state::GameState;
//! let mut game = GameState::initial();
//! assert_eq!(game.valid_moves().len(), 20);
//!
//! let e2 = "e2".parse().unwrap();
//! let e4 = "e4".parse().unwrap();
//! game.play(e2, e4, None).unwrap();
//! game.undo_move().unwrap();
//! assert_eq!(game, GameState::initial());
//! ```

pub mod game;
pub mod parsing;
