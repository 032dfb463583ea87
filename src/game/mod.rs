//! # Chess rules
//! This module contains everything about the rules of chess: the board, moves,
//! their generation and the state of a game.

pub mod action;
pub mod board;
pub mod castling_rights;
pub mod colour;
pub mod error;
pub mod history;
pub mod movegen;
pub mod notation;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod square;
pub mod state;
