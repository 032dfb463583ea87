//! Move log entries, everything needed to take a move back.

use super::{action::Move, castling_rights::CastlingRights, square::Square};

/// Records a played move along with the irreversible information that is lost
/// when making it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub played: Move,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}
