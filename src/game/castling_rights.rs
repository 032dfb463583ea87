//! # Representation of castling rights

use std::str::FromStr;

use super::{colour::Colour, square::Square};

/// The four castling permissions (white/black, kingside/queenside).
///
/// Rights are only ever removed during a game: once the king or a rook has
/// left its home square, or a rook has been captured there, the corresponding
/// right is gone for good.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Checks if no one can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::KINGSIDE_BLACK != 0
        } else {
            self.0 & Self::KINGSIDE_WHITE != 0
        }
    }
    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::QUEENSIDE_BLACK != 0
        } else {
            self.0 & Self::QUEENSIDE_WHITE != 0
        }
    }

    /// Allows kingside castling for a given side.
    pub fn allow_kingside_castle(&mut self, colour: Colour) {
        self.0 |= if colour.is_black() {
            Self::KINGSIDE_BLACK
        } else {
            Self::KINGSIDE_WHITE
        }
    }
    /// Allows queenside castling for a given side.
    pub fn allow_queenside_castle(&mut self, colour: Colour) {
        self.0 |= if colour.is_black() {
            Self::QUEENSIDE_BLACK
        } else {
            Self::QUEENSIDE_WHITE
        }
    }

    /// Disallows kingside castling for a given side.
    #[inline(always)]
    pub fn disallow_kingside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::KINGSIDE_BLACK
        } else {
            !Self::KINGSIDE_WHITE
        }
    }
    /// Disallows queenside castling for a given side.
    #[inline(always)]
    pub fn disallow_queenside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::QUEENSIDE_BLACK
        } else {
            !Self::QUEENSIDE_WHITE
        }
    }
    /// Disallows castling for a given side.
    pub fn disallow(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !(Self::QUEENSIDE_BLACK | Self::KINGSIDE_BLACK)
        } else {
            !(Self::QUEENSIDE_WHITE | Self::KINGSIDE_WHITE)
        }
    }

    /// Removes the rights tied to a square a move leaves from or lands on.
    ///
    /// Moving the king off e1/e8 loses both rights of that side, while anything
    /// touching a corner (the rook leaving, or being captured) loses the right on
    /// that wing.
    pub fn revoke_touching(&mut self, square: Square) {
        match square {
            Square::E1 => self.disallow(Colour::White),
            Square::A1 => self.disallow_queenside_castle(Colour::White),
            Square::H1 => self.disallow_kingside_castle(Colour::White),
            Square::E8 => self.disallow(Colour::Black),
            Square::A8 => self.disallow_queenside_castle(Colour::Black),
            Square::H8 => self.disallow_kingside_castle(Colour::Black),
            _ => (),
        }
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        Self::full()
    }
}
impl FromStr for CastlingRights {
    type Err = ();

    /// Parses rights written as in FEN: `-`, or any of `KQkq`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::none());
        }
        if s.is_empty() {
            return Err(());
        }

        let mut rights = Self::none();
        for c in s.chars() {
            match c {
                'K' => rights.allow_kingside_castle(Colour::White),
                'Q' => rights.allow_queenside_castle(Colour::White),
                'k' => rights.allow_kingside_castle(Colour::Black),
                'q' => rights.allow_queenside_castle(Colour::Black),
                _ => return Err(()),
            }
        }
        Ok(rights)
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}
