//! # Parsing
//! Squares, pieces and coordinate moves are parsable from raw strings using the
//! standard Rust [`FromStr`](std::str::FromStr) trait.
//!
//! On top of that, these types implement the [`PartialFromStr`] trait. This
//! trait implements *parser combinators*.
//!
//! Unlike [`FromStr`](std::str::FromStr), the `Ok` variant returned by
//! [`PartialFromStr`] contains two values:
//! - The parsed value
//! - A suffix of the input that was not part of the parsed value.
//!
//! A string like "d4rest" would return `Ok((d4, "rest"))` when parsed.
//!
//! Using this parsing scheme allows the combination of parsers over a larger input
//! string more easily. For example, the string "e7e8q" is parsed as two squares
//! followed by an optional promotion kind by successive calls to `partial_from_str`.

use std::convert::Infallible;

pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}
impl<T: PartialFromStr> PartialFromStr for Option<T> {
    type Err = Infallible;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        match T::partial_from_str(s) {
            Ok((value, rest)) => Ok((Some(value), rest)),
            Err(_) => Ok((None, s)),
        }
    }
}

/// Returns the rest of the input after walking whitespace values.
pub fn walk_whitespace(src: &str) -> &str {
    src.trim_start()
}
