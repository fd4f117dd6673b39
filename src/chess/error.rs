//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Position does not name a square on the board
    IllegalPosition,
    /// The piece cannot reach the target square
    IllegalMove,
    /// Label prefix does not name a known piece kind
    UnknownPieceKind,
    /// No piece with the given label is in the match
    NoSuchPiece,
    /// Another piece already uses the label
    LabelTaken,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Display;
        use Error::*;

        match self {
            ParseError => "cannot parse string",
            IllegalPosition => "illegal position",
            IllegalMove => "illegal move",
            UnknownPieceKind => "no such piece kind",
            NoSuchPiece => "no piece with that label",
            LabelTaken => "label already in use",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod error_tests {
    use super::Error;

    #[test]
    fn display_trait_works() {
        assert_eq!(Error::IllegalPosition.to_string(), "illegal position");
        assert_eq!(Error::IllegalMove.to_string(), "illegal move");
        assert_eq!(Error::UnknownPieceKind.to_string(), "no such piece kind");
    }

    #[test]
    fn padding_is_respected() {
        assert_eq!(format!("{:>14}", Error::IllegalMove), "  illegal move");
    }
}
