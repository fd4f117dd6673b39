//! Pieces, their movement rules and the moves they make
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use serde::{Serialize, Deserialize};
use super::clock::{Clock, Timestamp};
use super::*;

impl PieceKind {
    /// Returns true if a piece of this kind standing on `from` may move to `to`.
    ///
    /// Only the geometry of the move is considered; other pieces never block a move.
    pub fn is_legal(self, from: Square, to: Square) -> bool {
        let (dc, dr) = from.delta(to);

        match self {
            PieceKind::Rook => dc == 0 || dr == 0,
            PieceKind::Bishop => dc.abs() == dr.abs(),
            PieceKind::King => dc.abs().max(dr.abs()) == 1,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece kind together with the square it stands on, written with the kind's prefix followed by
/// the square, eg `Ra1` or `Ke8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Label {
    kind: PieceKind,
    square: Square,
}

impl Label {
    /// Creates a new label
    pub fn new(kind: PieceKind, square: Square) -> Label {
        Label { kind, square }
    }

    /// The kind named by the label's prefix
    pub fn kind(self) -> PieceKind {
        self.kind
    }

    /// The square named after the prefix
    pub fn square(self) -> Square {
        self.square
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}{}", self.kind, self.square))
    }
}

impl FromStr for Label {
    type Err = Error;

    /// Parses a label.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPieceKind` if the string is empty or its first character is not a
    /// known prefix, and `Error::IllegalPosition` if the rest of the string is not a square.
    fn from_str(s: &str) -> Result<Label> {
        let mut chars = s.chars();
        let kind = chars.next()
            .and_then(PieceKind::from_prefix)
            .ok_or(Error::UnknownPieceKind)?;
        let square = chars.as_str().parse()?;

        Ok(Label { kind, square })
    }
}

impl TryFrom<String> for Label {
    type Error = Error;

    fn try_from(s: String) -> Result<Label> {
        s.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> String {
        label.to_string()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move which has been made, along with when it was made
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    from: Label,
    to: Label,
    timestamp: Timestamp,
}

impl Move {
    /// Label of the piece before the move
    pub fn from(&self) -> Label {
        self.from
    }

    /// Label of the piece after the move
    pub fn to(&self) -> Label {
        self.to
    }

    /// When the move was made
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl fmt::Display for Move {
    /// The move is formatted as follows:
    ///
    /// "{}" -- Origin and destination labels (eg Ra1 Ra3)
    ///
    /// "{:#}" -- Followed by the timestamp in RFC 3339 format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.pad(&format!("{} {} {}", self.from, self.to, self.timestamp.to_rfc3339()))
        } else {
            f.pad(&format!("{} {}", self.from, self.to))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A rook, bishop or king, along with every move it has made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    position: Square,
    history: Vec<Move>,
}

impl Piece {
    /// Places a new piece of the given kind on `position`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalPosition` if `position` is not a square on the board.
    pub fn new(kind: PieceKind, position: &str) -> Result<Piece> {
        Ok(Piece::at(kind, position.parse()?))
    }

    /// Places a new piece of the given kind on `square`.
    pub fn at(kind: PieceKind, square: Square) -> Piece {
        Piece { kind, position: square, history: Vec::new() }
    }

    /// The kind of piece
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The square the piece currently stands on
    pub fn position(&self) -> Square {
        self.position
    }

    /// The label the piece currently goes by
    pub fn label(&self) -> Label {
        Label::new(self.kind, self.position)
    }

    /// Every move the piece has made, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns true if the piece may move to `target`. A target which is not a square on the
    /// board is never legal.
    pub fn is_legal_move(&self, target: &str) -> bool {
        match Square::from_algebraic(target) {
            Some(to) => self.kind.is_legal(self.position, to),
            None => false,
        }
    }

    /// Returns every square the piece may move to.
    pub fn legal_targets(&self) -> Vec<Square> {
        Square::all().filter(|&to| self.kind.is_legal(self.position, to)).collect()
    }

    /// Moves the piece to `target`, recording the move in its history.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove`, leaving the piece untouched, if `target` is not a square the
    /// piece can reach.
    pub fn move_to(&mut self, target: &str, clock: &dyn Clock) -> Result<Move> {
        let to = match Square::from_algebraic(target) {
            Some(to) if self.kind.is_legal(self.position, to) => to,
            _ => return Err(Error::IllegalMove),
        };

        let mv = Move {
            from: self.label(),
            to: Label::new(self.kind, to),
            timestamp: clock.now(),
        };
        self.history.push(mv);
        self.position = to;

        Ok(mv)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.label(), f)
    }
}

#[cfg(test)]
mod legality_tests {
    use super::*;

    fn pairs() -> impl Iterator<Item = (Square, Square)> {
        Square::all().flat_map(|from| Square::all().map(move |to| (from, to)))
    }

    #[test]
    fn rook_moves_along_files_and_ranks() {
        for (from, to) in pairs() {
            let expected = from.col() == to.col() || from.row() == to.row();
            assert_eq!(PieceKind::Rook.is_legal(from, to), expected, "R{}-{}", from, to);
        }
    }

    #[test]
    fn bishop_moves_along_diagonals() {
        for (from, to) in pairs() {
            let (dc, dr) = from.delta(to);
            let expected = dc.abs() == dr.abs();
            assert_eq!(PieceKind::Bishop.is_legal(from, to), expected, "B{}-{}", from, to);
        }
    }

    #[test]
    fn king_moves_one_step() {
        for (from, to) in pairs() {
            let (dc, dr) = from.delta(to);
            let expected = dc.abs() <= 1 && dr.abs() <= 1 && (dc, dr) != (0, 0);
            assert_eq!(PieceKind::King.is_legal(from, to), expected, "K{}-{}", from, to);
        }
    }

    #[test]
    fn standing_still() {
        let d4: Square = "d4".parse().unwrap();
        assert!(PieceKind::Rook.is_legal(d4, d4));
        assert!(PieceKind::Bishop.is_legal(d4, d4));
        assert!(!PieceKind::King.is_legal(d4, d4));
    }

    #[test]
    fn legal_target_counts_from_a_corner() {
        // counts include the corner itself for rook and bishop
        assert_eq!(Piece::new(PieceKind::Rook, "a1").unwrap().legal_targets().len(), 15);
        assert_eq!(Piece::new(PieceKind::Bishop, "a1").unwrap().legal_targets().len(), 8);
        assert_eq!(Piece::new(PieceKind::King, "a1").unwrap().legal_targets().len(), 3);
    }
}


#[cfg(test)]
mod piece_tests {
    use chrono::Duration;
    use super::*;
    use crate::chess::clock::SteppingClock;

    fn clock() -> SteppingClock {
        SteppingClock::new("2020-03-01T12:00:00Z".parse().unwrap(), Duration::seconds(1))
    }

    #[test]
    fn construction_requires_a_square() {
        assert!(Piece::new(PieceKind::Rook, "a1").is_ok());
        assert_eq!(Piece::new(PieceKind::Rook, "j9"), Err(Error::IllegalPosition));
        assert_eq!(Piece::new(PieceKind::King, ""), Err(Error::IllegalPosition));
    }

    #[test]
    fn is_legal_move_rejects_tiles_off_the_board() {
        let rook = Piece::new(PieceKind::Rook, "a1").unwrap();
        assert!(rook.is_legal_move("a5"));
        assert!(!rook.is_legal_move("b3"));
        assert!(!rook.is_legal_move("a9"));
        assert!(!rook.is_legal_move("j1"));
        assert!(!rook.is_legal_move(""));
    }

    #[test]
    fn legal_move_is_recorded() {
        let clock = clock();
        let mut rook = Piece::new(PieceKind::Rook, "a1").unwrap();
        let mv = rook.move_to("a3", &clock).unwrap();

        assert_eq!(mv.from().to_string(), "Ra1");
        assert_eq!(mv.to().to_string(), "Ra3");
        assert_eq!(mv.timestamp(), "2020-03-01T12:00:00Z".parse::<Timestamp>().unwrap());
        assert_eq!(rook.position().to_string(), "a3");
        assert_eq!(rook.history(), &[mv]);
    }

    #[test]
    fn illegal_move_changes_nothing() {
        let clock = clock();
        let mut bishop = Piece::new(PieceKind::Bishop, "c1").unwrap();
        let before = bishop.clone();

        assert_eq!(bishop.move_to("c3", &clock), Err(Error::IllegalMove));
        assert_eq!(bishop.move_to("z3", &clock), Err(Error::IllegalMove));
        assert_eq!(bishop, before);
    }

    #[test]
    fn history_accumulates_in_order() {
        let clock = clock();
        let mut king = Piece::new(PieceKind::King, "e1").unwrap();
        king.move_to("e2", &clock).unwrap();
        king.move_to("f3", &clock).unwrap();
        assert!(king.move_to("f5", &clock).is_err());
        king.move_to("e3", &clock).unwrap();

        let moves: Vec<_> = king.history().iter().map(|mv| mv.to_string()).collect();
        assert_eq!(moves, vec![ "Ke1 Ke2", "Ke2 Kf3", "Kf3 Ke3" ]);
        assert!(king.history()[0].timestamp() < king.history()[2].timestamp());
    }

    #[test]
    fn alternate_display_includes_timestamp() {
        let clock = clock();
        let mut king = Piece::new(PieceKind::King, "e8").unwrap();
        let mv = king.move_to("d7", &clock).unwrap();
        assert_eq!(format!("{:#}", mv), "Ke8 Kd7 2020-03-01T12:00:00+00:00");
    }
}
