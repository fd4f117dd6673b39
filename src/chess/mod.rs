//! The `chess` module implements movement rules for rooks, bishops and kings, and a ledger for
//! recording the moves made in a match.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use lazy_static::lazy_static;
use regex::Regex;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a chess piece. Only the kinds the ledger knows how to move are represented.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PieceKind {
    Rook,
    Bishop,
    King,
}

impl PieceKind {
    /// The number of piece kinds
    pub const COUNT: usize = PieceKind::King as usize + 1;

    /// Returns the letter used to prefix labels of this kind (eg `R` in `Ra1`)
    pub fn prefix(self) -> char {
        match self {
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::King => 'K',
        }
    }

    /// Returns the kind named by the label prefix `c`, or `None` if there is no such kind.
    pub fn from_prefix(c: char) -> Option<PieceKind> {
        match c {
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.prefix().to_string())
    }
}

impl FromStr for PieceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_prefix(c).ok_or(Error::UnknownPieceKind),
            _ => Err(Error::ParseError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            File::A => "a",
            File::B => "b",
            File::C => "c",
            File::D => "d",
            File::E => "e",
            File::F => "f",
            File::G => "g",
            File::H => "h",
        })
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(File::A),
            "b" => Ok(File::B),
            "c" => Ok(File::C),
            "d" => Ok(File::D),
            "e" => Ok(File::E),
            "f" => Ok(File::F),
            "g" => Ok(File::G),
            "h" => Ok(File::H),
            _   => Err(Error::IllegalPosition),
        }
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::IllegalPosition)
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&(*self as usize + 1), f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n: usize = s.parse().map_err(|_| Error::IllegalPosition)?;
        match n.checked_sub(1) {
            Some(index) => Rank::try_from(index),
            None => Err(Error::IllegalPosition),
        }
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::IllegalPosition)
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

lazy_static! {
    static ref TILE: Regex = Regex::new(r"^([a-z])(\d)$").expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Squares are written in algebraic notation (`a1` through `h8`). The zero-based column and row
/// are available through [`col`](Square::col) and [`row`](Square::row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Converts a tile in algebraic notation to a square.
    ///
    /// Returns `None` unless `tile` is exactly one file letter `a`-`h` followed by one rank
    /// digit `1`-`8`.
    ///
    /// # Example
    /// ```
    /// use chess_ledger::chess::Square;
    /// let sq = Square::from_algebraic("c2").unwrap();
    /// assert_eq!((sq.col(), sq.row()), (2, 1));
    /// assert_eq!(Square::from_algebraic("j9"), None);
    /// ```
    pub fn from_algebraic(tile: &str) -> Option<Square> {
        let caps = TILE.captures(tile)?;
        let file = caps[1].parse().ok()?;
        let rank = caps[2].parse().ok()?;

        Some(Square::from_coord(file, rank))
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        self.file
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Zero-based column, where file `a` is 0
    pub fn col(self) -> i8 {
        self.file as i8
    }

    /// Zero-based row, where rank `1` is 0
    pub fn row(self) -> i8 {
        self.rank as i8
    }

    /// Returns `(Δcol, Δrow)` going from `self` to `to`
    pub fn delta(self, to: Square) -> (i8, i8) {
        (to.col() - self.col(), to.row() - self.row())
    }

    /// Returns an iterator over all 64 squares, from `a1` to `h8` file by file.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Square::COUNT).map(|i| Square::try_from(i).expect("INFALLIBLE"))
    }
}

/// Returns `true` if `tile` names a square on the board.
pub fn is_on_board(tile: &str) -> bool {
    Square::from_algebraic(tile).is_some()
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&(self.file.to_string() + &self.rank.to_string()))
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Square::from_algebraic(s).ok_or(Error::IllegalPosition)
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            Ok(Square::from_coord(File::try_from(value >> 3)?, Rank::try_from(value & 7)?))
        } else {
            Err(Error::IllegalPosition)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        ((value.file as usize) << 3) + value.rank as usize
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
mod piece;
pub use piece::{Label, Move, Piece};

pub mod clock;
pub use clock::{Clock, SystemClock, SteppingClock};

pub mod game;
pub use game::Match;

pub mod error;
pub use error::{Error, Result};


#[cfg(test)]
mod file_tests {
    use std::convert::TryFrom;
    use super::File;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", File::A), "a");
        assert_eq!(format!("{}", File::D), "d");
        assert_eq!(format!("{}", File::H), "h");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("a".parse::<File>().unwrap(), File::A);
        assert_eq!("e".parse::<File>().unwrap(), File::E);
        assert_eq!("h".parse::<File>().unwrap(), File::H);
        assert!("x".parse::<File>().is_err());
        assert!("A".parse::<File>().is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..File::COUNT {
            assert_eq!(usize::from(File::try_from(i).unwrap()), i);
        }
        assert!(File::try_from(8).is_err());
    }
}


#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::{is_on_board, File, Rank, Square};

    #[test]
    fn every_tile_maps_to_file_index_and_rank_minus_one() {
        for (col, f) in "abcdefgh".chars().enumerate() {
            for r in 1..=8 {
                let tile = format!("{}{}", f, r);
                let sq = Square::from_algebraic(&tile).unwrap();
                assert_eq!(sq.col() as usize, col);
                assert_eq!(sq.row(), r - 1);
                assert_eq!(sq.to_string(), tile);
            }
        }
    }

    #[test]
    fn malformed_tiles_have_no_square() {
        for tile in vec![ "", "a", "1", "a0", "a9", "i1", "z5", "A1", "ax", "1a",
                          "a10", "a01", "a1x", " a1", "a-1", "aa" ] {
            assert_eq!(Square::from_algebraic(tile), None, "{:?}", tile);
            assert!(!is_on_board(tile));
        }
    }

    #[test]
    fn fromstr_trait_matches_from_algebraic() {
        assert_eq!("e4".parse::<Square>().unwrap(), Square::from_coord(File::E, Rank::R4));
        assert!("e9".parse::<Square>().is_err());
    }

    #[test]
    fn delta_is_target_minus_origin() {
        let c1 = Square::from_coord(File::C, Rank::R1);
        let a3 = Square::from_coord(File::A, Rank::R3);
        assert_eq!(c1.delta(a3), (-2, 2));
        assert_eq!(a3.delta(c1), (2, -2));
        assert_eq!(c1.delta(c1), (0, 0));
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(usize::from(s), i);
        }
        assert!(Square::try_from(Square::COUNT).is_err());
    }

    #[test]
    fn all_visits_each_square_once() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a1");
        assert_eq!(squares[63].to_string(), "h8");
    }
}
