//! Module to implement the ledger of a chess match
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::slice::SliceIndex;
use std::ops::Index;
use log::{debug, info};
use super::clock::{Clock, SystemClock};
use super::*;

/// Labels of the pieces a match starts out with after a reset
pub const STARTING_PIECES: [&str; 10] = [
    "Ra1", "Rh1", "Ra8", "Rh8",
    "Bc1", "Bf1", "Bc8", "Bf8",
    "Ke1", "Ke8",
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The pieces in play in a match, and a log of every move made in it.
///
/// Pieces are kept under their labels (eg `Ra1`), which change as the pieces move.
#[derive(Debug)]
pub struct Match {
    pieces: BTreeMap<Label, Piece>,
    log: Vec<Move>,
    clock: Box<dyn Clock>,
}

impl Match {
    /// Creates a match with the standard starting pieces, timestamped by the system clock.
    pub fn new() -> Match {
        Match::with_clock(Box::new(SystemClock::new()))
    }

    /// Creates a match with the standard starting pieces, timestamped by `clock`.
    pub fn with_clock(clock: Box<dyn Clock>) -> Match {
        let mut game = Match {
            pieces: BTreeMap::new(),
            log: Vec::new(),
            clock,
        };
        game.reset();

        game
    }

    /// Creates a match containing exactly the given pieces, with an empty log.
    ///
    /// # Errors
    ///
    /// Returns `Error::LabelTaken` if two of the pieces share a label.
    pub fn with_pieces<I>(pieces: I, clock: Box<dyn Clock>) -> Result<Match>
        where I: IntoIterator<Item = Piece> {
        let mut map = BTreeMap::new();

        for piece in pieces {
            match map.entry(piece.label()) {
                Entry::Vacant(entry) => { entry.insert(piece); },
                Entry::Occupied(entry) => {
                    debug!("duplicate piece {}", entry.key());
                    return Err(Error::LabelTaken);
                },
            }
        }

        info!("match seeded with {} pieces", map.len());
        Ok(Match { pieces: map, log: Vec::new(), clock })
    }

    /// Puts the standard starting pieces back on the board and clears the log.
    pub fn reset(&mut self) {
        self.pieces = STARTING_PIECES.iter()
            .map(|s| s.parse::<Label>().expect("INFALLIBLE"))
            .map(|label| (label, Piece::at(label.kind(), label.square())))
            .collect();
        self.log.clear();

        info!("match reset with {} pieces", self.pieces.len());
    }

    /// Moves the piece labeled `label` to `target` and records the move in the log.
    ///
    /// On success the piece is relabeled after its new square and the move is returned.
    ///
    /// # Errors
    ///
    /// On error, neither the pieces nor the log are changed.
    ///
    /// - `Error::UnknownPieceKind` if `label` does not start with `R`, `B` or `K`.
    /// - `Error::IllegalPosition` if the rest of `label` is not a square.
    /// - `Error::NoSuchPiece` if no piece in the match has that label.
    /// - `Error::IllegalMove` if the piece cannot move to `target`.
    /// - `Error::LabelTaken` if another piece of the same kind is already on `target`.
    pub fn move_piece(&mut self, label: &str, target: &str) -> Result<Move> {
        let from: Label = label.parse()?;
        let piece = self.pieces.get(&from).ok_or(Error::NoSuchPiece)?;

        if !piece.is_legal_move(target) {
            debug!("illegal move {} to {}", from, target);
            return Err(Error::IllegalMove);
        }

        let to = Label::new(from.kind(), target.parse()?);
        if to != from && self.pieces.contains_key(&to) {
            debug!("illegal move {} to {}: {} is taken", from, target, to);
            return Err(Error::LabelTaken);
        }

        let mut piece = self.pieces.remove(&from).expect("INFALLIBLE");
        let mv = piece.move_to(target, self.clock.as_ref())?;
        self.pieces.insert(piece.label(), piece);
        self.log.push(mv);

        debug!("{:#}", mv);
        Ok(mv)
    }

    /// Returns the piece with the given label, if there is one.
    pub fn piece(&self, label: &str) -> Option<&Piece> {
        self.pieces.get(&label.parse().ok()?)
    }

    /// Returns all pieces in the match, keyed by label.
    pub fn pieces(&self) -> &BTreeMap<Label, Piece> {
        &self.pieces
    }

    /// Extracts a slice containing the entire log, oldest move first.
    pub fn log(&self) -> &[Move] {
        self.log.as_slice()
    }

    /// Returns the number of moves in the log.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns `true` if no moves have been made.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Returns an iterator over the log.
    pub fn iter(&self) -> Iter<'_> {
        self.log.iter()
    }
}

impl Default for Match {
    fn default() -> Self {
        Match::new()
    }
}

impl<I> Index<I> for Match where I: SliceIndex<[Move]> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.log[index]
    }
}

impl<'a> IntoIterator for &'a Match {
    type Item = &'a Move;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.log.iter()
    }
}

impl fmt::Display for Match {
    /// One line per logged move, each formatted as `{:#}` for `Move`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.log.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:#}", mv)?;
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Iterator over the moves in a match's log
pub type Iter<'a> = std::slice::Iter<'a, Move>;
