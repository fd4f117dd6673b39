//! Reading match setups from YAML files.
//!
//! A setup lists the pieces to start with and the moves to play, eg:
//!
//! ```yaml
//! pieces: [Ra1, Bc1, Ke1]
//! moves:
//!   - [Ra1, a4]
//!   - [Ke1, d2]
//! ```
//!
//! When `pieces` is left out the match starts with the standard pieces.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::chess::{self, Clock, Label, Match, Piece};

/// The file a setup is read from when none is given
pub const DEFAULT_FILE_NAME: &str = "setup.yaml";

/// Returns the directory holding the default setup, `~/.chess-ledger`, or the current directory if
/// there is no home directory.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| { home.join(".chess-ledger") })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the path of the default setup file
pub fn default_path() -> PathBuf {
    app_dir().join(DEFAULT_FILE_NAME)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The starting pieces and moves of a match
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    /// Labels of the starting pieces, or `None` for the standard pieces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces: Option<Vec<Label>>,
    /// Moves to play, as `[label, target]` pairs
    pub moves: Vec<(String, String)>,
}

impl Setup {
    /// Parses a setup from a YAML string.
    pub fn from_yaml(s: &str) -> Result<Setup, SetupError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reads a setup from a YAML file.
    pub fn read(path: &Path) -> Result<Setup, SetupError> {
        let s = read_to_string(path).map_err(|err| SetupError::Io(path.to_owned(), err))?;
        Setup::from_yaml(&s)
    }

    /// Formats the setup as YAML.
    pub fn to_yaml(&self) -> Result<String, SetupError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Creates a match holding the setup's starting pieces. The setup's moves are not played.
    pub fn start(&self, clock: Box<dyn Clock>) -> chess::Result<Match> {
        match &self.pieces {
            Some(labels) => Match::with_pieces(
                labels.iter().map(|label| Piece::at(label.kind(), label.square())),
                clock),
            None => Ok(Match::with_clock(clock)),
        }
    }

    /// Creates a match from the setup and plays all of the setup's moves.
    ///
    /// # Errors
    ///
    /// Stops at the first move which fails, returning its index along with the error.
    pub fn play(&self, clock: Box<dyn Clock>) -> Result<Match, SetupError> {
        let mut game = self.start(clock).map_err(SetupError::Pieces)?;

        for (i, (label, target)) in self.moves.iter().enumerate() {
            game.move_piece(label, target).map_err(|err| SetupError::Move(i, err))?;
        }

        Ok(game)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Errors which can occur while reading or playing a setup
#[derive(Debug)]
pub enum SetupError {
    /// The setup file couldn't be read
    Io(PathBuf, io::Error),
    /// The setup isn't valid YAML or doesn't have the expected shape
    Yaml(serde_yaml::Error),
    /// The starting pieces couldn't be placed
    Pieces(chess::Error),
    /// The move at the given index failed
    Move(usize, chess::Error),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            SetupError::Yaml(err) => write!(f, "setup: {}", err),
            SetupError::Pieces(err) => write!(f, "setup pieces: {}", err),
            SetupError::Move(i, err) => write!(f, "setup move {}: {}", i + 1, err),
        }
    }
}

impl std::error::Error for SetupError { }

impl From<serde_yaml::Error> for SetupError {
    fn from(err: serde_yaml::Error) -> Self {
        SetupError::Yaml(err)
    }
}

#[cfg(test)]
mod setup_tests {
    use chrono::Duration;
    use crate::chess::{Error, SteppingClock};
    use super::*;

    fn clock() -> Box<dyn Clock> {
        Box::new(SteppingClock::new("2020-03-01T12:00:00Z".parse().unwrap(), Duration::seconds(1)))
    }

    #[test]
    fn empty_setup_uses_standard_pieces() {
        let setup = Setup::from_yaml("{}").unwrap();
        assert_eq!(setup, Setup::default());
        assert_eq!(setup.play(clock()).unwrap().pieces().len(), 10);
    }

    #[test]
    fn pieces_and_moves_are_read() {
        let setup = Setup::from_yaml("pieces: [Ra1, Ke1]\nmoves:\n  - [Ra1, a4]\n  - [Ke1, d2]\n")
            .unwrap();
        let game = setup.play(clock()).unwrap();

        assert_eq!(game.len(), 2);
        let labels: Vec<_> = game.pieces().keys().map(|label| label.to_string()).collect();
        assert_eq!(labels, vec![ "Ra4", "Kd2" ]);
    }

    #[test]
    fn bad_labels_are_rejected() {
        assert!(matches!(Setup::from_yaml("pieces: [Qd1]"), Err(SetupError::Yaml(_))));
        assert!(matches!(Setup::from_yaml("pieces: [Ra1, Ra1]").unwrap().play(clock()),
            Err(SetupError::Pieces(Error::LabelTaken))));
    }

    #[test]
    fn failing_move_is_reported_with_its_index() {
        let setup = Setup::from_yaml("moves:\n  - [Ra1, a3]\n  - [Bc1, c3]\n").unwrap();
        match setup.play(clock()) {
            Err(err @ SetupError::Move(1, Error::IllegalMove)) => {
                assert_eq!(err.to_string(), "setup move 2: illegal move");
            },
            other => panic!("unexpected result: {:?}", other.map(|game| game.len())),
        }
    }

    #[test]
    fn yaml_round_trips() {
        let setup = Setup {
            pieces: Some(vec![ "Bf8".parse().unwrap() ]),
            moves: vec![ ("Bf8".to_owned(), "a3".to_owned()) ],
        };
        assert_eq!(Setup::from_yaml(&setup.to_yaml().unwrap()).unwrap(), setup);
    }

    #[test]
    fn default_path_ends_with_file_name() {
        assert!(default_path().ends_with(DEFAULT_FILE_NAME));
    }
}
