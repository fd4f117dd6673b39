//! Replays rook, bishop and king moves and prints the resulting ledger.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use clap::{App, Arg, ArgMatches, SubCommand, AppSettings, crate_version};
use log::error;
use simplelog::{WriteLogger, LevelFilter, Config};
use chess_ledger::chess::{self, SystemClock};
use chess_ledger::setup::{self, Setup, SetupError};

fn main() -> Result<(), Error> {
    let matches =
        App::new("Chess Ledger")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Records rook, bishop and king moves with the time each was made.")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("setup")
                .long("setup")
                .short("s")
                .global(true)
                .value_name("SETUP_FILE")
                .takes_value(true)
                .help("YAML file with the starting pieces and moves \
                       [default: ~/.chess-ledger/setup.yaml if it exists]"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("chess-ledger.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("replay")
                .about("Plays the setup's moves followed by the given moves, then prints the \
                        ledger")
                .arg(Arg::with_name("yaml")
                    .long("yaml")
                    .help("Prints the ledger as YAML"))
                .arg(Arg::with_name("moves")
                    .value_name("MOVE")
                    .multiple(true)
                    .help("Moves written as LABEL:TARGET (eg Ra1:a3)")))
            .subcommand(SubCommand::with_name("targets")
                .about("Lists the squares a piece may move to after the setup's moves are played")
                .arg(Arg::with_name("label")
                    .value_name("LABEL")
                    .required(true)
                    .help("Label of the piece (eg Bc1)")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("replay", Some(matches)) => {
            let mut game = read_setup(matches)?.play(Box::new(SystemClock::new()))?;

            for arg in matches.values_of("moves").into_iter().flatten() {
                let (label, target) = split_move(arg)?;
                game.move_piece(label, target).map_err(|err| {
                    error!("{}: {}", arg, err);
                    Error(format!("{}: {}", arg, err))
                })?;
            }

            if matches.is_present("yaml") {
                print!("{}", serde_yaml::to_string(game.log())?);
            } else if !game.is_empty() {
                println!("{}", game);
            }
        },
        ("targets", Some(matches)) => {
            let label = matches.value_of("label").expect("INFALLIBLE");
            let game = read_setup(matches)?.play(Box::new(SystemClock::new()))?;
            let piece = game.piece(label).ok_or_else(|| {
                Error(format!("{}: {}", label, chess::Error::NoSuchPiece))
            })?;

            let targets: Vec<_> = piece.legal_targets()
                .iter()
                .filter(|&&sq| sq != piece.position())
                .map(|sq| sq.to_string())
                .collect();
            println!("{}", targets.join(" "));
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn read_setup(matches: &ArgMatches) -> Result<Setup, Error> {
    match matches.value_of_os("setup") {
        Some(path) => Ok(Setup::read(&PathBuf::from(path))?),
        None => {
            let path = setup::default_path();
            if path.is_file() {
                Ok(Setup::read(&path)?)
            } else {
                Ok(Setup::default())
            }
        },
    }
}

fn split_move(arg: &str) -> Result<(&str, &str), Error> {
    let mut split = arg.splitn(2, ':');
    match (split.next(), split.next()) {
        (Some(label), Some(target)) => Ok((label, target)),
        _ => Err(Error(format!("{}: expected LABEL:TARGET", arg))),
    }
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<SetupError> for Error {
    fn from(err: SetupError) -> Self {
        Error(err.to_string())
    }
}

impl From<chess::Error> for Error {
    fn from(err: chess::Error) -> Self {
        Error(err.to_string())
    }
}
