//! Sources of timestamps for recorded moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::cell::Cell;
use std::fmt;
use chrono::{DateTime, Duration, Utc};

/// The point in time at which a move was made
pub type Timestamp = DateTime<Utc>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Something which can tell the current time.
///
/// Successive calls on the same clock must never go backwards.
pub trait Clock: fmt::Debug {
    /// Returns the current time
    fn now(&self) -> Timestamp;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The system's wall clock.
///
/// If the wall clock is set back while in use, the last time handed out is repeated until the
/// wall clock catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Cell<Option<Timestamp>>,
}

impl SystemClock {
    /// Creates a new `SystemClock`
    pub fn new() -> SystemClock {
        SystemClock::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = match self.last.get() {
            Some(last) => last.max(Utc::now()),
            None => Utc::now(),
        };
        self.last.set(Some(now));

        now
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A clock which starts at a fixed time and advances by a fixed step every time it is read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<Timestamp>,
    step: Duration,
}

impl SteppingClock {
    /// Creates a clock whose first reading is `start`, with each later reading `step` after the
    /// one before. A negative `step` is treated as zero.
    pub fn new(start: Timestamp, step: Duration) -> SteppingClock {
        SteppingClock {
            next: Cell::new(start),
            step: step.max(Duration::zero()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let now = self.next.get();
        self.next.set(now + self.step);

        now
    }
}
