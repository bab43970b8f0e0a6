// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action log shared by every worker
//!
//! One guard covers both the sequence counter and the sink, so line order in
//! the output always matches sequence order. Lines look like:
//!
//! ```text
//! 1: P: started
//! 2: N 1: started
//! 3: N 1: arrived to 0
//! 4: P: arrived to 0
//! 5: N 1: boarding
//! 6: P: leaving 0
//! ```

use crate::vehicle::{Port, VehicleId, VehicleKind};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Marker used for the ferry in the action log
pub const FERRY_MARKER: &str = "P";

/// Who performed an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Ferry,
    Vehicle(VehicleId),
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Ferry => f.write_str(FERRY_MARKER),
            Actor::Vehicle(id) => write!(f, "{}", id),
        }
    }
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Started,
    ArrivedTo(Port),
    Boarding,
    /// Vehicle disembarks at the given port
    LeavingIn(Port),
    /// Ferry departs from the given port
    Leaving(Port),
    Finish,
}

impl Action {
    pub fn port(&self) -> Option<Port> {
        match self {
            Action::ArrivedTo(port) | Action::LeavingIn(port) | Action::Leaving(port) => {
                Some(*port)
            }
            Action::Started | Action::Boarding | Action::Finish => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Started => f.write_str("started"),
            Action::ArrivedTo(port) => write!(f, "arrived to {}", port),
            Action::Boarding => f.write_str("boarding"),
            Action::LeavingIn(port) => write!(f, "leaving in {}", port),
            Action::Leaving(port) => write!(f, "leaving {}", port),
            Action::Finish => f.write_str("finish"),
        }
    }
}

/// One parsed line of the action log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRecord {
    pub sequence: u64,
    pub actor: Actor,
    pub action: Action,
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.sequence, self.actor, self.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable log line {line:?}: {reason}")]
pub struct ParseRecordError {
    pub line: String,
    pub reason: &'static str,
}

impl FromStr for ActionRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseRecordError {
            line: line.to_string(),
            reason,
        };

        let mut parts = line.trim_end().splitn(3, ": ");
        let sequence = parts
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| fail("missing sequence number"))?;
        let actor = parse_actor(parts.next().ok_or_else(|| fail("missing actor"))?)
            .ok_or_else(|| fail("unknown actor"))?;
        let action = parse_action(actor, parts.next().ok_or_else(|| fail("missing action"))?)
            .ok_or_else(|| fail("unknown action"))?;

        Ok(ActionRecord {
            sequence,
            actor,
            action,
        })
    }
}

fn parse_actor(raw: &str) -> Option<Actor> {
    if raw == FERRY_MARKER {
        return Some(Actor::Ferry);
    }
    let (marker, number) = raw.split_once(' ')?;
    let kind = VehicleKind::ALL.into_iter().find(|k| k.marker() == marker)?;
    let number = number.parse().ok()?;
    Some(Actor::Vehicle(VehicleId::new(kind, number)))
}

fn parse_action(actor: Actor, raw: &str) -> Option<Action> {
    let port = |s: &str| s.parse::<u8>().ok().and_then(Port::new);
    match (actor, raw) {
        (_, "started") => Some(Action::Started),
        (Actor::Vehicle(_), "boarding") => Some(Action::Boarding),
        (Actor::Ferry, "finish") => Some(Action::Finish),
        (_, other) => {
            if let Some(p) = other.strip_prefix("arrived to ") {
                port(p).map(Action::ArrivedTo)
            } else if let (Actor::Vehicle(_), Some(p)) = (actor, other.strip_prefix("leaving in ")) {
                port(p).map(Action::LeavingIn)
            } else if let (Actor::Ferry, Some(p)) = (actor, other.strip_prefix("leaving ")) {
                port(p).map(Action::Leaving)
            } else {
                None
            }
        }
    }
}

struct LogInner {
    sequence: u64,
    sink: Box<dyn Write + Send>,
}

/// Serialized, flushed-per-line action log
pub struct ActionLog {
    inner: Mutex<LogInner>,
}

impl ActionLog {
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            inner: Mutex::new(LogInner {
                sequence: 0,
                sink: Box::new(sink),
            }),
        }
    }

    /// Append one line and return its sequence number
    ///
    /// The counter only advances when the line was written and flushed.
    pub fn record(&self, actor: Actor, action: Action) -> io::Result<u64> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let record = ActionRecord {
            sequence: inner.sequence + 1,
            actor,
            action,
        };
        writeln!(inner.sink, "{}", record)?;
        inner.sink.flush()?;
        inner.sequence = record.sequence;
        Ok(record.sequence)
    }

    /// Number of lines written so far
    pub fn len(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).sequence
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory sink whose contents stay readable after it is handed to a log
#[derive(Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
