// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-run audit of an action log transcript
//!
//! Replays a finished log and reports every broken rule instead of stopping
//! at the first one.

use crate::config::SimConfig;
use crate::log::{Action, ActionRecord, Actor, ParseRecordError};
use crate::vehicle::{Port, VehicleId, VehicleKind};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("line {line}: {error}")]
    Unparseable { line: usize, error: ParseRecordError },
    #[error("sequence {found} where {expected} was expected")]
    SequenceGap { expected: u64, found: u64 },
    #[error("unknown vehicle {0}")]
    UnknownVehicle(VehicleId),
    #[error("{vehicle}: {action} out of order")]
    OutOfOrder { vehicle: VehicleId, action: String },
    #[error("{vehicle} never logged {missing}")]
    Incomplete {
        vehicle: VehicleId,
        missing: &'static str,
    },
    #[error("{vehicle} left in port {port}, where it arrived")]
    SamePort { vehicle: VehicleId, port: Port },
    #[error("{vehicle} boarded while the ferry was not docked at its port")]
    BoardedElsewhere { vehicle: VehicleId },
    #[error("{vehicle} disembarked at port {port} while the ferry was not docked there")]
    DisembarkedUndocked { vehicle: VehicleId, port: Port },
    #[error("{vehicle} disembarked at port {port} after boarding had started")]
    DisembarkAfterBoarding { vehicle: VehicleId, port: Port },
    #[error("ferry left port {port} carrying {weight} units over capacity {capacity}")]
    Overloaded { port: Port, weight: u32, capacity: u32 },
    #[error("ferry {action} at port {found}, expected port {expected}")]
    FerryPort {
        action: &'static str,
        expected: Port,
        found: Port,
    },
    #[error("ferry never logged started")]
    NoStart,
    #[error("ferry never logged finish")]
    NoFinish,
    #[error("ferry finish is not the last line")]
    FinishNotLast,
}

/// Vehicle progress: index of the last logged step
const STEPS: [&str; 4] = ["started", "arrived to", "boarding", "leaving in"];

#[derive(Default)]
struct VehicleTrack {
    steps_done: usize,
    origin: Option<Port>,
}

struct Dock {
    port: Port,
    weight: u32,
    boarding_started: bool,
}

struct Auditor<'a> {
    config: &'a SimConfig,
    violations: Vec<Violation>,
    vehicles: HashMap<VehicleId, VehicleTrack>,
    /// Where the ferry is expected to arrive next
    next_port: Port,
    docked: Option<Dock>,
    started: bool,
    finished_at: Option<u64>,
    last_sequence: u64,
}

impl<'a> Auditor<'a> {
    fn new(config: &'a SimConfig) -> Self {
        Self {
            config,
            violations: Vec::new(),
            vehicles: HashMap::new(),
            next_port: Port::WEST,
            docked: None,
            started: false,
            finished_at: None,
            last_sequence: 0,
        }
    }

    fn known(&self, id: VehicleId) -> bool {
        let limit = match id.kind {
            VehicleKind::Truck => self.config.num_trucks,
            VehicleKind::Car => self.config.num_cars,
        };
        (1..=limit).contains(&id.number)
    }

    fn observe(&mut self, record: ActionRecord) {
        let expected = self.last_sequence + 1;
        if record.sequence != expected {
            self.violations.push(Violation::SequenceGap {
                expected,
                found: record.sequence,
            });
        }
        self.last_sequence = record.sequence;

        match record.actor {
            Actor::Ferry => self.ferry(record.action),
            Actor::Vehicle(id) => self.vehicle(id, record.action),
        }
    }

    fn ferry(&mut self, action: Action) {
        match action {
            Action::ArrivedTo(port) => {
                if port != self.next_port {
                    self.violations.push(Violation::FerryPort {
                        action: "arrived",
                        expected: self.next_port,
                        found: port,
                    });
                }
                self.next_port = port.opposite();
                self.docked = Some(Dock {
                    port,
                    weight: 0,
                    boarding_started: false,
                });
            }
            Action::Leaving(port) => {
                if let Some(dock) = self.docked.take() {
                    if dock.port != port {
                        self.violations.push(Violation::FerryPort {
                            action: "left",
                            expected: dock.port,
                            found: port,
                        });
                    }
                    if dock.weight > self.config.capacity {
                        self.violations.push(Violation::Overloaded {
                            port,
                            weight: dock.weight,
                            capacity: self.config.capacity,
                        });
                    }
                }
            }
            Action::Finish => {
                if self.finished_at.is_none() {
                    self.finished_at = Some(self.last_sequence);
                }
            }
            Action::Started => self.started = true,
            Action::Boarding | Action::LeavingIn(_) => {}
        }
    }

    fn vehicle(&mut self, id: VehicleId, action: Action) {
        if !self.known(id) {
            self.violations.push(Violation::UnknownVehicle(id));
            return;
        }

        let step = match action {
            Action::Started => 0,
            Action::ArrivedTo(_) => 1,
            Action::Boarding => 2,
            Action::LeavingIn(_) => 3,
            Action::Leaving(_) | Action::Finish => return,
        };
        let track = self.vehicles.entry(id).or_default();
        if step != track.steps_done {
            self.violations.push(Violation::OutOfOrder {
                vehicle: id,
                action: action.to_string(),
            });
            return;
        }
        track.steps_done += 1;
        let origin = track.origin;

        match action {
            Action::ArrivedTo(port) => track.origin = Some(port),
            Action::Boarding => match self.docked.as_mut() {
                Some(dock) if Some(dock.port) == origin => {
                    dock.weight += id.kind.weight();
                    dock.boarding_started = true;
                }
                _ => self.violations.push(Violation::BoardedElsewhere { vehicle: id }),
            },
            Action::LeavingIn(port) => {
                if Some(port) == origin {
                    self.violations.push(Violation::SamePort { vehicle: id, port });
                }
                match &self.docked {
                    Some(dock) if dock.port == port => {
                        if dock.boarding_started {
                            self.violations
                                .push(Violation::DisembarkAfterBoarding { vehicle: id, port });
                        }
                    }
                    _ => self
                        .violations
                        .push(Violation::DisembarkedUndocked { vehicle: id, port }),
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Violation> {
        let kinds = [
            (VehicleKind::Truck, self.config.num_trucks),
            (VehicleKind::Car, self.config.num_cars),
        ];
        for (kind, count) in kinds {
            for number in 1..=count {
                let id = VehicleId::new(kind, number);
                let done = self.vehicles.get(&id).map_or(0, |t| t.steps_done);
                if done < STEPS.len() {
                    self.violations.push(Violation::Incomplete {
                        vehicle: id,
                        missing: STEPS[done],
                    });
                }
            }
        }

        if !self.started {
            self.violations.push(Violation::NoStart);
        }
        match self.finished_at {
            None => self.violations.push(Violation::NoFinish),
            Some(at) if at != self.last_sequence => self.violations.push(Violation::FinishNotLast),
            Some(_) => {}
        }
        self.violations
    }
}

/// Audit log lines against the configuration they were produced with
pub fn check<S: AsRef<str>>(lines: &[S], config: &SimConfig) -> Vec<Violation> {
    let mut auditor = Auditor::new(config);
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ActionRecord>() {
            Ok(record) => auditor.observe(record),
            Err(error) => auditor.violations.push(Violation::Unparseable { line: i + 1, error }),
        }
    }
    auditor.finish()
}

/// Audit a whole transcript held in memory
pub fn check_text(text: &str, config: &SimConfig) -> Vec<Violation> {
    let lines: Vec<&str> = text.lines().collect();
    check(&lines, config)
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
