// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vehicle worker state machine
//!
//! A vehicle makes exactly one crossing:
//!
//! ```text
//! Started -> Arrived -> Boarding -> Aboard -> Disembarking -> Done
//! ```
//!
//! A vehicle that is not admitted on a visit simply keeps waiting at its
//! port for the next one.

use crate::error::ProtocolError;
use crate::log::{Action, Actor};
use crate::rng::WorkerRng;
use crate::state::SharedState;
use crate::vehicle::{Port, VehicleId};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehiclePhase {
    Started,
    Arrived,
    Boarding,
    Aboard,
    Disembarking,
    Done,
}

impl fmt::Display for VehiclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehiclePhase::Started => "started",
            VehiclePhase::Arrived => "arrived",
            VehiclePhase::Boarding => "boarding",
            VehiclePhase::Aboard => "aboard",
            VehiclePhase::Disembarking => "disembarking",
            VehiclePhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Where a vehicle shows up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Drawn uniformly from the worker's random stream
    Random,
    Fixed(Port),
}

pub struct VehicleWorker {
    id: VehicleId,
    state: Arc<SharedState>,
    rng: WorkerRng,
    max_arrival: Duration,
    origin: Origin,
    port: Option<Port>,
    phase: VehiclePhase,
}

impl VehicleWorker {
    pub fn new(
        id: VehicleId,
        state: Arc<SharedState>,
        rng: WorkerRng,
        max_arrival: Duration,
        origin: Origin,
    ) -> Self {
        Self {
            id,
            state,
            rng,
            max_arrival,
            origin,
            port: None,
            phase: VehiclePhase::Started,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn phase(&self) -> VehiclePhase {
        self.phase
    }

    /// Port the vehicle arrived at, once known
    pub fn origin_port(&self) -> Option<Port> {
        self.port
    }

    fn actor(&self) -> Actor {
        Actor::Vehicle(self.id)
    }

    fn arrival_port(&mut self) -> Port {
        if let Some(port) = self.port {
            return port;
        }
        let port = match self.origin {
            Origin::Random => self.rng.port(),
            Origin::Fixed(port) => port,
        };
        self.port = Some(port);
        port
    }

    /// Perform the current phase and move to the next one
    pub async fn step(&mut self) -> Result<VehiclePhase, ProtocolError> {
        let state = Arc::clone(&self.state);
        let signals = state.signals();
        let next = match self.phase {
            VehiclePhase::Started => {
                state.log(self.actor(), Action::Started)?;
                let delay = self.rng.delay_up_to(self.max_arrival);
                tokio::time::sleep(delay).await;
                self.arrival_port();
                VehiclePhase::Arrived
            }

            VehiclePhase::Arrived => {
                let port = self.arrival_port();
                state.log(self.actor(), Action::ArrivedTo(port))?;
                state.register_waiting(self.id.kind, port);
                signals.admission(self.id.kind, port).wait().await?;
                VehiclePhase::Boarding
            }

            VehiclePhase::Boarding => {
                signals.boarded.release(1);
                state.log(self.actor(), Action::Boarding)?;
                signals.loaded.release(1);
                VehiclePhase::Aboard
            }

            VehiclePhase::Aboard => {
                signals.disembark.wait().await?;
                VehiclePhase::Disembarking
            }

            VehiclePhase::Disembarking => {
                let destination = self.arrival_port().opposite();
                state.log(self.actor(), Action::LeavingIn(destination))?;
                if state.record_disembark() {
                    signals.unloaded.release(1);
                }
                VehiclePhase::Done
            }

            VehiclePhase::Done => VehiclePhase::Done,
        };

        tracing::trace!(vehicle = %self.id, from = %self.phase, to = %next, "vehicle transition");
        self.phase = next;
        Ok(next)
    }

    /// Drive the crossing to completion
    pub async fn run(mut self) -> Result<(), ProtocolError> {
        while self.phase != VehiclePhase::Done {
            self.step().await?;
        }
        Ok(())
    }
}

/// Entry point for one vehicle worker
pub async fn run_vehicle(
    id: VehicleId,
    state: Arc<SharedState>,
    rng: WorkerRng,
    max_arrival: Duration,
    origin: Origin,
) -> Result<(), ProtocolError> {
    VehicleWorker::new(id, state, rng, max_arrival, origin)
        .run()
        .await
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
