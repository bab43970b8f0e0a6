// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ferry controller state machine
//!
//! One cycle per port visit:
//!
//! ```text
//! Started -> Arrive -> Unload -> CheckDone -> Reset -> Load -> Depart -> Arrive ...
//!                                    |
//!                                    +-> Finished
//! ```
//!
//! The ferry finishes at the first visit where every vehicle has completed
//! its crossing, after unloading the last of them.

use crate::admission::admit_round;
use crate::error::ProtocolError;
use crate::log::{Action, Actor};
use crate::rng::WorkerRng;
use crate::state::SharedState;
use crate::vehicle::VehicleKind;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FerryPhase {
    Started,
    Arrive,
    Unload,
    CheckDone,
    Reset,
    Load,
    Depart,
    Finished,
}

impl fmt::Display for FerryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FerryPhase::Started => "started",
            FerryPhase::Arrive => "arrive",
            FerryPhase::Unload => "unload",
            FerryPhase::CheckDone => "check_done",
            FerryPhase::Reset => "reset",
            FerryPhase::Load => "load",
            FerryPhase::Depart => "depart",
            FerryPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// What the ferry did over the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FerryStats {
    /// Port visits, including the final one
    pub arrivals: u32,
    pub trucks_carried: u64,
    pub cars_carried: u64,
}

pub struct FerryController {
    state: Arc<SharedState>,
    rng: WorkerRng,
    max_arrival: Duration,
    phase: FerryPhase,
    stats: FerryStats,
}

impl FerryController {
    pub fn new(state: Arc<SharedState>, rng: WorkerRng, max_arrival: Duration) -> Self {
        Self {
            state,
            rng,
            max_arrival,
            phase: FerryPhase::Started,
            stats: FerryStats::default(),
        }
    }

    pub fn phase(&self) -> FerryPhase {
        self.phase
    }

    pub fn stats(&self) -> &FerryStats {
        &self.stats
    }

    /// Perform the current phase and move to the next one
    pub async fn step(&mut self) -> Result<FerryPhase, ProtocolError> {
        let next = match self.phase {
            FerryPhase::Started => {
                self.state.log(Actor::Ferry, Action::Started)?;
                FerryPhase::Arrive
            }

            FerryPhase::Arrive => {
                let delay = self.rng.delay_up_to(self.max_arrival);
                tokio::time::sleep(delay).await;
                let port = self.state.ferry_port();
                self.state.log(Actor::Ferry, Action::ArrivedTo(port))?;
                self.stats.arrivals += 1;
                FerryPhase::Unload
            }

            FerryPhase::Unload => {
                let aboard = self.state.begin_unload();
                if aboard > 0 {
                    let signals = self.state.signals();
                    signals.disembark.release(aboard as usize);
                    signals.unloaded.wait().await?;
                }
                tracing::debug!(aboard, "unloading complete");
                FerryPhase::CheckDone
            }

            FerryPhase::CheckDone => {
                if self.state.all_delivered() {
                    self.state.log(Actor::Ferry, Action::Finish)?;
                    FerryPhase::Finished
                } else {
                    FerryPhase::Reset
                }
            }

            FerryPhase::Reset => {
                self.state.reset_round();
                FerryPhase::Load
            }

            FerryPhase::Load => {
                let port = self.state.ferry_port();
                let to_load = admit_round(&self.state, port).await?;
                self.state.signals().loaded.wait_for(to_load).await?;

                let counters = self.state.snapshot();
                self.stats.trucks_carried += u64::from(counters.loaded_of(VehicleKind::Truck));
                self.stats.cars_carried += u64::from(counters.loaded_of(VehicleKind::Car));
                tracing::debug!(%port, to_load, deck_weight = counters.deck_weight(), "loading complete");
                FerryPhase::Depart
            }

            FerryPhase::Depart => {
                let port = self.state.ferry_port();
                self.state.log(Actor::Ferry, Action::Leaving(port))?;
                self.state.sail();
                FerryPhase::Arrive
            }

            FerryPhase::Finished => FerryPhase::Finished,
        };

        tracing::trace!(from = %self.phase, to = %next, "ferry transition");
        self.phase = next;
        Ok(next)
    }

    /// Drive the cycle until every vehicle has crossed
    pub async fn run(mut self) -> Result<FerryStats, ProtocolError> {
        while self.phase != FerryPhase::Finished {
            self.step().await?;
        }
        tracing::info!(
            arrivals = self.stats.arrivals,
            trucks = self.stats.trucks_carried,
            cars = self.stats.cars_carried,
            "ferry finished"
        );
        Ok(self.stats)
    }
}

/// Entry point for the ferry worker
pub async fn run_ferry(
    state: Arc<SharedState>,
    rng: WorkerRng,
    max_arrival: Duration,
) -> Result<FerryStats, ProtocolError> {
    FerryController::new(state, rng, max_arrival).run().await
}

#[cfg(test)]
#[path = "ferry_tests.rs"]
mod tests;
