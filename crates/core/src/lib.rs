// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ferry-core: two-port ferry crossing simulation
//!
//! This crate provides:
//! - The shared state, action log, and rendezvous signals all workers use
//! - The admission policy that decides who boards each round
//! - The ferry controller and vehicle worker state machines
//! - A spawner that runs one ferry and every vehicle as tokio tasks
//! - A transcript audit for finished action logs

pub mod config;
pub mod error;
pub mod log;
pub mod rng;
pub mod vehicle;

// Protocol (order matters for dependencies)
pub mod signal;
pub mod state;
pub mod admission;
pub mod ferry;
pub mod worker;
pub mod simulation;

pub mod audit;

// Re-exports
pub use config::{ConfigError, SimConfig};
pub use error::{ProtocolError, SimulationError};
pub use ferry::{run_ferry, FerryController, FerryPhase, FerryStats};
pub use log::{Action, ActionLog, ActionRecord, Actor, MemorySink};
pub use simulation::{create_log_file, Simulation, SimulationReport};
pub use state::{Counters, SharedState};
pub use vehicle::{Port, VehicleId, VehicleKind};
pub use worker::{run_vehicle, Origin, VehiclePhase, VehicleWorker};
