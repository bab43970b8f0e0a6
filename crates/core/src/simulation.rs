// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulation spawner
//!
//! Starts one ferry and every vehicle as tokio tasks over a single shared
//! state, waits for all of them, and tears the signals down afterwards. A
//! failing or panicking worker aborts the whole run.

use crate::config::SimConfig;
use crate::error::SimulationError;
use crate::ferry::{run_ferry, FerryStats};
use crate::rng::{entropy_seed, WorkerRng};
use crate::state::{Counters, SharedState};
use crate::vehicle::{Port, VehicleId, VehicleKind};
use crate::worker::{run_vehicle, Origin};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::task::{Id, JoinSet};

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    /// Lines written to the action log
    pub actions: u64,
    pub arrivals: u32,
    pub trucks_carried: u64,
    pub cars_carried: u64,
    #[serde(rename = "final")]
    pub final_state: Counters,
}

enum Outcome {
    Ferry(FerryStats),
    Vehicle,
}

pub struct Simulation {
    config: SimConfig,
    seed: u64,
    state: Arc<SharedState>,
    origins: HashMap<VehicleId, Port>,
}

impl Simulation {
    /// Validate the configuration and set up shared state over `sink`
    pub fn new<W: Write + Send + 'static>(
        config: SimConfig,
        sink: W,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(entropy_seed);
        let state = Arc::new(SharedState::new(
            config.capacity,
            config.total_vehicles(),
            sink,
        ));
        Ok(Self {
            config,
            seed,
            state,
            origins: HashMap::new(),
        })
    }

    /// Pin a vehicle's origin port instead of drawing it at random
    pub fn with_origin(mut self, id: VehicleId, port: Port) -> Self {
        self.origins.insert(id, port);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &Arc<SharedState> {
        &self.state
    }

    fn vehicle_ids(&self) -> impl Iterator<Item = VehicleId> {
        let trucks = (1..=self.config.num_trucks).map(|n| VehicleId::new(VehicleKind::Truck, n));
        let cars = (1..=self.config.num_cars).map(|n| VehicleId::new(VehicleKind::Car, n));
        trucks.chain(cars)
    }

    pub async fn run(self) -> Result<SimulationReport, SimulationError> {
        tracing::info!(
            trucks = self.config.num_trucks,
            cars = self.config.num_cars,
            capacity = self.config.capacity,
            seed = self.seed,
            "starting simulation"
        );

        let mut workers = JoinSet::new();
        let mut names: HashMap<Id, String> = HashMap::new();

        let ferry = run_ferry(
            Arc::clone(&self.state),
            WorkerRng::for_ferry(self.seed),
            self.config.max_ferry_arrival(),
        );
        let handle = workers.spawn(async move { ferry.await.map(Outcome::Ferry) });
        names.insert(handle.id(), "ferry".to_string());

        for id in self.vehicle_ids() {
            let origin = self
                .origins
                .get(&id)
                .map_or(Origin::Random, |port| Origin::Fixed(*port));
            let vehicle = run_vehicle(
                id,
                Arc::clone(&self.state),
                WorkerRng::for_vehicle(self.seed, id),
                self.config.max_vehicle_arrival(),
                origin,
            );
            let handle = workers.spawn(async move { vehicle.await.map(|()| Outcome::Vehicle) });
            names.insert(handle.id(), format!("{} {}", id.kind, id.number));
        }

        let mut stats = None;
        while let Some(joined) = workers.join_next_with_id().await {
            let failure = match joined {
                Ok((_, Ok(Outcome::Ferry(ferry_stats)))) => {
                    stats = Some(ferry_stats);
                    continue;
                }
                Ok((_, Ok(Outcome::Vehicle))) => continue,
                Ok((id, Err(source))) => SimulationError::Worker {
                    worker: worker_name(&names, id),
                    source,
                },
                Err(e) => SimulationError::WorkerPanicked {
                    worker: worker_name(&names, e.id()),
                },
            };

            tracing::error!(error = %failure, "aborting simulation");
            self.state.close();
            workers.abort_all();
            while workers.join_next().await.is_some() {}
            return Err(failure);
        }

        self.state.close();
        let final_state = self.state.snapshot();
        let stats = stats.unwrap_or_default();
        if final_state.total_waiting() != 0
            || final_state.total_unloaded != self.config.total_vehicles()
        {
            return Err(SimulationError::Unsettled(Box::new(final_state)));
        }

        let report = SimulationReport {
            seed: self.seed,
            actions: self.state.actions_logged(),
            arrivals: stats.arrivals,
            trucks_carried: stats.trucks_carried,
            cars_carried: stats.cars_carried,
            final_state,
        };
        tracing::info!(
            actions = report.actions,
            arrivals = report.arrivals,
            "simulation finished"
        );
        Ok(report)
    }
}

fn worker_name(names: &HashMap<Id, String>, id: Id) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("worker {}", id))
}

/// Create (truncating) the action log file
pub fn create_log_file(path: &Path) -> Result<BufWriter<File>, SimulationError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| SimulationError::Resource {
            resource: "action log",
            source,
        })
}

/// Convenience wrapper: validate, spawn everything, and wait
pub async fn run<W: Write + Send + 'static>(
    config: SimConfig,
    sink: W,
) -> Result<SimulationReport, SimulationError> {
    Simulation::new(config, sink)?.run().await
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
