// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-worker random streams for arrival delays and port choice
//!
//! Every worker owns an independent `SmallRng` seeded from the run's root seed
//! mixed with a stream number, so a seeded run gives each worker the same
//! draws regardless of scheduling order.

use crate::vehicle::{Port, VehicleId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// 64-bit fractional golden-ratio constant for seed mixing
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Stream reserved for the ferry; vehicle streams start above it
const FERRY_STREAM: u64 = 0;

pub struct WorkerRng(SmallRng);

impl WorkerRng {
    pub fn new(root_seed: u64, stream: u64) -> Self {
        let seed = root_seed ^ stream.wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
        WorkerRng(SmallRng::seed_from_u64(seed))
    }

    pub fn for_ferry(root_seed: u64) -> Self {
        Self::new(root_seed, FERRY_STREAM)
    }

    pub fn for_vehicle(root_seed: u64, id: VehicleId) -> Self {
        let stream = ((id.kind.index() as u64 + 1) << 32) | u64::from(id.number);
        Self::new(root_seed, stream)
    }

    /// Uniform delay in `[0, max]` at microsecond resolution
    pub fn delay_up_to(&mut self, max: Duration) -> Duration {
        let max_us = u64::try_from(max.as_micros()).unwrap_or(u64::MAX);
        if max_us == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.0.gen_range(0..=max_us))
    }

    /// Uniformly random port
    pub fn port(&mut self) -> Port {
        if self.0.gen_bool(0.5) {
            Port::EAST
        } else {
            Port::WEST
        }
    }
}

/// Draw a root seed from entropy for unseeded runs
pub fn entropy_seed() -> u64 {
    rand::random()
}
