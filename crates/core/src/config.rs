// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulation configuration and argument validation
//!
//! A configuration is validated before any worker exists. Each of the five
//! positional arguments has a fixed inclusive range.

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

pub const TRUCKS_RANGE: RangeInclusive<u32> = 0..=10_000;
pub const CARS_RANGE: RangeInclusive<u32> = 0..=10_000;
pub const CAPACITY_RANGE: RangeInclusive<u32> = 3..=100;
pub const VEHICLE_ARRIVAL_US_RANGE: RangeInclusive<u32> = 0..=10_000;
pub const FERRY_ARRIVAL_US_RANGE: RangeInclusive<u32> = 0..=1_000;

/// Names of the positional arguments, in order
pub const ARG_NAMES: [&str; 5] = [
    "num_trucks",
    "num_cars",
    "capacity",
    "max_vehicle_arrival_us",
    "max_ferry_arrival_us",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("invalid number for {name}: {value:?}")]
    Malformed { name: &'static str, value: String },
    #[error("{name} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },
}

/// Validated simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub num_trucks: u32,
    pub num_cars: u32,
    /// Ferry capacity in weighted units
    pub capacity: u32,
    pub max_vehicle_arrival_us: u32,
    pub max_ferry_arrival_us: u32,
    /// Root seed for worker RNG streams; `None` draws one from entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(num_trucks: u32, num_cars: u32, capacity: u32) -> Self {
        Self {
            num_trucks,
            num_cars,
            capacity,
            max_vehicle_arrival_us: 0,
            max_ferry_arrival_us: 0,
            seed: None,
        }
    }

    pub fn with_arrival_bounds(mut self, vehicle_us: u32, ferry_us: u32) -> Self {
        self.max_vehicle_arrival_us = vehicle_us;
        self.max_ferry_arrival_us = ferry_us;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse the five positional arguments, in order
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        if args.len() != ARG_NAMES.len() {
            return Err(ConfigError::ArgumentCount {
                expected: ARG_NAMES.len(),
                actual: args.len(),
            });
        }

        let ranges = [
            TRUCKS_RANGE,
            CARS_RANGE,
            CAPACITY_RANGE,
            VEHICLE_ARRIVAL_US_RANGE,
            FERRY_ARRIVAL_US_RANGE,
        ];
        let mut values = [0u32; 5];
        for (i, raw) in args.iter().enumerate() {
            values[i] = parse_bounded(ARG_NAMES[i], raw.as_ref(), &ranges[i])?;
        }

        Ok(Self {
            num_trucks: values[0],
            num_cars: values[1],
            capacity: values[2],
            max_vehicle_arrival_us: values[3],
            max_ferry_arrival_us: values[4],
            seed: None,
        })
    }

    /// Check every field against its range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (ARG_NAMES[0], self.num_trucks, TRUCKS_RANGE),
            (ARG_NAMES[1], self.num_cars, CARS_RANGE),
            (ARG_NAMES[2], self.capacity, CAPACITY_RANGE),
            (ARG_NAMES[3], self.max_vehicle_arrival_us, VEHICLE_ARRIVAL_US_RANGE),
            (ARG_NAMES[4], self.max_ferry_arrival_us, FERRY_ARRIVAL_US_RANGE),
        ];
        for (name, value, range) in checks {
            if !range.contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: i64::from(value),
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }

    /// Number of vehicles that must complete a crossing before the ferry stops
    pub fn total_vehicles(&self) -> u64 {
        u64::from(self.num_trucks) + u64::from(self.num_cars)
    }

    pub fn max_vehicle_arrival(&self) -> Duration {
        Duration::from_micros(u64::from(self.max_vehicle_arrival_us))
    }

    pub fn max_ferry_arrival(&self) -> Duration {
        Duration::from_micros(u64::from(self.max_ferry_arrival_us))
    }
}

fn parse_bounded(
    name: &'static str,
    raw: &str,
    range: &RangeInclusive<u32>,
) -> Result<u32, ConfigError> {
    // Leading whitespace is tolerated, trailing characters are not
    let value: i64 = match raw.trim_start().parse() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => {
                return Err(ConfigError::Malformed {
                    name,
                    value: raw.to_string(),
                })
            }
        },
    };

    let out_of_range = || ConfigError::OutOfRange {
        name,
        value,
        min: *range.start(),
        max: *range.end(),
    };
    let value32 = u32::try_from(value).map_err(|_| out_of_range())?;
    if range.contains(&value32) {
        Ok(value32)
    } else {
        Err(out_of_range())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
