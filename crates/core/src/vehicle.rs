// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vehicle classes and ports

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity units a truck occupies on deck
pub const TRUCK_WEIGHT: u32 = 3;
/// Capacity units a car occupies on deck
pub const CAR_WEIGHT: u32 = 1;

/// The two vehicle classes carried by the ferry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Truck,
    Car,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 2] = [VehicleKind::Truck, VehicleKind::Car];

    /// Capacity units consumed by one vehicle of this kind
    pub fn weight(self) -> u32 {
        match self {
            VehicleKind::Truck => TRUCK_WEIGHT,
            VehicleKind::Car => CAR_WEIGHT,
        }
    }

    /// The other vehicle kind
    pub fn other(self) -> VehicleKind {
        match self {
            VehicleKind::Truck => VehicleKind::Car,
            VehicleKind::Car => VehicleKind::Truck,
        }
    }

    /// Marker used in the action log
    pub fn marker(self) -> &'static str {
        match self {
            VehicleKind::Truck => "N",
            VehicleKind::Car => "O",
        }
    }

    /// Table index for per-kind arrays
    pub fn index(self) -> usize {
        match self {
            VehicleKind::Truck => 0,
            VehicleKind::Car => 1,
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::Truck => write!(f, "truck"),
            VehicleKind::Car => write!(f, "car"),
        }
    }
}

/// One of the two ports the ferry shuttles between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Port(u8);

impl Port {
    pub const WEST: Port = Port(0);
    pub const EAST: Port = Port(1);
    pub const ALL: [Port; 2] = [Port::WEST, Port::EAST];

    /// Build a port from its log number; anything other than 0 or 1 is rejected
    pub fn new(number: u8) -> Option<Port> {
        (number < 2).then_some(Port(number))
    }

    /// The port across the water
    pub fn opposite(self) -> Port {
        Port(1 - self.0)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable identity of one vehicle worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId {
    pub kind: VehicleKind,
    /// 1-based, unique within the kind
    pub number: u32,
}

impl VehicleId {
    pub fn new(kind: VehicleKind, number: u32) -> Self {
        Self { kind, number }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.marker(), self.number)
    }
}

#[cfg(test)]
#[path = "vehicle_tests.rs"]
mod tests;
