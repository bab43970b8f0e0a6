// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission policy for one loading round
//!
//! Each round starts with the full ferry capacity. The policy prefers the
//! kind named by the alternation cursor and falls back to the other kind; a
//! kind qualifies when one is waiting at the port and its weight still fits.
//! The round ends when neither kind qualifies. Vehicles left behind keep
//! waiting for the next visit to their port.

use crate::error::ProtocolError;
use crate::state::SharedState;
use crate::vehicle::{Port, VehicleKind};

/// Pick the kind to admit next, if any
///
/// `waiting` is indexed by [`VehicleKind::index`].
pub fn choose(waiting: [u32; 2], remaining: u32, expected: VehicleKind) -> Option<VehicleKind> {
    let fits = |kind: VehicleKind| waiting[kind.index()] > 0 && remaining >= kind.weight();
    [expected, expected.other()].into_iter().find(|&kind| fits(kind))
}

/// Outcome of a round computed without any concurrency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    /// Kinds in admission order
    pub admitted: Vec<VehicleKind>,
    /// Capacity left unused when the round stopped
    pub remaining: u32,
    /// Cursor value after the round
    pub next_expected: VehicleKind,
}

/// Run the policy against a fixed set of waiting vehicles
///
/// This is what [`admit_round`] does when nobody arrives mid-round.
pub fn plan_round(mut waiting: [u32; 2], capacity: u32, mut expected: VehicleKind) -> RoundPlan {
    let mut remaining = capacity;
    let mut admitted = Vec::new();

    while remaining > 0 {
        let Some(kind) = choose(waiting, remaining, expected) else {
            break;
        };
        waiting[kind.index()] -= 1;
        remaining -= kind.weight();
        admitted.push(kind);
        expected = expected.other();
    }

    RoundPlan {
        admitted,
        remaining,
        next_expected: expected,
    }
}

/// Admit vehicles waiting at `port` until nothing more fits
///
/// Every admission opens the gate for exactly one vehicle of the chosen kind
/// and waits for that vehicle's boarding acknowledgment before the cursor
/// flips and the next admission is considered. Returns how many vehicles were
/// admitted.
pub async fn admit_round(state: &SharedState, port: Port) -> Result<u32, ProtocolError> {
    let signals = state.signals();
    let mut remaining = state.capacity();
    let mut admitted = 0;

    while remaining > 0 {
        let Some(kind) = state.try_admit(port, remaining) else {
            break;
        };
        remaining -= kind.weight();
        admitted += 1;

        signals.admission(kind, port).release(1);
        signals.boarded.wait().await?;

        let next = state.advance_cursor();
        tracing::debug!(%port, %kind, remaining, %next, "vehicle admitted");
    }

    Ok(admitted)
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
