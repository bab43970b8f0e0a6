// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state of the crossing
//!
//! All counters sit behind one mutex that is never held across an await.
//! Workers only touch them through the accessors below; the signals and the
//! action log live alongside for the whole simulation.

use crate::error::ProtocolError;
use crate::log::{Action, ActionLog, Actor};
use crate::signal::Signals;
use crate::vehicle::{Port, VehicleKind};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

/// Point-in-time copy of the shared counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub ferry_port: Port,
    /// Vehicles parked at a port and not yet admitted, `[kind][port]`
    pub waiting: [[u32; 2]; 2],
    /// Vehicles aboard for the present crossing, `[kind]`
    pub loaded: [u32; 2],
    pub to_unload: u32,
    pub unloaded: u32,
    pub total_unloaded: u64,
    /// Alternation cursor of the admission policy
    pub next_expected: VehicleKind,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            ferry_port: Port::WEST,
            waiting: [[0; 2]; 2],
            loaded: [0; 2],
            to_unload: 0,
            unloaded: 0,
            total_unloaded: 0,
            next_expected: VehicleKind::Truck,
        }
    }
}

impl Counters {
    pub fn waiting_at(&self, kind: VehicleKind, port: Port) -> u32 {
        self.waiting[kind.index()][port.index()]
    }

    pub fn total_waiting(&self) -> u32 {
        self.waiting.iter().flatten().sum()
    }

    pub fn loaded_of(&self, kind: VehicleKind) -> u32 {
        self.loaded[kind.index()]
    }

    pub fn aboard(&self) -> u32 {
        self.loaded.iter().sum()
    }

    /// Weighted units occupied on deck
    pub fn deck_weight(&self) -> u32 {
        VehicleKind::ALL
            .into_iter()
            .map(|kind| self.loaded_of(kind) * kind.weight())
            .sum()
    }
}

pub struct SharedState {
    capacity: u32,
    total_vehicles: u64,
    counters: Mutex<Counters>,
    signals: Signals,
    log: ActionLog,
}

impl SharedState {
    pub fn new<W: Write + Send + 'static>(capacity: u32, total_vehicles: u64, sink: W) -> Self {
        Self {
            capacity,
            total_vehicles,
            counters: Mutex::new(Counters::default()),
            signals: Signals::new(),
            log: ActionLog::new(sink),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn total_vehicles(&self) -> u64 {
        self.total_vehicles
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    pub fn actions_logged(&self) -> u64 {
        self.log.len()
    }

    pub fn log(&self, actor: Actor, action: Action) -> Result<u64, ProtocolError> {
        Ok(self.log.record(actor, action)?)
    }

    fn with<T>(&self, f: impl FnOnce(&mut Counters) -> T) -> T {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut counters)
    }

    pub fn snapshot(&self) -> Counters {
        self.with(|c| c.clone())
    }

    pub fn ferry_port(&self) -> Port {
        self.with(|c| c.ferry_port)
    }

    /// Flip the ferry to the opposite port and return the new one
    pub fn sail(&self) -> Port {
        self.with(|c| {
            c.ferry_port = c.ferry_port.opposite();
            c.ferry_port
        })
    }

    pub fn register_waiting(&self, kind: VehicleKind, port: Port) {
        self.with(|c| c.waiting[kind.index()][port.index()] += 1);
    }

    /// Arm the unload barrier for everything carried across; returns how many
    /// vehicles must disembark
    pub fn begin_unload(&self) -> u32 {
        self.with(|c| {
            c.to_unload = c.aboard();
            c.unloaded = 0;
            c.to_unload
        })
    }

    /// Count one disembarked vehicle; true when it was the last of the round
    pub fn record_disembark(&self) -> bool {
        self.with(|c| {
            c.total_unloaded += 1;
            c.unloaded += 1;
            debug_assert!(c.unloaded <= c.to_unload);
            c.unloaded == c.to_unload
        })
    }

    pub fn all_delivered(&self) -> bool {
        self.with(|c| c.total_unloaded == self.total_vehicles)
    }

    pub fn reset_round(&self) {
        self.with(|c| c.loaded = [0; 2]);
    }

    /// Admit one vehicle waiting at `port` if the policy allows it
    ///
    /// On success the vehicle is moved from the waiting count onto the deck.
    /// The alternation cursor is left alone until [`Self::advance_cursor`].
    pub fn try_admit(&self, port: Port, remaining: u32) -> Option<VehicleKind> {
        self.with(|c| {
            let waiting = [
                c.waiting_at(VehicleKind::Truck, port),
                c.waiting_at(VehicleKind::Car, port),
            ];
            let kind = crate::admission::choose(waiting, remaining, c.next_expected)?;
            c.waiting[kind.index()][port.index()] -= 1;
            c.loaded[kind.index()] += 1;
            debug_assert!(c.deck_weight() <= self.capacity);
            Some(kind)
        })
    }

    /// Flip the alternation cursor after a completed admission
    pub fn advance_cursor(&self) -> VehicleKind {
        self.with(|c| {
            c.next_expected = c.next_expected.other();
            c.next_expected
        })
    }

    /// Release every signal; used at teardown and on fatal failure
    pub fn close(&self) {
        self.signals.close_all();
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
