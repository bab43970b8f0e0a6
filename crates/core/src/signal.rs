// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Counting rendezvous signals between the ferry and vehicles
//!
//! A signal is a semaphore that starts empty. Releasing adds permits and
//! waiting consumes one, so releases made before anybody waits are not lost.

use crate::error::ProtocolError;
use crate::vehicle::{Port, VehicleKind};
use tokio::sync::Semaphore;

pub struct Signal {
    name: &'static str,
    sem: Semaphore,
}

impl Signal {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sem: Semaphore::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn release(&self, count: usize) {
        if count > 0 {
            self.sem.add_permits(count);
        }
    }

    /// Block until one release is available and consume it
    pub async fn wait(&self) -> Result<(), ProtocolError> {
        self.sem
            .acquire()
            .await
            .map_err(|_| ProtocolError::SignalClosed(self.name))?
            .forget();
        Ok(())
    }

    /// Block until `count` releases are available and consume them all
    pub async fn wait_for(&self, count: u32) -> Result<(), ProtocolError> {
        if count == 0 {
            return Ok(());
        }
        self.sem
            .acquire_many(count)
            .await
            .map_err(|_| ProtocolError::SignalClosed(self.name))?
            .forget();
        Ok(())
    }

    /// Releases not yet consumed
    pub fn pending(&self) -> usize {
        self.sem.available_permits()
    }

    /// Wake every waiter with an error; later waits fail immediately
    pub fn close(&self) {
        self.sem.close();
    }

    pub fn is_closed(&self) -> bool {
        self.sem.is_closed()
    }
}

/// Every rendezvous point of the protocol
pub struct Signals {
    /// Ferry to one waiting vehicle, indexed `[kind][port]`
    admission: [[Signal; 2]; 2],
    /// Admitted vehicle to ferry, once per admission
    pub boarded: Signal,
    /// Vehicle to ferry after its boarding line is logged
    pub loaded: Signal,
    /// Ferry to each vehicle aboard when unloading starts
    pub disembark: Signal,
    /// Last disembarking vehicle to ferry
    pub unloaded: Signal,
}

impl Signals {
    pub fn new() -> Self {
        Self {
            admission: [
                [Signal::new("admit truck at 0"), Signal::new("admit truck at 1")],
                [Signal::new("admit car at 0"), Signal::new("admit car at 1")],
            ],
            boarded: Signal::new("boarding acknowledgment"),
            loaded: Signal::new("loading complete"),
            disembark: Signal::new("disembark"),
            unloaded: Signal::new("unloading complete"),
        }
    }

    pub fn admission(&self, kind: VehicleKind, port: Port) -> &Signal {
        &self.admission[kind.index()][port.index()]
    }

    pub fn all(&self) -> impl Iterator<Item = &Signal> {
        self.admission
            .iter()
            .flatten()
            .chain([&self.boarded, &self.loaded, &self.disembark, &self.unloaded])
    }

    pub fn close_all(&self) {
        for signal in self.all() {
            signal.close();
        }
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
