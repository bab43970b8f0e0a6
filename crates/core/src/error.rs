// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the simulation core

use crate::config::ConfigError;
use crate::state::Counters;
use thiserror::Error;

/// Errors raised inside a running worker
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("signal closed while waiting: {0}")]
    SignalClosed(&'static str),
    #[error("action log write failed: {0}")]
    Log(#[from] std::io::Error),
}

/// Errors that abort a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to initialize {resource}: {source}")]
    Resource {
        resource: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{worker} failed: {source}")]
    Worker {
        worker: String,
        #[source]
        source: ProtocolError,
    },
    #[error("{worker} panicked")]
    WorkerPanicked { worker: String },
    #[error("simulation ended with vehicles left behind: {0:?}")]
    Unsettled(Box<Counters>),
}
