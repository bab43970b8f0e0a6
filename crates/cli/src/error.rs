// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing error display with context and suggestions.
//!
//! Errors the user can act on (bad arguments, an unwritable log file) are
//! shown as a message, a few lines of context, and numbered suggestions.

use ferry_core::config::{
    CAPACITY_RANGE, CARS_RANGE, FERRY_ARRIVAL_US_RANGE, TRUCKS_RANGE, VEHICLE_ARRIVAL_US_RANGE,
};
use ferry_core::ConfigError;
use std::fmt;
use std::path::Path;

pub const USAGE: &str = "ferry <NUM_TRUCKS> <NUM_CARS> <CAPACITY> <MAX_VEHICLE_ARRIVAL_US> <MAX_FERRY_ARRIVAL_US>";

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Error for arguments that fail to parse or fall outside their range
    pub fn invalid_arguments(err: ConfigError) -> Self {
        let base = CliError::new(err.to_string());
        let with_ranges = |e: CliError| {
            e.with_context(range_line("num_trucks", TRUCKS_RANGE.start(), TRUCKS_RANGE.end()))
                .with_context(range_line("num_cars", CARS_RANGE.start(), CARS_RANGE.end()))
                .with_context(range_line(
                    "capacity",
                    CAPACITY_RANGE.start(),
                    CAPACITY_RANGE.end(),
                ))
                .with_context(range_line(
                    "max_vehicle_arrival_us",
                    VEHICLE_ARRIVAL_US_RANGE.start(),
                    VEHICLE_ARRIVAL_US_RANGE.end(),
                ))
                .with_context(range_line(
                    "max_ferry_arrival_us",
                    FERRY_ARRIVAL_US_RANGE.start(),
                    FERRY_ARRIVAL_US_RANGE.end(),
                ))
        };

        let err_for_source = err.clone();
        let built = match err {
            ConfigError::ArgumentCount { .. } => base
                .with_context("All five positional arguments are required")
                .with_suggestion(format!("Usage: {}", USAGE))
                .with_suggestion("Example: ferry 10 20 6 1000 100"),
            ConfigError::Malformed { name, .. } => with_ranges(base)
                .with_suggestion(format!("Pass a whole decimal number for {}", name)),
            ConfigError::OutOfRange { name, min, max, .. } => with_ranges(base)
                .with_suggestion(format!("Choose {} between {} and {}", name, min, max)),
        };
        built.with_source(err_for_source)
    }

    /// Error for an action log file that cannot be created
    pub fn log_unwritable(path: &Path, source: ferry_core::SimulationError) -> Self {
        CliError::new(format!("Cannot create action log '{}'", path.display()))
            .with_context("The parent directory may not exist or may not be writable")
            .with_suggestion("Pick another location with --output <PATH>")
            .with_source(source)
    }

    /// Error for a finished log that fails the transcript audit
    pub fn audit_failed(path: &Path, violations: usize) -> Self {
        CliError::new(format!(
            "Action log '{}' failed the audit ({} violation{})",
            path.display(),
            violations,
            if violations == 1 { "" } else { "s" }
        ))
        .with_context("Each violation is listed above")
        .with_suggestion("Rerun with the same --seed and RUST_LOG=ferry_core=debug")
    }
}

fn range_line(name: &str, min: &u32, max: &u32) -> String {
    format!("{} must be in {}..={}", name, min, max)
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
