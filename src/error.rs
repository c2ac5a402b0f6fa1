//! Error types for OceanPulse.
//!
//! The engine functions (generation, scoring, alerting, forecasting) are total
//! and never fail. Errors only arise at the edges: parsing configuration,
//! selecting things by id, and validating a generated batch before it replaces
//! the dashboard state.

use thiserror::Error;

use crate::metric::Metric;

/// Errors that can occur around the dashboard engine.
#[derive(Debug, Error, PartialEq)]
pub enum OceanError {
    /// A metric key did not match any tracked metric.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// A site id did not match any site in the roster.
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    /// A generated batch did not cover the whole roster.
    #[error("Incomplete batch: expected {expected} sites, got {actual}")]
    IncompleteBatch { expected: usize, actual: usize },

    /// A generated reading was non-finite or outside its clamp.
    #[error("Invalid reading for {metric} at site '{site}': {value}")]
    InvalidReading {
        site: String,
        metric: Metric,
        value: f64,
    },

    /// A refresh was requested while another cycle was still in flight.
    #[error("Refresh already in progress")]
    RefreshInProgress,
}
