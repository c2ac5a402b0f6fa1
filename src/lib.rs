//! OceanPulse - a simulated ocean-monitoring dashboard engine.
//!
//! # Overview
//!
//! OceanPulse generates synthetic sensor readings for a fixed roster of five
//! ocean sites, reduces each site's readings to a weighted 0-100 health score,
//! raises threshold alerts ordered by severity, and forecasts a short
//! continuation of a metric's history by linear trend plus bounded noise.
//!
//! There is no sensor I/O and no persistence: every refresh cycle rebuilds the
//! whole state from the generator.
//!
//! # Modules
//!
//! - [`metric`]: The tracked metrics, their metadata, and snapshots
//! - [`model`]: Sites, alerts, and time-series points
//! - [`random`]: Injectable random sources
//! - [`generator`]: Synthetic snapshots and histories
//! - [`scoring`]: Health score and mood classification
//! - [`alerts`]: Threshold rules and alert derivation
//! - [`forecast`]: Linear trend forecasting
//! - [`format`]: Display strings and status bands
//! - [`dashboard`]: Dashboard state consumed by a renderer
//! - [`refresh`]: Timer-driven refresh loop
//! - [`config`]: Environment configuration

pub mod alerts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod format;
pub mod generator;
pub mod metric;
pub mod model;
pub mod random;
pub mod refresh;
pub mod scoring;

pub use error::OceanError;
pub use metric::{Metric, MetricSnapshot};
