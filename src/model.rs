//! Data models for OceanPulse.
//!
//! Everything here is transient: sites and alerts are rebuilt wholesale on
//! every refresh cycle, and history/prediction series whenever the inspected
//! metric changes. Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metric::{Metric, MetricSnapshot};

/// A monitored site with its current readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Stable identifier from the roster, e.g. "med-1".
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Latitude, used for map placement only.
    pub lat: f64,

    /// Longitude, used for map placement only.
    pub lng: f64,

    /// Current readings.
    pub metrics: MetricSnapshot,

    /// Classification derived from the health score of `metrics`.
    pub trend: Trend,
}

/// Direction a site is heading, derived from its current health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Score above 70.
    Improving,

    /// Score above 50, up to 70.
    Stable,

    /// Score of 50 or below.
    Declining,
}

impl Trend {
    /// Determine the trend from a health score.
    ///
    /// # Thresholds
    ///
    /// - `improving`: score > 70
    /// - `stable`: 50 < score <= 70
    /// - `declining`: score <= 50
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            Trend::Improving
        } else if score > 50 {
            Trend::Stable
        } else {
            Trend::Declining
        }
    }
}

/// Alert severity levels.
///
/// Ordered by urgency, so `Critical > Warning > Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Sort priority: lower sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::Warning => 1,
            AlertSeverity::Info => 2,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "Critical",
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Info => "Info",
        }
    }
}

/// A notice that a metric crossed a fixed threshold at a site.
///
/// Alerts are never mutated after creation; dismissal removes them from the
/// working list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique per alert, independent of clock resolution.
    pub id: Uuid,

    pub severity: AlertSeverity,

    /// Human-readable description embedding the formatted reading.
    pub message: String,

    /// Id of the originating site.
    pub site_id: String,

    /// Name of the originating site.
    pub location: String,

    /// When the alert was raised.
    pub timestamp: DateTime<Utc>,

    /// The metric that triggered the alert.
    pub metric: Metric,
}

/// One sample of a metric's time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl HistoricalDataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}
