//! Display formatting for metric values and status bands.
//!
//! Nothing here feeds back into scoring or alerting; these helpers only shape
//! raw numbers for a renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metric::Metric;
use crate::model::HistoricalDataPoint;

/// Format a reading with its unit.
///
/// Every format rounds half away from zero before printing, so `18.25`
/// renders `18.3°C` rather than the ties-to-even `18.2°C`.
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Temperature => format!("{:.1}°C", round_to(value, 1)),
        Metric::Ph => format!("pH {:.2}", round_to(value, 2)),
        Metric::Oxygen => format!("{:.1} mg/L", round_to(value, 1)),
        Metric::Salinity => format!("{:.1} PSU", round_to(value, 1)),
        Metric::Pollution | Metric::Biodiversity => format!("{:.0}/100", value.round()),
        Metric::PlasticDensity => format!("{:.0} p/m³", value.round()),
        Metric::CoralHealth => format!("{:.0}%", value.round()),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Display coloring band for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Good,
    Warning,
    Danger,
}

/// How a metric's value maps onto [`StatusBand`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusRule {
    /// Good inside the first inclusive range, warning inside the second.
    Within {
        good: (f64, f64),
        warning: (f64, f64),
    },
    /// Good at or above the first bound, warning at or above the second.
    AtLeast { good: f64, warning: f64 },
    /// Good strictly above the first bound, warning strictly above the second.
    Above { good: f64, warning: f64 },
    /// Good strictly below the first bound, warning strictly below the second.
    Below { good: f64, warning: f64 },
    /// Always good.
    Untracked,
}

/// Band rule for a metric.
pub fn status_rule(metric: Metric) -> StatusRule {
    match metric {
        Metric::Temperature => StatusRule::Within {
            good: (14.0, 22.0),
            warning: (10.0, 26.0),
        },
        Metric::Ph => StatusRule::Within {
            good: (7.8, 8.5),
            warning: (7.5, 8.7),
        },
        Metric::Oxygen => StatusRule::AtLeast {
            good: 6.0,
            warning: 4.0,
        },
        Metric::Pollution => StatusRule::Below {
            good: 30.0,
            warning: 50.0,
        },
        Metric::Biodiversity => StatusRule::Above {
            good: 60.0,
            warning: 40.0,
        },
        Metric::CoralHealth => StatusRule::Above {
            good: 70.0,
            warning: 50.0,
        },
        Metric::Salinity | Metric::PlasticDensity => StatusRule::Untracked,
    }
}

impl StatusRule {
    pub fn classify(&self, value: f64) -> StatusBand {
        let (good, warning) = match *self {
            StatusRule::Within { good, warning } => (
                value >= good.0 && value <= good.1,
                value >= warning.0 && value <= warning.1,
            ),
            StatusRule::AtLeast { good, warning } => (value >= good, value >= warning),
            StatusRule::Above { good, warning } => (value > good, value > warning),
            StatusRule::Below { good, warning } => (value < good, value < warning),
            StatusRule::Untracked => (true, true),
        };

        if good {
            StatusBand::Good
        } else if warning {
            StatusBand::Warning
        } else {
            StatusBand::Danger
        }
    }
}

/// Classify a reading for display coloring.
pub fn classify_status(metric: Metric, value: f64) -> StatusBand {
    status_rule(metric).classify(value)
}

/// Arrow shown on a metric card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTrend {
    Up,
    Down,
    Stable,
}

impl CardTrend {
    /// Whether this direction is bad news for `metric`. Rising pollution or
    /// plastic is adverse; for every other metric, falling is.
    pub fn is_adverse(&self, metric: Metric) -> bool {
        match (metric, self) {
            (_, CardTrend::Stable) => false,
            (Metric::Pollution | Metric::PlasticDensity, trend) => *trend == CardTrend::Up,
            (_, trend) => *trend == CardTrend::Down,
        }
    }
}

/// Card arrow for a single reading.
pub fn card_trend(metric: Metric, value: f64) -> CardTrend {
    match metric {
        Metric::Temperature if value > 20.0 => CardTrend::Up,
        Metric::Ph if value < 8.0 => CardTrend::Down,
        Metric::Pollution if value > 40.0 => CardTrend::Up,
        Metric::Pollution => CardTrend::Down,
        Metric::PlasticDensity if value > 100.0 => CardTrend::Up,
        Metric::PlasticDensity => CardTrend::Down,
        _ => CardTrend::Stable,
    }
}

/// One x-position of the combined history/forecast chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    /// Set for historical samples.
    pub value: Option<f64>,
    /// Set for forecast samples.
    pub prediction: Option<f64>,
}

/// Concatenate history and forecast for charting.
///
/// The first forecast point is drawn at the last historical value so the two
/// lines join without a gap.
pub fn chart_series(
    history: &[HistoricalDataPoint],
    predictions: &[HistoricalDataPoint],
) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = history
        .iter()
        .map(|p| ChartPoint {
            timestamp: p.timestamp,
            value: Some(p.value),
            prediction: None,
        })
        .collect();

    let anchor = history.last().map(|p| p.value);
    points.extend(predictions.iter().enumerate().map(|(i, p)| ChartPoint {
        timestamp: p.timestamp,
        value: None,
        prediction: match (i, anchor) {
            (0, Some(last)) => Some(last),
            _ => Some(p.value),
        },
    }));

    points
}
