//! Synthetic reading generator.
//!
//! Produces bounded random snapshots for the fixed site roster and random-walk
//! histories for a single metric. All randomness comes from the caller's
//! [`RandomSource`], and the reference time is passed in rather than read from
//! the clock.

use chrono::{DateTime, Duration, Utc};

use crate::metric::{Metric, MetricSnapshot};
use crate::model::{HistoricalDataPoint, Site, Trend};
use crate::random::RandomSource;
use crate::scoring::score_snapshot;

/// Default look-back window for a history series, in hours.
pub const DEFAULT_HISTORY_HOURS: u32 = 24;

/// Fraction of the metric range a single random-walk step may move.
const WALK_STEP_FACTOR: f64 = 0.3;

/// Static reference data for one monitored site.
#[derive(Debug, Clone, Copy)]
pub struct SiteInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// The fixed working population.
pub const SITE_ROSTER: [SiteInfo; 5] = [
    SiteInfo {
        id: "med-1",
        name: "Mediterranean - Côte d'Azur",
        lat: 43.7,
        lng: 7.26,
    },
    SiteInfo {
        id: "atl-1",
        name: "Atlantic - Brittany",
        lat: 48.4,
        lng: -4.48,
    },
    SiteInfo {
        id: "pac-1",
        name: "Pacific - French Polynesia",
        lat: -17.5,
        lng: -149.8,
    },
    SiteInfo {
        id: "car-1",
        name: "Caribbean - Guadeloupe",
        lat: 16.25,
        lng: -61.55,
    },
    SiteInfo {
        id: "ind-1",
        name: "Indian Ocean - Réunion",
        lat: -21.1,
        lng: 55.5,
    },
];

/// Bounds applied to a generated reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clamp {
    /// Left as drawn; may leave the ideal range.
    None,
    /// Floored at zero.
    NonNegative,
    /// Clamped into [0, 100].
    Percent,
}

impl Clamp {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Clamp::None => value,
            Clamp::NonNegative => value.max(0.0),
            Clamp::Percent => value.clamp(0.0, 100.0),
        }
    }

    /// Whether `value` respects this clamp.
    pub fn admits(&self, value: f64) -> bool {
        match self {
            Clamp::None => value.is_finite(),
            Clamp::NonNegative => value.is_finite() && value >= 0.0,
            Clamp::Percent => (0.0..=100.0).contains(&value),
        }
    }
}

/// Distribution of a metric: `base + (U - 0.5) * range`, then `clamp`.
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    pub base: f64,
    pub range: f64,
    pub clamp: Clamp,
}

/// Snapshot distribution for a metric.
pub fn snapshot_baseline(metric: Metric) -> Baseline {
    let (base, range, clamp) = match metric {
        Metric::Temperature => (18.0, 6.0, Clamp::None),
        Metric::Ph => (8.1, 0.4, Clamp::None),
        Metric::Oxygen => (7.0, 2.0, Clamp::None),
        Metric::Salinity => (35.0, 4.0, Clamp::None),
        Metric::Pollution => (25.0, 30.0, Clamp::Percent),
        Metric::Biodiversity => (65.0, 30.0, Clamp::Percent),
        Metric::PlasticDensity => (150.0, 100.0, Clamp::NonNegative),
        Metric::CoralHealth => (70.0, 25.0, Clamp::Percent),
    };
    Baseline { base, range, clamp }
}

/// Random-walk parameters for a metric's history. The walk stays within
/// `[base - range, base + range]`.
pub fn history_baseline(metric: Metric) -> Baseline {
    let (base, range) = match metric {
        Metric::Temperature => (18.0, 3.0),
        Metric::Ph => (8.1, 0.2),
        Metric::Oxygen => (7.0, 1.5),
        Metric::Salinity => (35.0, 2.0),
        Metric::Pollution => (25.0, 15.0),
        Metric::Biodiversity => (65.0, 10.0),
        Metric::PlasticDensity => (150.0, 50.0),
        Metric::CoralHealth => (70.0, 8.0),
    };
    Baseline {
        base,
        range,
        clamp: Clamp::None,
    }
}

/// Draw one snapshot. Metrics are drawn independently, in display order.
pub fn generate_snapshot<R: RandomSource + ?Sized>(rng: &mut R) -> MetricSnapshot {
    let mut snapshot = MetricSnapshot::default();
    for metric in Metric::ALL {
        let baseline = snapshot_baseline(metric);
        let value = baseline.base + rng.jitter(baseline.range);
        snapshot.set(metric, baseline.clamp.apply(value));
    }
    snapshot
}

/// Generate a fresh snapshot for every site in the roster.
pub fn generate_site_snapshots<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Site> {
    SITE_ROSTER
        .iter()
        .map(|info| {
            let metrics = generate_snapshot(rng);
            let trend = Trend::from_score(score_snapshot(&metrics));
            Site {
                id: info.id.to_string(),
                name: info.name.to_string(),
                lat: info.lat,
                lng: info.lng,
                metrics,
                trend,
            }
        })
        .collect()
}

/// Generate `hours + 1` hourly samples of `metric` ending at `now`, oldest
/// first.
///
/// The series is a smoothed random walk starting from the metric's history
/// baseline, clamped to `[base - range, base + range]` at every step and
/// rounded to 2 decimals.
pub fn generate_history<R: RandomSource + ?Sized>(
    metric: Metric,
    hours: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<HistoricalDataPoint> {
    let Baseline { base, range, .. } = history_baseline(metric);
    let (low, high) = (base - range, base + range);

    let mut value = base;
    (0..=hours)
        .rev()
        .map(|hours_ago| {
            let timestamp = now - Duration::hours(i64::from(hours_ago));
            value = (value + rng.jitter(range * WALK_STEP_FACTOR)).clamp(low, high);
            HistoricalDataPoint::new(timestamp, round2(value))
        })
        .collect()
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
