//! The fixed set of tracked ocean metrics and their display metadata.
//!
//! The metric set is closed: every lookup in this module is a `match` over
//! [`Metric`], so an out-of-set key is unrepresentable once a string has been
//! parsed into a `Metric`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OceanError;

/// An environmental quantity tracked at every monitored site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Water temperature in °C.
    Temperature,
    /// Acidity.
    Ph,
    /// Dissolved oxygen in mg/L.
    Oxygen,
    /// Salinity in PSU.
    Salinity,
    /// Pollution index, 0-100.
    Pollution,
    /// Biodiversity index, 0-100.
    Biodiversity,
    /// Microplastic particles per m³.
    PlasticDensity,
    /// Coral reef health in percent.
    CoralHealth,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 8] = [
        Metric::Temperature,
        Metric::Ph,
        Metric::Oxygen,
        Metric::Salinity,
        Metric::Pollution,
        Metric::Biodiversity,
        Metric::PlasticDensity,
        Metric::CoralHealth,
    ];

    /// The camelCase key used in serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Ph => "ph",
            Metric::Oxygen => "oxygen",
            Metric::Salinity => "salinity",
            Metric::Pollution => "pollution",
            Metric::Biodiversity => "biodiversity",
            Metric::PlasticDensity => "plasticDensity",
            Metric::CoralHealth => "coralHealth",
        }
    }

    /// Display metadata for this metric.
    pub fn info(&self) -> &'static MetricInfo {
        &METRIC_INFO[*self as usize]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = OceanError;

    /// Accepts the camelCase key as well as its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "").to_ascii_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.key().to_ascii_lowercase() == normalized)
            .ok_or_else(|| OceanError::UnknownMetric(s.to_string()))
    }
}

/// An inclusive "ideal" range, used for display only.
///
/// Values outside the range are not rejected anywhere; drifting outside it is
/// exactly what signals degradation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Static display metadata for a metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricInfo {
    pub metric: Metric,
    /// Short label for cards and chart titles.
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Unit suffix, empty for dimensionless indices.
    pub unit: &'static str,
    pub ideal: IdealRange,
    /// Human-readable form of the ideal range.
    pub ideal_label: &'static str,
}

/// Metadata table, indexed by `Metric as usize`.
const METRIC_INFO: [MetricInfo; 8] = [
    MetricInfo {
        metric: Metric::Temperature,
        label: "Temperature",
        description: "Water temperature",
        icon: "🌡️",
        unit: "°C",
        ideal: IdealRange { min: 14.0, max: 22.0 },
        ideal_label: "14-22°C",
    },
    MetricInfo {
        metric: Metric::Ph,
        label: "pH",
        description: "Acidity level",
        icon: "🧪",
        unit: "",
        ideal: IdealRange { min: 7.8, max: 8.5 },
        ideal_label: "7.8-8.5",
    },
    MetricInfo {
        metric: Metric::Oxygen,
        label: "Oxygen",
        description: "Dissolved oxygen",
        icon: "💨",
        unit: "mg/L",
        ideal: IdealRange { min: 6.0, max: 8.0 },
        ideal_label: "6-8 mg/L",
    },
    MetricInfo {
        metric: Metric::Salinity,
        label: "Salinity",
        description: "Salt concentration",
        icon: "🧂",
        unit: "PSU",
        ideal: IdealRange { min: 33.0, max: 37.0 },
        ideal_label: "33-37 PSU",
    },
    MetricInfo {
        metric: Metric::Pollution,
        label: "Pollution",
        description: "Pollution index",
        icon: "🏭",
        unit: "",
        ideal: IdealRange { min: 0.0, max: 20.0 },
        ideal_label: "<20",
    },
    MetricInfo {
        metric: Metric::Biodiversity,
        label: "Biodiversity",
        description: "Biodiversity index",
        icon: "🐠",
        unit: "",
        ideal: IdealRange { min: 70.0, max: 100.0 },
        ideal_label: ">70",
    },
    MetricInfo {
        metric: Metric::PlasticDensity,
        label: "Plastic",
        description: "Microplastic density",
        icon: "♻️",
        unit: "p/m³",
        ideal: IdealRange { min: 0.0, max: 50.0 },
        ideal_label: "<50 p/m³",
    },
    MetricInfo {
        metric: Metric::CoralHealth,
        label: "Coral",
        description: "Reef health",
        icon: "🪸",
        unit: "%",
        ideal: IdealRange { min: 80.0, max: 100.0 },
        ideal_label: ">80%",
    },
];

/// One complete set of readings for a site.
///
/// Produced atomically by a single generation call and not mutated by the
/// engine afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub temperature: f64,
    pub ph: f64,
    pub oxygen: f64,
    pub salinity: f64,
    pub pollution: f64,
    pub biodiversity: f64,
    pub plastic_density: f64,
    pub coral_health: f64,
}

impl MetricSnapshot {
    /// Read one metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Ph => self.ph,
            Metric::Oxygen => self.oxygen,
            Metric::Salinity => self.salinity,
            Metric::Pollution => self.pollution,
            Metric::Biodiversity => self.biodiversity,
            Metric::PlasticDensity => self.plastic_density,
            Metric::CoralHealth => self.coral_health,
        }
    }

    /// Overwrite one metric.
    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Temperature => &mut self.temperature,
            Metric::Ph => &mut self.ph,
            Metric::Oxygen => &mut self.oxygen,
            Metric::Salinity => &mut self.salinity,
            Metric::Pollution => &mut self.pollution,
            Metric::Biodiversity => &mut self.biodiversity,
            Metric::PlasticDensity => &mut self.plastic_density,
            Metric::CoralHealth => &mut self.coral_health,
        };
        *slot = value;
    }

    /// Copy of this snapshot with one metric replaced.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    /// All readings in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}
