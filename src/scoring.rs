//! Health scoring and mood classification.
//!
//! A snapshot is reduced to one 0-100 score through a fixed table of weighted
//! components. Salinity and plastic density are tracked and alerted on
//! elsewhere but do not contribute to the score.

use serde::Serialize;

use crate::metric::{Metric, MetricSnapshot};
use crate::model::Site;

/// Score reported for an empty roster.
pub const DEFAULT_GLOBAL_SCORE: u8 = 75;

/// Sites scoring below this count as critical zones.
pub const CRITICAL_ZONE_THRESHOLD: u8 = 50;

/// One weighted term of the health score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreComponent {
    pub metric: Metric,
    pub weight: f64,
    /// Raw sub-score; clamped to [0, 100] before weighting.
    pub sub_score: fn(f64) -> f64,
}

/// Weights sum to 1.0.
pub const SCORE_COMPONENTS: [ScoreComponent; 6] = [
    ScoreComponent {
        metric: Metric::Temperature,
        weight: 0.15,
        sub_score: temperature_score,
    },
    ScoreComponent {
        metric: Metric::Ph,
        weight: 0.20,
        sub_score: ph_score,
    },
    ScoreComponent {
        metric: Metric::Oxygen,
        weight: 0.15,
        sub_score: oxygen_score,
    },
    ScoreComponent {
        metric: Metric::Pollution,
        weight: 0.20,
        sub_score: pollution_score,
    },
    ScoreComponent {
        metric: Metric::Biodiversity,
        weight: 0.15,
        sub_score: identity_score,
    },
    ScoreComponent {
        metric: Metric::CoralHealth,
        weight: 0.15,
        sub_score: identity_score,
    },
];

fn temperature_score(value: f64) -> f64 {
    if (14.0..=22.0).contains(&value) {
        100.0
    } else {
        100.0 - (value - 18.0).abs() * 10.0
    }
}

fn ph_score(value: f64) -> f64 {
    if (7.8..=8.5).contains(&value) {
        100.0
    } else {
        100.0 - (value - 8.2).abs() * 50.0
    }
}

fn oxygen_score(value: f64) -> f64 {
    value / 8.0 * 100.0
}

fn pollution_score(value: f64) -> f64 {
    100.0 - value
}

fn identity_score(value: f64) -> f64 {
    value
}

/// Compute the health score of a snapshot.
///
/// Each component's sub-score is clamped to [0, 100], weighted, summed and
/// rounded to the nearest integer.
pub fn score_snapshot(snapshot: &MetricSnapshot) -> u8 {
    let total: f64 = SCORE_COMPONENTS
        .iter()
        .map(|c| {
            let sub = (c.sub_score)(snapshot.get(c.metric));
            // NaN readings contribute nothing rather than poisoning the sum
            let sub = if sub.is_nan() { 0.0 } else { sub.clamp(0.0, 100.0) };
            sub * c.weight
        })
        .sum();

    total.round().clamp(0.0, 100.0) as u8
}

/// Rounded mean score across sites, or [`DEFAULT_GLOBAL_SCORE`] for none.
pub fn global_health_score(sites: &[Site]) -> u8 {
    if sites.is_empty() {
        return DEFAULT_GLOBAL_SCORE;
    }

    let total: u32 = sites
        .iter()
        .map(|s| u32::from(score_snapshot(&s.metrics)))
        .sum();

    (f64::from(total) / sites.len() as f64).round() as u8
}

/// Number of sites scoring below [`CRITICAL_ZONE_THRESHOLD`].
pub fn critical_zone_count(sites: &[Site]) -> usize {
    sites
        .iter()
        .filter(|s| score_snapshot(&s.metrics) < CRITICAL_ZONE_THRESHOLD)
        .count()
}

/// Coarse marker band for a site on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteHealth {
    /// Score of 70 or more.
    Healthy,
    /// Score from 50 up to 70.
    Fair,
    /// Score below 50.
    Poor,
}

impl SiteHealth {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            SiteHealth::Healthy
        } else if score >= 50 {
            SiteHealth::Fair
        } else {
            SiteHealth::Poor
        }
    }
}

/// The ocean's "mood", a narrative label for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Ecstatic,
    Happy,
    Neutral,
    Worried,
    Angry,
    Critical,
}

impl Mood {
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "🌊✨",
            Mood::Happy => "🌊😊",
            Mood::Neutral => "🌊😐",
            Mood::Worried => "🌊😟",
            Mood::Angry => "🌊😠",
            Mood::Critical => "🌊💀",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "I'm in great shape! My coral reefs are dancing with joy!",
            Mood::Happy => "Things are going pretty well! Keep it up, humans!",
            Mood::Neutral => "Hmm, I've seen better days... but it could be worse.",
            Mood::Worried => "Ouch... my corals hurt. A little help would be welcome!",
            Mood::Angry => "SERIOUSLY?! Stop dumping your waste in me!",
            Mood::Critical => "MAYDAY MAYDAY! Code red! Critical situation!",
        }
    }

    /// Hex color token for the renderer.
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Ecstatic => "#10b981",
            Mood::Happy => "#22c55e",
            Mood::Neutral => "#eab308",
            Mood::Worried => "#f97316",
            Mood::Angry => "#ef4444",
            Mood::Critical => "#dc2626",
        }
    }
}

/// Lower bounds, checked top-down. Scores below the last bound are critical.
const MOOD_BANDS: [(u8, Mood); 5] = [
    (90, Mood::Ecstatic),
    (75, Mood::Happy),
    (60, Mood::Neutral),
    (40, Mood::Worried),
    (20, Mood::Angry),
];

/// A classified mood with its display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodReading {
    pub mood: Mood,
    pub glyph: &'static str,
    pub message: &'static str,
    pub color: &'static str,
}

/// Classify a score into a mood. Boundary values belong to the higher band.
pub fn classify_mood(score: u8) -> MoodReading {
    let mood = MOOD_BANDS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, mood)| *mood)
        .unwrap_or(Mood::Critical);

    MoodReading {
        mood,
        glyph: mood.glyph(),
        message: mood.message(),
        color: mood.color(),
    }
}
