//! Threshold alerting over a batch of site snapshots.
//!
//! Rules live in [`ALERT_RULES`]. Each rule watches one metric and holds one or
//! more tiers ordered from most to least severe; the first tier that matches
//! fires and the rest of that rule is skipped. Rules are independent of each
//! other, so a site can raise several alerts in one pass.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::format::format_value;
use crate::metric::Metric;
use crate::model::{Alert, AlertSeverity, Site};

/// Threshold comparison, strict in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Above(f64),
    Below(f64),
}

impl Threshold {
    pub fn is_crossed(&self, value: f64) -> bool {
        match *self {
            Threshold::Above(limit) => value > limit,
            Threshold::Below(limit) => value < limit,
        }
    }
}

/// One escalation level of a rule.
#[derive(Debug, Clone, Copy)]
pub struct AlertTier {
    pub threshold: Threshold,
    pub severity: AlertSeverity,
    /// Leading text, followed by the formatted reading.
    pub headline: &'static str,
    /// Optional trailing context.
    pub note: Option<&'static str>,
}

/// All tiers watching a single metric.
#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub metric: Metric,
    pub tiers: &'static [AlertTier],
}

pub const ALERT_RULES: [AlertRule; 4] = [
    AlertRule {
        metric: Metric::Temperature,
        tiers: &[
            AlertTier {
                threshold: Threshold::Above(24.0),
                severity: AlertSeverity::Critical,
                headline: "Critical temperature",
                note: Some("coral bleaching risk"),
            },
            AlertTier {
                threshold: Threshold::Above(22.0),
                severity: AlertSeverity::Warning,
                headline: "Elevated temperature",
                note: None,
            },
        ],
    },
    AlertRule {
        metric: Metric::Ph,
        tiers: &[AlertTier {
            threshold: Threshold::Below(7.8),
            severity: AlertSeverity::Critical,
            headline: "Acidification detected",
            note: Some("danger to marine life"),
        }],
    },
    AlertRule {
        metric: Metric::Pollution,
        tiers: &[
            AlertTier {
                threshold: Threshold::Above(60.0),
                severity: AlertSeverity::Critical,
                headline: "Critical pollution",
                note: None,
            },
            AlertTier {
                threshold: Threshold::Above(40.0),
                severity: AlertSeverity::Warning,
                headline: "Moderate pollution",
                note: None,
            },
        ],
    },
    AlertRule {
        metric: Metric::CoralHealth,
        tiers: &[AlertTier {
            threshold: Threshold::Below(40.0),
            severity: AlertSeverity::Critical,
            headline: "Critical coral health",
            note: None,
        }],
    },
];

impl AlertRule {
    /// The first tier crossed by `value`, if any.
    pub fn evaluate(&self, value: f64) -> Option<&'static AlertTier> {
        self.tiers.iter().find(|t| t.threshold.is_crossed(value))
    }
}

/// Derive the alerts for one generation batch.
///
/// Sites are scanned in order and rules in table order. The result is stably
/// sorted by severity priority, so alerts of equal severity keep their scan
/// order.
pub fn derive_alerts(sites: &[Site], now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for site in sites {
        for rule in &ALERT_RULES {
            let value = site.metrics.get(rule.metric);
            if let Some(tier) = rule.evaluate(value) {
                alerts.push(Alert {
                    id: Uuid::new_v4(),
                    severity: tier.severity,
                    message: alert_message(tier, rule.metric, value),
                    site_id: site.id.clone(),
                    location: site.name.clone(),
                    timestamp: now,
                    metric: rule.metric,
                });
            }
        }
    }

    alerts.sort_by_key(|a| a.severity.priority());

    debug!(sites = sites.len(), alerts = alerts.len(), "Alerts derived");

    alerts
}

/// Generate a human-readable alert message.
fn alert_message(tier: &AlertTier, metric: Metric, value: f64) -> String {
    let reading = format_value(metric, value);
    match tier.note {
        Some(note) => format!("{}: {} - {}", tier.headline, reading, note),
        None => format!("{}: {}", tier.headline, reading),
    }
}

/// Remove the alert with `id` from the list. Returns whether one was removed.
pub fn dismiss(alerts: &mut Vec<Alert>, id: Uuid) -> bool {
    let before = alerts.len();
    alerts.retain(|a| a.id != id);
    alerts.len() != before
}

/// Count alerts per severity.
pub fn count_by_severity(alerts: &[Alert]) -> HashMap<AlertSeverity, usize> {
    let mut counts = HashMap::new();
    for alert in alerts {
        *counts.entry(alert.severity).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricSnapshot;
    use crate::model::Trend;

    fn calm() -> MetricSnapshot {
        MetricSnapshot {
            temperature: 18.0,
            ph: 8.1,
            oxygen: 7.0,
            salinity: 35.0,
            pollution: 25.0,
            biodiversity: 65.0,
            plastic_density: 150.0,
            coral_health: 70.0,
        }
    }

    fn site(id: &str, metrics: MetricSnapshot) -> Site {
        Site {
            id: id.to_string(),
            name: format!("Site {id}"),
            lat: 0.0,
            lng: 0.0,
            metrics,
            trend: Trend::Stable,
        }
    }

    #[test]
    fn test_calm_site_raises_nothing() {
        let alerts = derive_alerts(&[site("a", calm())], Utc::now());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_hot_site_single_critical() {
        let metrics = MetricSnapshot {
            temperature: 25.0,
            pollution: 10.0,
            ph: 8.0,
            coral_health: 80.0,
            ..calm()
        };
        let alerts = derive_alerts(&[site("a", metrics)], Utc::now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].metric, Metric::Temperature);
        assert_eq!(
            alerts[0].message,
            "Critical temperature: 25.0°C - coral bleaching risk"
        );
        assert_eq!(alerts[0].location, "Site a");
    }

    #[test]
    fn test_tiers_escalate_exclusively() {
        let metrics = MetricSnapshot {
            pollution: 70.0,
            ..calm()
        };
        let alerts = derive_alerts(&[site("a", metrics)], Utc::now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].message, "Critical pollution: 70/100");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let metrics = MetricSnapshot {
            temperature: 22.0,
            ph: 7.8,
            pollution: 40.0,
            coral_health: 40.0,
            ..calm()
        };
        assert!(derive_alerts(&[site("a", metrics)], Utc::now()).is_empty());

        let metrics = MetricSnapshot {
            temperature: 24.0,
            pollution: 60.0,
            ..calm()
        };
        let alerts = derive_alerts(&[site("a", metrics)], Utc::now());
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.severity == AlertSeverity::Warning));
    }

    #[test]
    fn test_ordering_is_stable_by_severity() {
        let warm = MetricSnapshot {
            temperature: 23.0,
            ..calm()
        };
        let acidic = MetricSnapshot {
            ph: 7.5,
            pollution: 45.0,
            ..calm()
        };
        let dying = MetricSnapshot {
            coral_health: 30.0,
            ..calm()
        };
        let sites = vec![site("a", warm), site("b", acidic), site("c", dying)];

        let alerts = derive_alerts(&sites, Utc::now());
        let order: Vec<(&str, AlertSeverity)> = alerts
            .iter()
            .map(|a| (a.site_id.as_str(), a.severity))
            .collect();

        assert_eq!(
            order,
            vec![
                ("b", AlertSeverity::Critical),
                ("c", AlertSeverity::Critical),
                ("a", AlertSeverity::Warning),
                ("b", AlertSeverity::Warning),
            ]
        );
        assert_eq!(
            alerts[0].message,
            "Acidification detected: pH 7.50 - danger to marine life"
        );
    }

    #[test]
    fn test_ids_are_unique_within_batch() {
        let hot = MetricSnapshot {
            temperature: 30.0,
            ph: 7.0,
            pollution: 90.0,
            coral_health: 5.0,
            ..calm()
        };
        let sites: Vec<Site> = (0..5).map(|i| site(&i.to_string(), hot)).collect();
        let alerts = derive_alerts(&sites, Utc::now());

        assert_eq!(alerts.len(), 20);
        let mut ids: Vec<Uuid> = alerts.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_dismiss_removes_only_matching() {
        let hot = MetricSnapshot {
            temperature: 30.0,
            coral_health: 5.0,
            ..calm()
        };
        let mut alerts = derive_alerts(&[site("a", hot)], Utc::now());
        let target = alerts[1].id;
        let keep = alerts[0].id;

        assert!(dismiss(&mut alerts, target));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, keep);
        assert!(!dismiss(&mut alerts, target));
    }

    #[test]
    fn test_count_by_severity() {
        let metrics = MetricSnapshot {
            temperature: 23.0,
            ph: 7.0,
            ..calm()
        };
        let alerts = derive_alerts(&[site("a", metrics)], Utc::now());
        let counts = count_by_severity(&alerts);
        assert_eq!(counts.get(&AlertSeverity::Critical), Some(&1));
        assert_eq!(counts.get(&AlertSeverity::Warning), Some(&1));
        assert_eq!(counts.get(&AlertSeverity::Info), None);
    }
}
