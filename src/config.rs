//! Runtime configuration, read from the environment.
//!
//! Every setting has a default, and an unparseable value falls back to it with
//! a warning rather than stopping the dashboard.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::forecast::DEFAULT_FORECAST_HOURS;
use crate::generator::DEFAULT_HISTORY_HOURS;
use crate::metric::Metric;

/// Default refresh interval in seconds.
const DEFAULT_REFRESH_SECS: u64 = 30;

/// Default simulated generation latency in milliseconds.
const DEFAULT_LATENCY_MS: u64 = 500;

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Time between automatic refresh cycles.
    pub refresh_interval: Duration,

    /// Delay inserted before a generated batch is published.
    pub simulated_latency: Duration,

    /// Look-back window for history series.
    pub history_hours: u32,

    /// Look-ahead window for forecasts.
    pub forecast_hours: u32,

    /// Metric inspected on startup.
    pub initial_metric: Metric,

    /// Write each cycle's view as a JSON line to stdout.
    pub emit_json: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            simulated_latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            history_hours: DEFAULT_HISTORY_HOURS,
            forecast_hours: DEFAULT_FORECAST_HOURS,
            initial_metric: Metric::Temperature,
            emit_json: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `OCEANPULSE_*` environment variables.
    ///
    /// - `OCEANPULSE_REFRESH_SECS`
    /// - `OCEANPULSE_LATENCY_MS`
    /// - `OCEANPULSE_HISTORY_HOURS`
    /// - `OCEANPULSE_FORECAST_HOURS`
    /// - `OCEANPULSE_METRIC` (e.g. `temperature`, `coralHealth`)
    /// - `OCEANPULSE_JSON` (`true`/`false`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let refresh_secs = parse_or(
            &lookup,
            "OCEANPULSE_REFRESH_SECS",
            defaults.refresh_interval.as_secs(),
        )
        .max(1);
        let latency_ms = parse_or(
            &lookup,
            "OCEANPULSE_LATENCY_MS",
            defaults.simulated_latency.as_millis() as u64,
        );

        Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            simulated_latency: Duration::from_millis(latency_ms),
            history_hours: parse_or(&lookup, "OCEANPULSE_HISTORY_HOURS", defaults.history_hours),
            forecast_hours: parse_or(
                &lookup,
                "OCEANPULSE_FORECAST_HOURS",
                defaults.forecast_hours,
            ),
            initial_metric: parse_or(&lookup, "OCEANPULSE_METRIC", defaults.initial_metric),
            emit_json: parse_or(&lookup, "OCEANPULSE_JSON", defaults.emit_json),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = ?default, "Invalid setting, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.history_hours, 24);
        assert_eq!(config.forecast_hours, 6);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("OCEANPULSE_REFRESH_SECS", "5"),
            ("OCEANPULSE_LATENCY_MS", "0"),
            ("OCEANPULSE_HISTORY_HOURS", "48"),
            ("OCEANPULSE_FORECAST_HOURS", "12"),
            ("OCEANPULSE_METRIC", "coralHealth"),
            ("OCEANPULSE_JSON", "true"),
        ]));

        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.simulated_latency, Duration::ZERO);
        assert_eq!(config.history_hours, 48);
        assert_eq!(config.forecast_hours, 12);
        assert_eq!(config.initial_metric, Metric::CoralHealth);
        assert!(config.emit_json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("OCEANPULSE_REFRESH_SECS", "soon"),
            ("OCEANPULSE_METRIC", "turbidity"),
            ("OCEANPULSE_HISTORY_HOURS", "-3"),
        ]));

        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.initial_metric, Metric::Temperature);
        assert_eq!(config.history_hours, 24);
    }

    #[test]
    fn test_zero_refresh_is_raised_to_one_second() {
        let config = DashboardConfig::from_lookup(lookup(&[("OCEANPULSE_REFRESH_SECS", "0")]));
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
    }
}
