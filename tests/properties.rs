//! Property tests for scoring, classification, alerting and forecasting.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use oceanpulse::alerts::derive_alerts;
use oceanpulse::forecast::forecast;
use oceanpulse::format::format_value;
use oceanpulse::generator::{generate_history, generate_site_snapshots, history_baseline};
use oceanpulse::model::{AlertSeverity, HistoricalDataPoint, Site, Trend};
use oceanpulse::random::RngSource;
use oceanpulse::scoring::{Mood, classify_mood, score_snapshot};
use oceanpulse::{Metric, MetricSnapshot};

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

/// Snapshots satisfying the generator's clamps, with wide unclamped metrics.
fn snapshot_strategy() -> impl Strategy<Value = MetricSnapshot> {
    (
        -10.0f64..50.0,
        6.0f64..10.0,
        0.0f64..15.0,
        20.0f64..50.0,
        0.0f64..=100.0,
        0.0f64..=100.0,
        0.0f64..500.0,
        0.0f64..=100.0,
    )
        .prop_map(
            |(temperature, ph, oxygen, salinity, pollution, biodiversity, plastic, coral)| {
                MetricSnapshot {
                    temperature,
                    ph,
                    oxygen,
                    salinity,
                    pollution,
                    biodiversity,
                    plastic_density: plastic,
                    coral_health: coral,
                }
            },
        )
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

proptest! {
    #[test]
    fn generated_snapshots_are_clamped(seed in any::<u64>()) {
        for site in generate_site_snapshots(&mut RngSource::seeded(seed)) {
            let m = site.metrics;
            prop_assert!((0.0..=100.0).contains(&m.pollution));
            prop_assert!((0.0..=100.0).contains(&m.biodiversity));
            prop_assert!((0.0..=100.0).contains(&m.coral_health));
            prop_assert!(m.plastic_density >= 0.0);
            prop_assert_eq!(site.trend, Trend::from_score(score_snapshot(&m)));
        }
    }

    #[test]
    fn score_is_within_bounds(snapshot in snapshot_strategy()) {
        prop_assert!(score_snapshot(&snapshot) <= 100);
    }

    #[test]
    fn more_coral_never_lowers_score(snapshot in snapshot_strategy(), bump in 0.0f64..100.0) {
        let raised = snapshot.with(Metric::CoralHealth, (snapshot.coral_health + bump).min(100.0));
        prop_assert!(score_snapshot(&raised) >= score_snapshot(&snapshot));
    }

    #[test]
    fn more_pollution_never_raises_score(snapshot in snapshot_strategy(), bump in 0.0f64..100.0) {
        let raised = snapshot.with(Metric::Pollution, (snapshot.pollution + bump).min(100.0));
        prop_assert!(score_snapshot(&raised) <= score_snapshot(&snapshot));
    }

    #[test]
    fn mood_bands_partition_scores(score in 0u8..=100) {
        let expected = match score {
            90..=100 => Mood::Ecstatic,
            75..=89 => Mood::Happy,
            60..=74 => Mood::Neutral,
            40..=59 => Mood::Worried,
            20..=39 => Mood::Angry,
            _ => Mood::Critical,
        };
        prop_assert_eq!(classify_mood(score).mood, expected);
    }

    #[test]
    fn alerts_are_sorted_by_severity(seed in any::<u64>()) {
        let sites = generate_site_snapshots(&mut RngSource::seeded(seed));
        let alerts = derive_alerts(&sites, epoch());
        for pair in alerts.windows(2) {
            prop_assert!(pair[0].severity.priority() <= pair[1].severity.priority());
        }
        if let Some(last_critical) = alerts.iter().rposition(|a| a.severity == AlertSeverity::Critical) {
            prop_assert!(alerts[..last_critical].iter().all(|a| a.severity == AlertSeverity::Critical));
        }
    }

    #[test]
    fn hot_site_raises_single_critical(temperature in 24.01f64..40.0) {
        let site = Site {
            id: "hot-1".to_string(),
            name: "Hot".to_string(),
            lat: 0.0,
            lng: 0.0,
            metrics: MetricSnapshot {
                temperature,
                ph: 8.0,
                oxygen: 7.0,
                salinity: 35.0,
                pollution: 10.0,
                biodiversity: 65.0,
                plastic_density: 150.0,
                coral_health: 80.0,
            },
            trend: Trend::Stable,
        };
        let alerts = derive_alerts(&[site], epoch());
        prop_assert_eq!(alerts.len(), 1);
        prop_assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        prop_assert_eq!(alerts[0].metric, Metric::Temperature);
    }

    #[test]
    fn forecast_continues_hourly(
        values in prop::collection::vec(-100.0f64..100.0, 2..40),
        hours_ahead in 0u32..24,
        seed in any::<u64>(),
    ) {
        let history: Vec<HistoricalDataPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| HistoricalDataPoint::new(epoch() + Duration::hours(i as i64), *v))
            .collect();
        let last = history.last().unwrap().timestamp;

        let predictions = forecast(&history, hours_ahead, &mut RngSource::seeded(seed));

        prop_assert_eq!(predictions.len(), hours_ahead as usize);
        for (i, point) in predictions.iter().enumerate() {
            prop_assert_eq!(point.timestamp, last + Duration::hours(i as i64 + 1));
        }
    }

    #[test]
    fn single_point_forecast_is_empty(value in -100.0f64..100.0, seed in any::<u64>()) {
        let history = [HistoricalDataPoint::new(epoch(), value)];
        prop_assert!(forecast(&history, 6, &mut RngSource::seeded(seed)).is_empty());
    }

    #[test]
    fn history_stays_in_band(metric in metric_strategy(), seed in any::<u64>()) {
        let baseline = history_baseline(metric);
        let history = generate_history(metric, 24, epoch(), &mut RngSource::seeded(seed));

        prop_assert_eq!(history.len(), 25);
        for pair in history.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        // Rounding to 2 decimals can move a value by at most 0.005
        for point in &history {
            prop_assert!(point.value >= baseline.base - baseline.range - 0.005);
            prop_assert!(point.value <= baseline.base + baseline.range + 0.005);
        }
    }

    #[test]
    fn formatting_is_deterministic(metric in metric_strategy(), value in -1000.0f64..1000.0) {
        prop_assert_eq!(format_value(metric, value), format_value(metric, value));
    }
}
