//! Short-horizon trend forecasting.
//!
//! The forecaster extends a series along its average per-sample slope and adds
//! a small bounded jitter. It is a display aid, not a fitted model: results are
//! not clamped to physical bounds.

use chrono::Duration;

use crate::generator::round2;
use crate::model::HistoricalDataPoint;
use crate::random::RandomSource;

/// Default look-ahead window, in hours.
pub const DEFAULT_FORECAST_HOURS: u32 = 6;

/// Width of the additive noise band; each point moves by at most half of it.
const NOISE_RANGE: f64 = 0.5;

/// Average change per sample across the whole window:
/// `(last - first) / len`. `None` for fewer than two points.
pub fn average_trend(history: &[HistoricalDataPoint]) -> Option<f64> {
    match history {
        [first, .., last] => Some((last.value - first.value) / history.len() as f64),
        _ => None,
    }
}

/// Extrapolate `hours_ahead` hourly points after the end of `history`.
///
/// Returns an empty series when `history` has fewer than two points, since no
/// slope can be established.
pub fn forecast<R: RandomSource + ?Sized>(
    history: &[HistoricalDataPoint],
    hours_ahead: u32,
    rng: &mut R,
) -> Vec<HistoricalDataPoint> {
    let (Some(trend), Some(last)) = (average_trend(history), history.last()) else {
        return Vec::new();
    };

    (1..=hours_ahead)
        .map(|step| {
            let step_f = f64::from(step);
            let value = last.value + trend * step_f + rng.jitter(NOISE_RANGE);
            HistoricalDataPoint::new(
                last.timestamp + Duration::hours(i64::from(step)),
                round2(value),
            )
        })
        .collect()
}
