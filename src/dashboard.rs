//! Dashboard state: the consumer side of the engine.
//!
//! The dashboard holds the latest generated batch (sites and their alerts), the
//! metric under inspection with its history and forecast, and the user's
//! selections. A refresh replaces sites and alerts wholesale; selecting a
//! metric regenerates only the history and forecast.
//!
//! # Usage
//!
//! ```ignore
//! let mut rng = RngSource::from_entropy();
//! let mut dashboard = Dashboard::new(DashboardConfig::default(), &mut rng, Utc::now());
//! dashboard.refresh(&mut rng, Utc::now())?;
//! let summary = dashboard.summary();
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::alerts::{self, count_by_severity, derive_alerts};
use crate::config::DashboardConfig;
use crate::error::OceanError;
use crate::forecast::forecast;
use crate::format::{
    CardTrend, ChartPoint, StatusBand, card_trend, chart_series, classify_status, format_value,
};
use crate::generator::{SITE_ROSTER, generate_history, generate_site_snapshots, snapshot_baseline};
use crate::metric::Metric;
use crate::model::{Alert, AlertSeverity, HistoricalDataPoint, Site};
use crate::random::RandomSource;
use crate::scoring::{
    MoodReading, SiteHealth, classify_mood, critical_zone_count, global_health_score,
    score_snapshot,
};

/// Global score below which more monitoring is recommended.
const MONITORING_THRESHOLD: u8 = 60;

/// Dashboard state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    sites: Vec<Site>,
    alerts: Vec<Alert>,
    selected_metric: Metric,
    selected_site: Option<String>,
    history: Vec<HistoricalDataPoint>,
    predictions: Vec<HistoricalDataPoint>,
    last_update: Option<DateTime<Utc>>,
    refreshing: bool,
    cycles: u64,
}

impl Dashboard {
    /// Create a dashboard with no sites yet and the initial metric's history
    /// and forecast already generated.
    pub fn new<R: RandomSource + ?Sized>(
        config: DashboardConfig,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Self {
        let mut dashboard = Self {
            selected_metric: config.initial_metric,
            config,
            sites: Vec::new(),
            alerts: Vec::new(),
            selected_site: None,
            history: Vec::new(),
            predictions: Vec::new(),
            last_update: None,
            refreshing: false,
            cycles: 0,
        };
        dashboard.regenerate_series(rng, now);
        dashboard
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Active alerts, most severe first.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn selected_metric(&self) -> Metric {
        self.selected_metric
    }

    pub fn history(&self) -> &[HistoricalDataPoint] {
        &self.history
    }

    pub fn predictions(&self) -> &[HistoricalDataPoint] {
        &self.predictions
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Whether a refresh cycle is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Number of batches published so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Mark a refresh cycle as started.
    ///
    /// Fails with [`OceanError::RefreshInProgress`] if one is already in
    /// flight; overlapping cycles would interleave two batches.
    pub fn begin_refresh(&mut self) -> Result<(), OceanError> {
        if self.refreshing {
            return Err(OceanError::RefreshInProgress);
        }
        self.refreshing = true;
        Ok(())
    }

    /// Publish a generated batch and end the in-flight cycle.
    ///
    /// The batch is validated first. A rejected batch is dropped and the
    /// previous sites and alerts stay in place.
    #[instrument(skip(self, sites), fields(cycle = self.cycles + 1))]
    pub fn complete_refresh(
        &mut self,
        sites: Vec<Site>,
        now: DateTime<Utc>,
    ) -> Result<(), OceanError> {
        self.refreshing = false;

        if let Err(e) = validate_batch(&sites) {
            warn!(error = %e, "Dropping generated batch, keeping previous state");
            return Err(e);
        }

        self.alerts = derive_alerts(&sites, now);
        self.sites = sites;
        self.last_update = Some(now);
        self.cycles += 1;

        info!(
            sites = self.sites.len(),
            alerts = self.alerts.len(),
            global_score = global_health_score(&self.sites),
            "Dashboard refreshed"
        );

        Ok(())
    }

    /// Abandon the in-flight cycle without touching state.
    pub fn abort_refresh(&mut self) {
        self.refreshing = false;
    }

    /// Run a full synchronous refresh cycle.
    pub fn refresh<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), OceanError> {
        self.begin_refresh()?;
        let sites = generate_site_snapshots(rng);
        self.complete_refresh(sites, now)
    }

    /// Inspect another metric, regenerating its history and forecast.
    pub fn select_metric<R: RandomSource + ?Sized>(
        &mut self,
        metric: Metric,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        self.selected_metric = metric;
        self.regenerate_series(rng, now);
    }

    fn regenerate_series<R: RandomSource + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        self.history = generate_history(self.selected_metric, self.config.history_hours, now, rng);
        self.predictions = forecast(&self.history, self.config.forecast_hours, rng);
    }

    /// Select a site by id, or clear the selection with `None`.
    pub fn select_site(&mut self, id: Option<&str>) -> Result<(), OceanError> {
        match id {
            None => self.selected_site = None,
            Some(id) => {
                if !SITE_ROSTER.iter().any(|s| s.id == id) {
                    return Err(OceanError::UnknownSite(id.to_string()));
                }
                self.selected_site = Some(id.to_string());
            }
        }
        Ok(())
    }

    /// The selected site, or the first one when nothing is selected.
    pub fn current_site(&self) -> Option<&Site> {
        match &self.selected_site {
            Some(id) => self.sites.iter().find(|s| &s.id == id),
            None => self.sites.first(),
        }
    }

    /// Dismiss an alert. Returns whether it was present.
    pub fn dismiss_alert(&mut self, id: Uuid) -> bool {
        alerts::dismiss(&mut self.alerts, id)
    }

    /// Headline counters for the current state.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_state(&self.sites, &self.alerts)
    }

    /// Suggested actions for the current state.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if global_health_score(&self.sites) < MONITORING_THRESHOLD {
            recommendations.push(Recommendation::IncreaseMonitoring);
        }
        if self.alerts.iter().any(|a| a.metric == Metric::Pollution) {
            recommendations.push(Recommendation::PriorityCleanup);
        }
        if self.alerts.iter().any(|a| a.metric == Metric::CoralHealth) {
            recommendations.push(Recommendation::CoralRestoration);
        }

        recommendations
    }

    /// One card per metric for the current site, empty before the first batch.
    pub fn metric_cards(&self) -> Vec<MetricCard> {
        self.current_site()
            .map(|site| {
                site.metrics
                    .iter()
                    .map(|(metric, value)| MetricCard::new(metric, value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serializable snapshot of everything a renderer needs.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            timestamp: self.last_update,
            summary: self.summary(),
            sites: self
                .sites
                .iter()
                .map(|site| {
                    let score = score_snapshot(&site.metrics);
                    SiteView {
                        site: site.clone(),
                        score,
                        health: SiteHealth::from_score(score),
                    }
                })
                .collect(),
            alerts: self
                .alerts
                .iter()
                .map(|alert| AlertView {
                    alert: alert.clone(),
                    severity_label: alert.severity.label(),
                })
                .collect(),
            recommendations: self
                .recommendations()
                .into_iter()
                .map(|recommendation| RecommendationView {
                    recommendation,
                    label: recommendation.label(),
                })
                .collect(),
            selected_metric: self.selected_metric,
            selected_site: self.current_site().map(|s| s.id.clone()),
            cards: self.metric_cards(),
            chart: chart_series(&self.history, &self.predictions),
        }
    }
}

/// Check a generated batch before it replaces the dashboard state.
fn validate_batch(sites: &[Site]) -> Result<(), OceanError> {
    if sites.len() != SITE_ROSTER.len() {
        return Err(OceanError::IncompleteBatch {
            expected: SITE_ROSTER.len(),
            actual: sites.len(),
        });
    }

    for site in sites {
        for (metric, value) in site.metrics.iter() {
            if !snapshot_baseline(metric).clamp.admits(value) {
                return Err(OceanError::InvalidReading {
                    site: site.id.clone(),
                    metric,
                    value,
                });
            }
        }
    }

    Ok(())
}

/// Summary statistics for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Sites with a current snapshot.
    pub active_sensors: usize,

    /// Size of the roster.
    pub total_sensors: usize,

    /// Number of alerts not yet dismissed.
    pub active_alerts: usize,

    /// Number of critical-level alerts.
    pub critical_alerts: usize,

    /// Number of warning-level alerts.
    pub warning_alerts: usize,

    /// Sites scoring below 50.
    pub critical_zones: usize,

    /// Rounded mean score across sites.
    pub global_score: u8,

    /// Mood for the global score.
    pub mood: MoodReading,
}

impl DashboardSummary {
    /// Compute summary from the current sites and alerts.
    pub fn from_state(sites: &[Site], alerts: &[Alert]) -> Self {
        let global_score = global_health_score(sites);
        let by_severity = count_by_severity(alerts);

        Self {
            active_sensors: sites.len(),
            total_sensors: SITE_ROSTER.len(),
            active_alerts: alerts.len(),
            critical_alerts: by_severity
                .get(&AlertSeverity::Critical)
                .copied()
                .unwrap_or(0),
            warning_alerts: by_severity
                .get(&AlertSeverity::Warning)
                .copied()
                .unwrap_or(0),
            critical_zones: critical_zone_count(sites),
            global_score,
            mood: classify_mood(global_score),
        }
    }
}

/// Suggested action derived from the dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Global score below 60.
    IncreaseMonitoring,
    /// A pollution alert is active.
    PriorityCleanup,
    /// A coral health alert is active.
    CoralRestoration,
}

impl Recommendation {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::IncreaseMonitoring => {
                "Increase monitoring frequency in critical zones"
            }
            Recommendation::PriorityCleanup => "Trigger a priority clean-up intervention",
            Recommendation::CoralRestoration => "Activate the coral restoration programme",
        }
    }
}

/// A site with its derived score.
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    #[serde(flatten)]
    pub site: Site,
    pub score: u8,
    pub health: SiteHealth,
}

/// An alert with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    pub severity_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub recommendation: Recommendation,
    pub label: &'static str,
}

/// One metric tile: reading, formatting and coloring for a single site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub metric: Metric,
    pub label: &'static str,
    pub icon: &'static str,
    pub value: f64,
    /// Reading formatted with its unit.
    pub display: String,
    pub ideal: &'static str,
    /// Whether the reading sits inside the metric's ideal range.
    pub in_ideal: bool,
    pub status: StatusBand,
    pub trend: CardTrend,
    /// Whether `trend` points the bad way for this metric.
    pub adverse: bool,
}

impl MetricCard {
    pub fn new(metric: Metric, value: f64) -> Self {
        let info = metric.info();
        let trend = card_trend(metric, value);

        Self {
            metric,
            label: info.label,
            icon: info.icon,
            value,
            display: format_value(metric, value),
            ideal: info.ideal_label,
            in_ideal: info.ideal.contains(value),
            status: classify_status(metric, value),
            trend,
            adverse: trend.is_adverse(metric),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// When the current batch was published, if any.
    pub timestamp: Option<DateTime<Utc>>,

    pub summary: DashboardSummary,

    pub sites: Vec<SiteView>,

    /// Active alerts, most severe first.
    pub alerts: Vec<AlertView>,

    pub recommendations: Vec<RecommendationView>,

    pub selected_metric: Metric,

    pub selected_site: Option<String>,

    /// Metric cards for the selected site.
    pub cards: Vec<MetricCard>,

    /// History followed by forecast, joined at the last historical value.
    pub chart: Vec<ChartPoint>,
}
