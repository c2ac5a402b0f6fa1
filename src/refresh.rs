//! Periodic refresh loop driving a [`Dashboard`].
//!
//! Each tick starts a guarded cycle, waits out the simulated latency, then
//! publishes a freshly generated batch. A failed cycle is logged and skipped;
//! the dashboard keeps showing the previous batch until the next tick.

use std::future::Future;
use std::io::Write;

use chrono::Utc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::generator::generate_site_snapshots;
use crate::random::RandomSource;

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new batch was published.
    Published,
    /// Another cycle was still in flight.
    Skipped,
    /// The batch was rejected; previous state retained.
    Dropped,
}

/// Holds a started refresh cycle; aborts it if dropped before completion.
struct InFlight<'a>(&'a mut Dashboard);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.0.is_refreshing() {
            warn!("Refresh cycle cancelled before publishing");
            self.0.abort_refresh();
        }
    }
}

/// Owns a dashboard and its random source and refreshes it on a timer.
pub struct RefreshLoop<R> {
    dashboard: Dashboard,
    rng: R,
}

impl<R: RandomSource> RefreshLoop<R> {
    pub fn new(config: DashboardConfig, mut rng: R) -> Self {
        let dashboard = Dashboard::new(config, &mut rng, Utc::now());
        Self { dashboard, rng }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Run one refresh cycle, honoring the simulated latency.
    ///
    /// Dropping the returned future mid-cycle releases the refresh guard, so
    /// the next tick can run.
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> TickOutcome {
        if self.dashboard.begin_refresh().is_err() {
            debug!("Refresh already in flight, skipping tick");
            return TickOutcome::Skipped;
        }
        let mut cycle = InFlight(&mut self.dashboard);

        let latency = cycle.0.config().simulated_latency;
        if !latency.is_zero() {
            time::sleep(latency).await;
        }

        let sites = generate_site_snapshots(&mut self.rng);
        match cycle.0.complete_refresh(sites, Utc::now()) {
            Ok(()) => TickOutcome::Published,
            Err(_) => TickOutcome::Dropped,
        }
    }

    /// Refresh immediately, then on every interval tick until `shutdown`
    /// resolves.
    pub async fn run<F>(&mut self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut interval = time::interval(self.dashboard.config().refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            interval_secs = self.dashboard.config().refresh_interval.as_secs(),
            metric = %self.dashboard.selected_metric(),
            "Refresh loop started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycles = self.dashboard.cycles(), "Refresh loop stopped");
                    return Ok(());
                }
                _ = interval.tick() => {
                    let outcome = self.tick().await;
                    if outcome == TickOutcome::Published {
                        self.report()?;
                    } else {
                        warn!(?outcome, "Refresh cycle did not publish");
                    }
                }
            }
        }
    }

    /// Log the current summary and, if enabled, write the view as JSON.
    fn report(&self) -> anyhow::Result<()> {
        let summary = self.dashboard.summary();
        info!(
            global_score = summary.global_score,
            mood = ?summary.mood.mood,
            alerts = summary.active_alerts,
            critical = summary.critical_alerts,
            warnings = summary.warning_alerts,
            critical_zones = summary.critical_zones,
            "Ocean status"
        );

        if self.dashboard.config().emit_json {
            let line = serde_json::to_string(&self.dashboard.view())?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{line}")?;
        }

        Ok(())
    }
}
