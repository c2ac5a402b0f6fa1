//! OceanPulse - a simulated ocean-monitoring dashboard engine.
//!
//! # Overview
//!
//! This binary is a headless driver: it refreshes the dashboard on a fixed
//! interval, logs a status line per cycle, and optionally writes each cycle's
//! view as a JSON line to stdout for an external renderer. It runs until
//! interrupted with Ctrl-C.
//!
//! # Environment
//!
//! - `OCEANPULSE_REFRESH_SECS` - refresh interval (default: 30)
//! - `OCEANPULSE_LATENCY_MS` - simulated generation latency (default: 500)
//! - `OCEANPULSE_HISTORY_HOURS` - history window (default: 24)
//! - `OCEANPULSE_FORECAST_HOURS` - forecast window (default: 6)
//! - `OCEANPULSE_METRIC` - metric to chart (default: temperature)
//! - `OCEANPULSE_JSON` - emit JSON views (default: false)
//! - `RUST_LOG` - log filter

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oceanpulse::config::DashboardConfig;
use oceanpulse::random::RngSource;
use oceanpulse::refresh::RefreshLoop;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for JSON views
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("oceanpulse=info".parse()?))
        .init();

    let config = DashboardConfig::from_env();

    info!(
        refresh_secs = config.refresh_interval.as_secs(),
        latency_ms = config.simulated_latency.as_millis() as u64,
        metric = %config.initial_metric,
        json = config.emit_json,
        "Starting OceanPulse"
    );

    let mut refresh = RefreshLoop::new(config, RngSource::from_entropy());

    refresh
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
