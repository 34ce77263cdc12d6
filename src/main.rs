//! cache-latency-plot: chart latency percentiles from a benchmark report.
//!
//! One-shot pipeline: read the report, extract every `Cache Size: N KB`
//! block with its JSON latency record, sort by cache size, and display the
//! P50/P90/P95/P99 series in an interactive window.

use clap::Parser;
use tracing::info;

use cache_latency_plot::chart::render;
use cache_latency_plot::config::{ChartConfig, Cli};
use cache_latency_plot::report::parser;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_latency_plot=info".into()),
        )
        .with_target(true)
        .init();

    info!("cache-latency-plot v{}", env!("CARGO_PKG_VERSION"));
    info!(report = %cli.report.display(), "Reading report");

    // Parse the report into size-sorted percentile series.
    let series = parser::parse_report(&cli.report)?;

    // Display the chart; blocks until the window is closed.
    render::show(&series, &ChartConfig::default())?;

    Ok(())
}
