//! Runtime configuration for cache-latency-plot.
//!
//! There is no configuration file: the tool takes a single optional report
//! path on the command line, and chart geometry lives in a defaulted struct.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cache-latency-plot",
    about = "Chart cache latency percentiles from a benchmark report"
)]
pub struct Cli {
    /// Path to the benchmark report.
    #[arg(default_value = "final_output.txt")]
    pub report: PathBuf,
}

/// Chart window geometry and pacing.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Figure width in pixels.
    pub width: usize,

    /// Figure height in pixels.
    pub height: usize,

    /// Redraw rate of the display window.
    pub target_fps: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 720,
            target_fps: 30,
        }
    }
}
