//! Parsed report records.
//!
//! A cache block is one reported measurement: a cache size paired with four
//! latency percentiles. Blocks are the unit of extraction; the renderer
//! consumes them as parallel per-percentile series.

use serde::{Deserialize, Serialize};

/// One measurement extracted from the report: a cache size and its latency
/// percentiles in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheBlock {
    /// Cache size in kilobytes.
    pub size_kb: u64,

    /// Median latency (P50).
    pub median: f64,

    /// 90th percentile latency.
    pub p90: f64,

    /// 95th percentile latency.
    pub p95: f64,

    /// 99th percentile latency.
    pub p99: f64,
}

impl CacheBlock {
    /// Axis label for this block, e.g. `"32 KB"`.
    pub fn label(&self) -> String {
        format!("{} KB", self.size_kb)
    }
}

/// The size-ordered series handed to the chart renderer: display labels plus
/// one numeric sequence per percentile, aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSeries {
    /// Cache size labels in ascending size order.
    pub labels: Vec<String>,

    /// Median (P50) latencies.
    pub p50: Vec<f64>,

    /// P90 latencies.
    pub p90: Vec<f64>,

    /// P95 latencies.
    pub p95: Vec<f64>,

    /// P99 latencies.
    pub p99: Vec<f64>,
}

impl ReportSeries {
    /// Split size-sorted blocks into parallel label and percentile sequences.
    pub fn from_blocks(blocks: &[CacheBlock]) -> Self {
        Self {
            labels: blocks.iter().map(CacheBlock::label).collect(),
            p50: blocks.iter().map(|b| b.median).collect(),
            p90: blocks.iter().map(|b| b.p90).collect(),
            p95: blocks.iter().map(|b| b.p95).collect(),
            p99: blocks.iter().map(|b| b.p99).collect(),
        }
    }

    /// Number of cache sizes in the series.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the series holds no data points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest latency across all four percentile sequences. Used to size
    /// the vertical axis.
    pub fn max_latency(&self) -> f64 {
        self.p50
            .iter()
            .chain(&self.p90)
            .chain(&self.p95)
            .chain(&self.p99)
            .fold(0.0_f64, |acc, v| acc.max(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(size_kb: u64, base: f64) -> CacheBlock {
        CacheBlock {
            size_kb,
            median: base,
            p90: base * 2.0,
            p95: base * 2.5,
            p99: base * 3.0,
        }
    }

    #[test]
    fn test_label_format() {
        assert_eq!(block(32, 1.0).label(), "32 KB");
        assert_eq!(block(8192, 1.0).label(), "8192 KB");
    }

    #[test]
    fn test_series_alignment() {
        let blocks = vec![block(8, 5.0), block(16, 10.0)];
        let series = ReportSeries::from_blocks(&blocks);

        assert_eq!(series.len(), 2);
        assert_eq!(series.labels, vec!["8 KB", "16 KB"]);
        assert_eq!(series.p50, vec![5.0, 10.0]);
        assert_eq!(series.p90, vec![10.0, 20.0]);
        assert_eq!(series.p95, vec![12.5, 25.0]);
        assert_eq!(series.p99, vec![15.0, 30.0]);
    }

    #[test]
    fn test_max_latency_spans_all_percentiles() {
        let blocks = vec![block(8, 5.0), block(16, 10.0)];
        let series = ReportSeries::from_blocks(&blocks);
        // 10.0 * 3.0 from the 16 KB p99.
        assert_eq!(series.max_latency(), 30.0);
    }
}
