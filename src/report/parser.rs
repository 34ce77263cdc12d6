//! Report text extraction.
//!
//! Scans the raw report for `Cache Size: N KB` markers, binds each marker to
//! the nearest following brace-delimited JSON record, and pulls the four
//! latency percentiles out of it. Single pass, no recovery: the first bad
//! record aborts the run.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::report::block::{CacheBlock, ReportSeries};

/// Matches one report block: the size marker, then anything up to a line
/// boundary (the reports put a dashed rule here), then the nearest brace
/// block. Keywords match case-insensitively; the non-greedy brace match
/// assumes the record itself contains no nested braces.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?si)Cache Size:\s*(\d+)\s*KB\s*.*?\n\s*(\{.*?\})")
        .expect("block pattern is a valid regex")
});

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No cache blocks found in report")]
    NoData,

    #[error("Cache size marker is not a valid integer: {0}")]
    SizeOutOfRange(String),

    #[error("Malformed stats record for {size_kb} KB block: {source}")]
    MalformedRecord {
        size_kb: u64,
        source: serde_json::Error,
    },

    #[error("Stats record for {size_kb} KB block is missing field `{field}`")]
    MissingField { size_kb: u64, field: &'static str },

    #[error("Field `{field}` for {size_kb} KB block is not numeric")]
    NonNumericField { size_kb: u64, field: &'static str },
}

/// Read a report file and extract its percentile series.
///
/// The file is decoded permissively: invalid UTF-8 sequences are replaced
/// rather than rejected, since benchmark logs occasionally pick up stray
/// terminal bytes.
pub fn parse_report(path: &Path) -> Result<ReportSeries, ReportError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    let blocks = extract_blocks(&text)?;

    info!(
        path = %path.display(),
        blocks = blocks.len(),
        min_kb = blocks.first().map(|b| b.size_kb).unwrap_or(0),
        max_kb = blocks.last().map(|b| b.size_kb).unwrap_or(0),
        "Report parsed"
    );

    Ok(ReportSeries::from_blocks(&blocks))
}

/// Extract every cache block from the report text, sorted ascending by cache
/// size. Blocks with equal sizes keep their appearance order.
pub fn extract_blocks(text: &str) -> Result<Vec<CacheBlock>, ReportError> {
    let mut blocks = Vec::new();

    for caps in BLOCK_RE.captures_iter(text) {
        let size_kb: u64 = caps[1]
            .parse()
            .map_err(|_| ReportError::SizeOutOfRange(caps[1].to_string()))?;

        let stats: Value = serde_json::from_str(&caps[2])
            .map_err(|source| ReportError::MalformedRecord { size_kb, source })?;

        let block = CacheBlock {
            size_kb,
            median: numeric_field(&stats, "median", size_kb)?,
            p90: numeric_field(&stats, "p90", size_kb)?,
            p95: numeric_field(&stats, "p95", size_kb)?,
            p99: numeric_field(&stats, "p99", size_kb)?,
        };

        debug!(
            size_kb,
            median = block.median,
            p99 = block.p99,
            "Extracted cache block"
        );

        blocks.push(block);
    }

    if blocks.is_empty() {
        return Err(ReportError::NoData);
    }

    blocks.sort_by_key(|b| b.size_kb);

    Ok(blocks)
}

/// Pull a named field out of a stats record and coerce it to f64.
///
/// Accepts JSON numbers and numeric strings; the producing benchmark writes
/// numbers, but older report formats quoted them.
fn numeric_field(stats: &Value, field: &'static str, size_kb: u64) -> Result<f64, ReportError> {
    let value = stats
        .get(field)
        .ok_or(ReportError::MissingField { size_kb, field })?;

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or(ReportError::NonNumericField { size_kb, field }),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| ReportError::NonNumericField { size_kb, field }),
        _ => Err(ReportError::NonNumericField { size_kb, field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_binds_to_nearest_record() {
        let text = "Cache Size: 64 KB\n----------------------------------------\n\
                    {\"median\": 1.5, \"p90\": 2.0, \"p95\": 2.5, \"p99\": 3.0}\n";
        let blocks = extract_blocks(text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].size_kb, 64);
        assert_eq!(blocks[0].median, 1.5);
    }

    #[test]
    fn test_multiline_record_with_extra_fields() {
        // Shape emitted by the benchmark: pretty-printed JSON with the full
        // statistics set; only the four percentiles matter here.
        let text = "Cache Size: 128 KB\n----\n{\n  \"average\": 2.2,\n  \"min\": 1.0,\n  \
                    \"max\": 9.9,\n  \"median\": 2.0,\n  \"p90\": 4.0,\n  \"p95\": 5.0,\n  \
                    \"p99\": 8.0,\n  \"stddev\": 0.7\n}\n";
        let blocks = extract_blocks(text).unwrap();
        assert_eq!(blocks[0].size_kb, 128);
        assert_eq!(blocks[0].p95, 5.0);
    }

    #[test]
    fn test_numeric_string_coercion() {
        let stats: Value =
            serde_json::from_str("{\"median\": \"12.5\", \"p90\": 20}").unwrap();
        assert_eq!(numeric_field(&stats, "median", 16).unwrap(), 12.5);
        assert_eq!(numeric_field(&stats, "p90", 16).unwrap(), 20.0);
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let stats: Value = serde_json::from_str("{\"median\": [1, 2]}").unwrap();
        let err = numeric_field(&stats, "median", 16).unwrap_err();
        assert!(matches!(
            err,
            ReportError::NonNumericField {
                size_kb: 16,
                field: "median"
            }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let text = "Cache Size: 16 KB\n----\n{\"median\": }\n";
        let err = extract_blocks(text).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecord { size_kb: 16, .. }));
    }

    #[test]
    fn test_oversized_marker_rejected() {
        let text = "Cache Size: 99999999999999999999999 KB\n----\n\
                    {\"median\": 1.0, \"p90\": 1.0, \"p95\": 1.0, \"p99\": 1.0}\n";
        let err = extract_blocks(text).unwrap_err();
        assert!(matches!(err, ReportError::SizeOutOfRange(_)));
    }
}
