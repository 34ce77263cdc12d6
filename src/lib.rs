//! cache-latency-plot: latency percentile charts from memory benchmark reports.
//!
//! Reads a plain-text benchmark report containing repeated blocks of the form
//! `Cache Size: N KB` followed by a JSON object of latency statistics,
//! extracts the P50/P90/P95/P99 percentiles per cache size, and renders them
//! as a multi-series line chart in an interactive window.

pub mod chart;
pub mod config;
pub mod report;
