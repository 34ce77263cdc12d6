//! Percentile chart rendering and display.
//!
//! The figure is rasterized with plotters into an in-memory RGB buffer,
//! then shown in a minifb window that blocks until the viewer closes it.
//! Nothing is written to disk.

use minifb::{Key, Window, WindowOptions};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ChartConfig;
use crate::report::block::ReportSeries;

const CHART_TITLE: &str = "Cache Latency as a Function of Cache Size (P50 / P90 / P95 / P99)";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Display window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Render the percentile series and display it in a blocking window.
///
/// Returns once the viewer closes the window (or presses Escape). Any
/// drawing-backend or window failure propagates immediately.
pub fn show(series: &ReportSeries, config: &ChartConfig) -> Result<(), ChartError> {
    let mut rgb = vec![0u8; config.width * config.height * 3];
    draw_into(&mut rgb, series, (config.width as u32, config.height as u32))?;
    let framebuffer = pack_framebuffer(&rgb);

    info!(
        width = config.width,
        height = config.height,
        points = series.len(),
        "Opening chart window"
    );

    let mut window = Window::new(
        CHART_TITLE,
        config.width,
        config.height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(config.target_fps);

    // The figure is static: keep pushing the same frame until the window
    // goes away.
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&framebuffer, config.width, config.height)?;
    }

    Ok(())
}

/// Draw the four percentile line series into an RGB framebuffer.
fn draw_into(
    buf: &mut [u8],
    series: &ReportSeries,
    (width, height): (u32, u32),
) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(buf, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = latency_ceiling(series.max_latency());
    let labels = &series.labels;

    debug!(points = series.len(), y_max, "Rasterizing chart");

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(0..series.len(), 0f64..y_max)?;

    // Category axis: tick positions are indices into the sorted label list.
    chart
        .configure_mesh()
        .x_labels(series.len())
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .x_label_style(
            ("sans-serif", 13)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Cache Size")
        .y_desc("Latency (ns)")
        .draw()?;

    for (name, values, color) in [
        ("P50", &series.p50, &BLUE),
        ("P90", &series.p90, &GREEN),
        ("P95", &series.p95, &MAGENTA),
        ("P99", &series.p99, &RED),
    ] {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i, *v)),
                color,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));

        // Point markers on top of each line.
        chart.draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Circle::new((i, *v), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Vertical axis ceiling: headroom above the tallest percentile so markers
/// stay inside the plot area.
fn latency_ceiling(max_latency: f64) -> f64 {
    if max_latency <= 0.0 {
        1.0
    } else {
        max_latency * 1.08
    }
}

/// Convert plotters' packed RGB bytes into minifb's 0RGB u32 pixels.
fn pack_framebuffer(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}
