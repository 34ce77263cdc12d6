//! Chart construction and display.
//!
//! - [`render`]: rasterizes the percentile series with plotters and shows
//!   the result in a blocking minifb window

pub mod render;
