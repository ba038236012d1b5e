//! Interrupt chart: series computation and rendering
//!
//! - [`SeriesBuilder`] maps an [`InterruptTimeList`](crate::interrupts::InterruptTimeList)
//!   onto screen coordinates for one lane
//! - [`ChartRenderer`] draws the three lanes over the previous frame
//!
//! # Memory Characteristics
//!
//! Series are `heapless::Vec<Point, N>`; nothing allocates while the chart
//! is running. Three `Points<64>` take 1.5 KB.

pub mod constants;
mod geometry;
mod renderer;
mod series;

pub use geometry::ChartGeometry;
pub use renderer::{ChartRenderer, ChartStyle, LaneSeries, draw_serie};
pub use series::{Points, SeriesBuilder};
