//! Constants for chart geometry and rendering
//!
//! All magic numbers are defined here with descriptive names and units.

/// Left edge of the plot area in pixels (room for lane labels)
pub const DEFAULT_CHART_LEFT_PX: i32 = 32;

/// Top edge of the first lane in pixels (room for the title row)
pub const DEFAULT_CHART_TOP_PX: i32 = 24;

/// Width of the plot area in pixels
pub const DEFAULT_CHART_WIDTH_PX: u32 = 280;

/// Height of one lane in pixels
pub const DEFAULT_LANE_HEIGHT_PX: u32 = 60;

/// Vertical gap between two lanes in pixels
pub const DEFAULT_LANE_GAP_PX: u32 = 12;

/// Span of time shown across the plot width (milliseconds)
pub const DEFAULT_WINDOW_TICKS: u32 = 10_000;

/// Interrupt rate drawn at full lane height (milli-hertz, 25 Hz)
pub const DEFAULT_FULL_SCALE_MHZ: u32 = 25_000;

/// Maximum number of points in one series
pub const DEFAULT_SERIES_CAPACITY: usize = 64;

/// Weight divisor of the inter-arrival moving average
///
/// Each new interval contributes 1/4 of the smoothed value.
pub const SMOOTHING_DIVISOR: u64 = 4;

/// Milli-hertz for an interval of one tick
pub const MILLIHERTZ_PER_TICK: u64 = 1_000_000;

/// Series line width in pixels
pub const SERIES_LINE_WIDTH_PX: u32 = 1;

/// Lane baseline dash length in pixels
pub const BASELINE_DASH_PX: u32 = 2;

/// Lane baseline gap length in pixels
pub const BASELINE_GAP_PX: u32 = 3;

/// Horizontal distance between a lane label and the plot area in pixels
pub const LANE_LABEL_MARGIN_PX: i32 = 4;
