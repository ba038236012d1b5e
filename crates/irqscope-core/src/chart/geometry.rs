//! Chart geometry and lane placement
//!
//! The three lanes are stacked vertically inside one plot column. Each lane
//! is addressed by its `(x_offset, y_offset)` pair: the left edge and the
//! bottom (zero-rate) row.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_CHART_LEFT_PX, DEFAULT_CHART_TOP_PX, DEFAULT_CHART_WIDTH_PX, DEFAULT_FULL_SCALE_MHZ,
    DEFAULT_LANE_GAP_PX, DEFAULT_LANE_HEIGHT_PX, DEFAULT_WINDOW_TICKS,
};
use crate::error::{ChartError, ChartResult};
use crate::interrupts::{LANE_COUNT, Lane};

/// Fixed chart layout and scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartGeometry {
    /// Left edge of the plot area in pixels
    pub left_px: i32,
    /// Top edge of the first lane in pixels
    pub top_px: i32,
    /// Width of the plot area in pixels
    pub width_px: u32,
    /// Height of one lane in pixels
    pub lane_height_px: u32,
    /// Gap between lanes in pixels
    pub lane_gap_px: u32,
    /// Visible window in ticks
    pub window_ticks: u32,
    /// Rate mapped to full lane height, in milli-hertz
    pub full_scale_mhz: u32,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            left_px: DEFAULT_CHART_LEFT_PX,
            top_px: DEFAULT_CHART_TOP_PX,
            width_px: DEFAULT_CHART_WIDTH_PX,
            lane_height_px: DEFAULT_LANE_HEIGHT_PX,
            lane_gap_px: DEFAULT_LANE_GAP_PX,
            window_ticks: DEFAULT_WINDOW_TICKS,
            full_scale_mhz: DEFAULT_FULL_SCALE_MHZ,
        }
    }
}

impl ChartGeometry {
    /// Reject layouts that would divide by zero or draw nothing
    pub fn validate(&self) -> ChartResult<()> {
        if self.width_px == 0
            || self.lane_height_px == 0
            || self.window_ticks == 0
            || self.full_scale_mhz == 0
        {
            return Err(ChartError::InvalidGeometry);
        }
        Ok(())
    }

    /// `(x_offset, y_offset)` of a lane: left edge and zero-rate row
    pub fn lane_offset(&self, lane: Lane) -> (i32, i32) {
        let pitch = (self.lane_height_px + self.lane_gap_px) as i32;
        let y_offset = self.top_px + lane.index() as i32 * pitch + self.lane_height_px as i32;
        (self.left_px, y_offset)
    }

    /// Pixel region a lane's series may occupy (both edges inclusive)
    pub fn lane_bounds(&self, lane: Lane) -> Rectangle {
        let (x_offset, y_offset) = self.lane_offset(lane);
        Rectangle::new(
            Point::new(x_offset, y_offset - self.lane_height_px as i32),
            Size::new(self.width_px + 1, self.lane_height_px + 1),
        )
    }

    /// Region covering all lanes, cleared before each chart draw
    pub fn chart_area(&self) -> Rectangle {
        let height = LANE_COUNT as u32 * self.lane_height_px
            + (LANE_COUNT as u32 - 1) * self.lane_gap_px
            + 1;
        Rectangle::new(
            Point::new(self.left_px, self.top_px),
            Size::new(self.width_px + 1, height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_fits_display() {
        let geometry = ChartGeometry::default();
        let area = geometry.chart_area();

        assert!(geometry.validate().is_ok());
        assert!(area.top_left.x >= 0 && area.top_left.y >= 0);
        assert!(area.top_left.x + area.size.width as i32 <= crate::ui::DISPLAY_WIDTH_PX as i32);
        assert!(area.top_left.y + area.size.height as i32 <= crate::ui::DISPLAY_HEIGHT_PX as i32);
    }

    #[test]
    fn test_lanes_do_not_overlap() {
        let geometry = ChartGeometry::default();
        let first = geometry.lane_bounds(Lane::First);
        let second = geometry.lane_bounds(Lane::Second);

        let first_bottom = first.top_left.y + first.size.height as i32;
        assert!(first_bottom <= second.top_left.y);
        assert!(geometry.chart_area().intersection(&geometry.lane_bounds(Lane::Third))
            == geometry.lane_bounds(Lane::Third));
    }

    #[test]
    fn test_zero_window_rejected() {
        let geometry = ChartGeometry {
            window_ticks: 0,
            ..ChartGeometry::default()
        };
        assert_eq!(geometry.validate(), Err(ChartError::InvalidGeometry));
    }
}
