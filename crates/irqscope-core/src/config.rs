//! Chart configuration
//!
//! The firmware builds the default configuration at boot, or decodes a
//! postcard blob written by a provisioning tool.

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::chart::{ChartGeometry, ChartStyle};
use crate::error::ChartResult;
use crate::interrupts::{LANE_COUNT, Lane};
use crate::ui::{
    ButtonMap, COLOR_BACKGROUND, COLOR_GRID, COLOR_SERIES_FIRST, COLOR_SERIES_SECOND,
    COLOR_SERIES_THIRD, RgbColor,
};

/// Everything the interrupt chart screen needs to lay itself out
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub geometry: ChartGeometry,
    /// Series colors in lane order
    pub colors: [RgbColor; LANE_COUNT],
    pub background: RgbColor,
    pub grid: RgbColor,
    pub buttons: ButtonMap,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            geometry: ChartGeometry::default(),
            colors: [COLOR_SERIES_FIRST, COLOR_SERIES_SECOND, COLOR_SERIES_THIRD],
            background: COLOR_BACKGROUND,
            grid: COLOR_GRID,
            buttons: ButtonMap::default(),
        }
    }
}

impl ChartConfig {
    /// Decode and validate a postcard-encoded configuration
    pub fn from_bytes(bytes: &[u8]) -> ChartResult<Self> {
        let config: Self = postcard::from_bytes(bytes)?;
        config.geometry.validate()?;
        Ok(config)
    }

    /// Encode with postcard
    pub fn to_bytes(&self) -> ChartResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Series color of a lane
    pub fn color(&self, lane: Lane) -> RgbColor {
        self.colors[lane.index()]
    }

    /// Background and grid colors for the renderer
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            background: self.background.to_rgb565(),
            grid: self.grid.to_rgb565(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::ui::ButtonAction;

    #[test]
    fn test_custom_config_survives_encoding() {
        let mut config = ChartConfig::default();
        config.geometry.window_ticks = 2_500;
        config.colors[1] = RgbColor::new(1, 2, 3);
        config.buttons.bind(7, ButtonAction::Refresh).unwrap();

        let bytes = config.to_bytes().unwrap();
        assert_eq!(ChartConfig::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_invalid_geometry_rejected_on_decode() {
        let mut config = ChartConfig::default();
        config.geometry.lane_height_px = 0;
        let bytes = config.to_bytes().unwrap();

        assert_eq!(
            ChartConfig::from_bytes(&bytes),
            Err(ChartError::InvalidGeometry)
        );
    }

    #[test]
    fn test_truncated_blob_is_config_error() {
        let bytes = ChartConfig::default().to_bytes().unwrap();
        let result = ChartConfig::from_bytes(&bytes[..bytes.len() / 2]);

        assert!(matches!(result, Err(ChartError::Config(_))));
    }
}
