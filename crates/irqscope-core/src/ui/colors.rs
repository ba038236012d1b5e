//! Color definitions for the chart and summary screens
//!
//! Colors are configured as 8-bit [`RgbColor`] triplets and converted to
//! RGB565 for the panel: R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};

/// 8-bit-per-channel color as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Truncate to the panel's 16-bit format
    pub const fn to_rgb565(self) -> Rgb565 {
        Rgb565::new(self.r >> 3, self.g >> 2, self.b >> 3)
    }
}

impl From<RgbColor> for Rgb565 {
    fn from(color: RgbColor) -> Self {
        color.to_rgb565()
    }
}

// ============================================================================
// Base Colors
// ============================================================================

/// Chart background - very dark gray-blue
pub const COLOR_BACKGROUND: RgbColor = RgbColor::new(18, 23, 24);

/// Lane baselines and separators - medium gray
pub const COLOR_GRID: RgbColor = RgbColor::new(43, 55, 57);

// ============================================================================
// Series Colors
// ============================================================================

/// First interrupt source - amber
pub const COLOR_SERIES_FIRST: RgbColor = RgbColor::new(240, 190, 60);

/// Second interrupt source - teal-green
pub const COLOR_SERIES_SECOND: RgbColor = RgbColor::new(95, 185, 141);

/// Third interrupt source - magenta
pub const COLOR_SERIES_THIRD: RgbColor = RgbColor::new(210, 90, 200);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor as _;

    #[test]
    fn test_white_converts_to_full_scale() {
        assert_eq!(RgbColor::new(255, 255, 255).to_rgb565(), Rgb565::WHITE);
    }

    #[test]
    fn test_series_colors_are_distinct() {
        let colors = [COLOR_SERIES_FIRST, COLOR_SERIES_SECOND, COLOR_SERIES_THIRD]
            .map(RgbColor::to_rgb565);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
