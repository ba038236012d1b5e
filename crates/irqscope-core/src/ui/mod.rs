//! UI building blocks shared by all screens

pub mod buttons;
pub mod colors;
pub mod core;

pub use buttons::{ButtonAction, ButtonMap, MAX_BUTTON_BINDINGS};
pub use colors::{
    COLOR_BACKGROUND, COLOR_GRID, COLOR_SERIES_FIRST, COLOR_SERIES_SECOND, COLOR_SERIES_THIRD,
    LIGHT_GRAY, RgbColor, WHITE,
};
pub use self::core::{Action, ButtonId, FrameContext, ScreenId};

/// Panel width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 240;
