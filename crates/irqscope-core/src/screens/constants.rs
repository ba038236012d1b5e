//! Shared layout constants for screens

/// Height of the title row at the top of each screen in pixels
pub const TITLE_ROW_HEIGHT_PX: u32 = 20;

/// Left padding of title and body text in pixels
pub const TEXT_PADDING_LEFT_PX: i32 = 6;

/// Vertical distance between summary rows in pixels
pub const SUMMARY_ROW_PITCH_PX: i32 = 24;

/// Top of the first summary row in pixels
pub const SUMMARY_FIRST_ROW_Y_PX: i32 = 44;

/// Distance of the hint line from the bottom edge in pixels
pub const HINT_BOTTOM_MARGIN_PX: i32 = 8;

/// Maximum number of screens the menu can hold
pub const MAX_SCREENS: usize = 4;

/// Button that opens the chart from the home screen
pub const OPEN_CHART_BUTTON: crate::ui::ButtonId = 0;

/// Capacity of formatted text rows
pub const TEXT_ROW_CAPACITY: usize = 48;
