//! On-device screens and the menu that drives them

pub mod constants;
mod home;
mod interrupt;
mod menu;
mod screen;

pub use home::{HomeScreen, SourceSummary};
pub use interrupt::InterruptScreen;
pub use menu::Menu;
pub use screen::{Screen, ScreenWrapper};
