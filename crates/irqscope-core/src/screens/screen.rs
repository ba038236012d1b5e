//! Screen abstraction and type-erased wrapper for the menu driver.
//!
//! [`Screen`] is the lifecycle contract every on-device screen fulfils:
//! setup once, then update and draw in any order, plus button input.
//! [`ScreenWrapper`] stores the concrete screens in one enum so the
//! [`Menu`](super::menu::Menu) can hold them without trait objects.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

extern crate alloc;
use alloc::boxed::Box;

use super::home::HomeScreen;
use super::interrupt::InterruptScreen;
use crate::ui::{Action, ButtonId, FrameContext, ScreenId};

/// Trait that all menu screens implement.
///
/// The [`Menu`](super::menu::Menu) drives these in a fixed pattern:
///
/// 1. **`setup`**: exactly once, the first time the screen becomes active.
/// 2. **`update`**: periodically, to refresh derived state. Never draws.
/// 3. **`draw`**: after updates, or whenever the screen is dirty. Drawing
///    twice without an update in between yields the same frame.
/// 4. **`on_button_pressed`**: for each debounced button press.
pub trait Screen {
    /// Identifier used for navigation
    fn id(&self) -> ScreenId;

    /// Human-readable title
    fn title(&self) -> &str;

    /// One-time initialisation when the screen is first shown
    fn setup(&mut self, ctx: &FrameContext);

    /// Refresh derived state
    fn update(&mut self, ctx: &FrameContext);

    /// Render the screen
    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error>;

    /// React to a button press, optionally asking the menu to act
    fn on_button_pressed(&mut self, ctx: &FrameContext, button: ButtonId) -> Option<Action>;

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);
}

/// Enum-based wrapper over the concrete screens.
///
/// When adding a screen, add a variant here and extend the delegation below.
pub enum ScreenWrapper {
    Home(Box<HomeScreen>),
    Interrupts(Box<InterruptScreen>),
}

impl Screen for ScreenWrapper {
    fn id(&self) -> ScreenId {
        match self {
            ScreenWrapper::Home(screen) => screen.id(),
            ScreenWrapper::Interrupts(screen) => screen.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            ScreenWrapper::Home(screen) => screen.title(),
            ScreenWrapper::Interrupts(screen) => screen.title(),
        }
    }

    fn setup(&mut self, ctx: &FrameContext) {
        match self {
            ScreenWrapper::Home(screen) => screen.setup(ctx),
            ScreenWrapper::Interrupts(screen) => screen.setup(ctx),
        }
    }

    fn update(&mut self, ctx: &FrameContext) {
        match self {
            ScreenWrapper::Home(screen) => screen.update(ctx),
            ScreenWrapper::Interrupts(screen) => screen.update(ctx),
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        match self {
            ScreenWrapper::Home(screen) => screen.draw(display),
            ScreenWrapper::Interrupts(screen) => screen.draw(display),
        }
    }

    fn on_button_pressed(&mut self, ctx: &FrameContext, button: ButtonId) -> Option<Action> {
        match self {
            ScreenWrapper::Home(screen) => screen.on_button_pressed(ctx, button),
            ScreenWrapper::Interrupts(screen) => screen.on_button_pressed(ctx, button),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            ScreenWrapper::Home(screen) => screen.is_dirty(),
            ScreenWrapper::Interrupts(screen) => screen.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            ScreenWrapper::Home(screen) => screen.mark_clean(),
            ScreenWrapper::Interrupts(screen) => screen.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            ScreenWrapper::Home(screen) => screen.mark_dirty(),
            ScreenWrapper::Interrupts(screen) => screen.mark_dirty(),
        }
    }
}
