//! Menu driver: owns the screens, tracks the active one and runs the
//! setup / update / draw lifecycle.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

use super::constants::MAX_SCREENS;
use super::interrupt::InterruptScreen;
use super::screen::{Screen, ScreenWrapper};
use crate::interrupts::{InterruptTimeList, Lane};
use crate::ui::{Action, ButtonId, FrameContext, ScreenId};

struct ScreenSlot {
    screen: ScreenWrapper,
    setup_done: bool,
}

/// Hosts the screens and forwards ticks and button presses to the active one
pub struct Menu {
    slots: Vec<ScreenSlot, MAX_SCREENS>,
    current: ScreenId,
}

impl Menu {
    pub fn new(initial: ScreenId) -> Self {
        Self {
            slots: Vec::new(),
            current: initial,
        }
    }

    /// Register a screen; a second screen with the same id is ignored
    pub fn register(&mut self, screen: ScreenWrapper) {
        let id = screen.id();
        if self.slot(id).is_some() {
            warn!("Screen {:?} already registered", id);
            return;
        }
        if self
            .slots
            .push(ScreenSlot {
                screen,
                setup_done: false,
            })
            .is_err()
        {
            warn!("Menu full, dropping screen {:?}", id);
        }
    }

    /// Make `id` the active screen, running its setup the first time
    pub fn switch_to(&mut self, id: ScreenId, ctx: &FrameContext) {
        let Some(slot) = self.slot_mut(id) else {
            warn!("Cannot switch to unregistered screen {:?}", id);
            return;
        };

        if !slot.setup_done {
            debug!("Setting up screen {:?}", id);
            slot.screen.setup(ctx);
            slot.setup_done = true;
        }
        slot.screen.mark_dirty();

        info!("Active screen: {:?}", id);
        self.current = id;
    }

    /// Activate the initial screen
    pub fn start(&mut self, ctx: &FrameContext) {
        self.switch_to(self.current, ctx);
    }

    /// Periodic update of the active screen
    pub fn tick(&mut self, ctx: &FrameContext) {
        if let Some(slot) = self.current_slot_mut() {
            slot.screen.update(ctx);
        }
    }

    /// Draw the active screen if it is dirty; returns whether it drew
    pub fn render<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<bool, D::Error> {
        let Some(slot) = self.current_slot_mut() else {
            return Ok(false);
        };
        if !slot.screen.is_dirty() {
            return Ok(false);
        }
        slot.screen.draw(display)?;
        slot.screen.mark_clean();
        Ok(true)
    }

    /// Deliver a button press to the active screen
    ///
    /// Navigation and redraw requests are handled here; anything else is
    /// handed back to the caller.
    pub fn press(&mut self, ctx: &FrameContext, button: ButtonId) -> Option<Action> {
        let action = self.current_slot_mut()?.screen.on_button_pressed(ctx, button)?;
        debug!("Screen {:?} returned {:?}", self.current, action);

        match action {
            Action::SwitchTo(id) => {
                self.switch_to(id, ctx);
                None
            }
            Action::Redraw => {
                if let Some(slot) = self.current_slot_mut() {
                    slot.screen.mark_dirty();
                }
                None
            }
            Action::ClearSources(_) => Some(action),
        }
    }

    /// Hand a source snapshot to every screen that shows it
    pub fn set_list(&mut self, list: InterruptTimeList, lane: Lane) {
        for slot in self.slots.iter_mut() {
            if let ScreenWrapper::Home(home) = &mut slot.screen {
                home.set_summary(lane, &list);
            }
        }
        if let Some(chart) = self.interrupts_mut() {
            chart.set_list(list, lane);
        }
    }

    pub fn interrupts_mut(&mut self) -> Option<&mut InterruptScreen> {
        self.slots.iter_mut().find_map(|slot| match &mut slot.screen {
            ScreenWrapper::Interrupts(screen) => Some(screen.as_mut()),
            _ => None,
        })
    }

    pub fn current_screen_id(&self) -> ScreenId {
        self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.slot(self.current)
            .is_some_and(|slot| slot.screen.is_dirty())
    }

    fn slot(&self, id: ScreenId) -> Option<&ScreenSlot> {
        self.slots.iter().find(|slot| slot.screen.id() == id)
    }

    fn slot_mut(&mut self, id: ScreenId) -> Option<&mut ScreenSlot> {
        self.slots.iter_mut().find(|slot| slot.screen.id() == id)
    }

    fn current_slot_mut(&mut self) -> Option<&mut ScreenSlot> {
        let current = self.current;
        self.slot_mut(current)
    }
}
