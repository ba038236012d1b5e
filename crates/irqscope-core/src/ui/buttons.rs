//! Button dispatch table
//!
//! Maps raw button ids onto chart actions. The integrating application
//! decides what each physical button does; [`ButtonMap::default`] provides
//! the bindings used by the firmware and simulator.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::core::{ButtonId, ScreenId};
use crate::error::{ChartError, ChartResult};
use crate::interrupts::Lane;

/// Maximum number of button bindings
pub const MAX_BUTTON_BINDINGS: usize = 8;

/// Effect of a button press on the chart screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Restart the time axis at the current tick
    ResetBaseline,
    /// Drop one lane's events
    ClearLane(Lane),
    /// Drop every lane's events
    ClearAll,
    /// Show or hide one lane
    ToggleLane(Lane),
    /// Recompute and redraw immediately
    Refresh,
    /// Leave for another screen
    SwitchTo(ScreenId),
}

/// One `button id -> action` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ButtonBinding {
    button: ButtonId,
    action: ButtonAction,
}

/// Fixed-capacity dispatch table keyed by button id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMap {
    bindings: Vec<ButtonBinding, MAX_BUTTON_BINDINGS>,
}

impl ButtonMap {
    /// Table with no bindings
    pub const fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `button` to `action`, replacing any previous binding
    pub fn bind(&mut self, button: ButtonId, action: ButtonAction) -> ChartResult<()> {
        if let Some(binding) = self.bindings.iter_mut().find(|b| b.button == button) {
            binding.action = action;
            return Ok(());
        }

        self.bindings
            .push(ButtonBinding { button, action })
            .map_err(|_| ChartError::ButtonMapFull {
                max: MAX_BUTTON_BINDINGS,
            })
    }

    /// Remove the binding for `button`, returning its action
    pub fn unbind(&mut self, button: ButtonId) -> Option<ButtonAction> {
        let index = self.bindings.iter().position(|b| b.button == button)?;
        Some(self.bindings.swap_remove(index).action)
    }

    /// Action bound to `button`
    pub fn action_for(&self, button: ButtonId) -> Option<ButtonAction> {
        self.bindings
            .iter()
            .find(|b| b.button == button)
            .map(|b| b.action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for ButtonMap {
    /// 0: back to home, 1: reset baseline, 2: clear all, 3-5: toggle lanes 1-3
    fn default() -> Self {
        let mut map = Self::empty();
        let defaults = [
            (0, ButtonAction::SwitchTo(ScreenId::Home)),
            (1, ButtonAction::ResetBaseline),
            (2, ButtonAction::ClearAll),
            (3, ButtonAction::ToggleLane(Lane::First)),
            (4, ButtonAction::ToggleLane(Lane::Second)),
            (5, ButtonAction::ToggleLane(Lane::Third)),
        ];
        for (button, action) in defaults {
            // Six defaults always fit
            let _ = map.bind(button, action);
        }
        map
    }
}
