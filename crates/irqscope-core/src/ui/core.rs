//! Core UI types shared by screens and the menu driver

use crate::interrupts::{Lane, Tick};

/// Identifier of a hardware or simulated button
pub type ButtonId = u8;

/// Screen identifier for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScreenId {
    Home,
    Interrupts,
}

/// Requests a screen hands back to the menu driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Make another screen active
    SwitchTo(ScreenId),
    /// Force a full redraw of the active screen
    Redraw,
    /// The chart dropped a source's events (`None`: all sources); the
    /// producer should forget them too so the next snapshot stays empty
    ClearSources(Option<Lane>),
}

/// Per-call context supplied by the menu driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameContext {
    /// Current tick of the same clock that timestamps interrupts
    pub now: Tick,
}

impl FrameContext {
    pub const fn at(now: Tick) -> Self {
        Self { now }
    }
}
