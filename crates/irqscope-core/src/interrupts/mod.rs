//! Interrupt event bookkeeping
//!
//! Each of the three interrupt sources owns a bounded, chronologically
//! ordered [`InterruptTimeList`]. Interrupt context writes into an
//! [`InterruptRecorder`]; the main loop takes snapshots of it and hands them
//! to the chart screen.

mod recorder;
mod time_list;

pub use recorder::InterruptRecorder;
pub use time_list::{DEFAULT_TIME_LIST_CAPACITY, InterruptTimeList};

use crate::error::{ChartError, ChartResult};

/// Monotonic millisecond tick count since boot
///
/// Differences between ticks are always taken with `wrapping_sub`.
pub type Tick = u32;

/// Number of interrupt sources charted side by side
pub const LANE_COUNT: usize = 3;

/// One of the three interrupt source slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Lane {
    First,
    Second,
    Third,
}

impl Lane {
    /// All lanes in draw order
    pub const ALL: [Lane; LANE_COUNT] = [Lane::First, Lane::Second, Lane::Third];

    /// Map the external 1-based list number onto a lane
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }

    /// 1-based list number of this lane
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based array index of this lane
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Short label drawn next to the lane
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "IRQ1",
            Self::Second => "IRQ2",
            Self::Third => "IRQ3",
        }
    }
}

impl TryFrom<u8> for Lane {
    type Error = ChartError;

    fn try_from(number: u8) -> ChartResult<Self> {
        Self::from_number(number).ok_or(ChartError::InvalidLane { number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_numbers_round_trip() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_number(lane.number()), Some(lane));
        }
    }

    #[test]
    fn test_lane_rejects_out_of_range() {
        assert_eq!(Lane::from_number(0), None);
        assert_eq!(Lane::from_number(4), None);
        assert_eq!(
            Lane::try_from(7u8),
            Err(ChartError::InvalidLane { number: 7 })
        );
    }
}
