//! Interrupt sources and front-panel buttons
//!
//! Each source pin runs its own task awaiting falling edges and stamping
//! them into a static [`InterruptRecorder`]. Buttons are debounced and
//! their ids queued on [`BUTTON_CHANNEL`] for the UI loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::gpio::Input;
use log::{debug, info};

use irqscope_core::interrupts::{InterruptRecorder, LANE_COUNT, Lane, Tick};
use irqscope_core::ui::ButtonId;

/// Number of front-panel buttons wired to GPIOs
pub const BUTTON_COUNT: usize = 6;

/// Pending button presses not yet seen by the UI loop
const BUTTON_CHANNEL_CAPACITY: usize = 4;

/// Contact bounce settle time
const BUTTON_DEBOUNCE: Duration = Duration::from_millis(20);

/// One recorder per interrupt source, in lane order
pub static RECORDERS: [InterruptRecorder; LANE_COUNT] =
    [const { InterruptRecorder::new() }; LANE_COUNT];

/// Debounced button presses
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, ButtonId, BUTTON_CHANNEL_CAPACITY> =
    Channel::new();

/// Millisecond tick shared by the recorders and the UI loop
pub fn now_tick() -> Tick {
    // Wraps after ~49 days; all tick arithmetic is wrapping
    Instant::now().as_millis() as Tick
}

/// Timestamp every falling edge on `pin` into the recorder for `lane`
#[embassy_executor::task(pool_size = LANE_COUNT)]
pub async fn interrupt_source_task(mut pin: Input<'static>, lane: Lane) {
    info!("Interrupt source {} armed", lane.label());
    let recorder = &RECORDERS[lane.index()];

    loop {
        pin.wait_for_falling_edge().await;
        recorder.record(now_tick());
    }
}

/// Debounce an active-low button and queue its id
#[embassy_executor::task(pool_size = BUTTON_COUNT)]
pub async fn button_task(mut pin: Input<'static>, button: ButtonId) {
    info!("Button {} task started", button);

    loop {
        pin.wait_for_falling_edge().await;
        Timer::after(BUTTON_DEBOUNCE).await;

        if pin.is_low() {
            debug!("Button {} pressed", button);
            BUTTON_CHANNEL.send(button).await;
            pin.wait_for_rising_edge().await;
            Timer::after(BUTTON_DEBOUNCE).await;
        }
    }
}

/// Forget recorded events for one source, or all of them
pub fn clear_sources(lane: Option<Lane>) {
    match lane {
        Some(lane) => RECORDERS[lane.index()].clear(),
        None => RECORDERS.iter().for_each(|recorder| recorder.clear()),
    }
    info!("Cleared sources: {:?}", lane);
}
