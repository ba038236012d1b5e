//! Desktop simulator for the irqscope interrupt chart.
//!
//! Renders irqscope-core screens in an SDL2 window via
//! `embedded-graphics-simulator`. Three synthetic interrupt sources feed the
//! recorders so the chart can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key   | Action                                   |
//! |-------|------------------------------------------|
//! | 0..5  | Front-panel button with the same id      |
//! | Q/Esc | Quit                                     |
//!
//! With the default button map: 0 toggles between home and chart, 1 resets
//! the time baseline, 2 clears all sources and 3-5 hide or show a lane.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::info;

use irqscope_core::config::ChartConfig;
use irqscope_core::interrupts::{InterruptRecorder, LANE_COUNT, Lane, Tick};
use irqscope_core::screens::{HomeScreen, InterruptScreen, Menu, ScreenWrapper};
use irqscope_core::ui::{Action, ButtonId, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, FrameContext, ScreenId};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between chart updates, matching the firmware UI loop.
const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Synthetic interrupt sources
// ---------------------------------------------------------------------------

/// Shape of a synthetic interrupt train.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Fixed period in ms.
    Steady { period: Tick },
    /// Period swinging around `base` by `swing` over `cycle` ms.
    Modulated { base: f64, swing: f64, cycle: f64 },
    /// `count` events `spacing` ms apart, repeated every `every` ms.
    Burst { every: Tick, count: u32, spacing: Tick },
}

/// Emits ticks for one pattern, one call per frame.
struct SyntheticSource {
    pattern: Pattern,
    next_due: Tick,
    burst_index: u32,
}

impl SyntheticSource {
    fn new(pattern: Pattern, first_due: Tick) -> Self {
        Self {
            pattern,
            next_due: first_due,
            burst_index: 0,
        }
    }

    /// Record every event due up to `now`.
    fn emit_until<const N: usize>(&mut self, now: Tick, recorder: &InterruptRecorder<N>) {
        while self.next_due <= now {
            recorder.record(self.next_due);
            self.next_due += self.next_gap();
        }
    }

    fn next_gap(&mut self) -> Tick {
        match self.pattern {
            Pattern::Steady { period } => period,
            Pattern::Modulated { base, swing, cycle } => {
                let phase = self.next_due as f64 / cycle * core::f64::consts::TAU;
                (base + swing * phase.sin()).max(1.0) as Tick
            }
            Pattern::Burst {
                every,
                count,
                spacing,
            } => {
                self.burst_index += 1;
                if self.burst_index < count {
                    spacing
                } else {
                    self.burst_index = 0;
                    every.saturating_sub(spacing * (count - 1)).max(1)
                }
            }
        }
    }
}

fn synthetic_sources() -> [SyntheticSource; LANE_COUNT] {
    [
        SyntheticSource::new(Pattern::Steady { period: 50 }, 50),
        SyntheticSource::new(
            Pattern::Modulated {
                base: 120.0,
                swing: 80.0,
                cycle: 6_000.0,
            },
            80,
        ),
        SyntheticSource::new(
            Pattern::Burst {
                every: 2_500,
                count: 8,
                spacing: 45,
            },
            500,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a front-panel button id.
fn keycode_to_button(keycode: Keycode) -> Option<ButtonId> {
    match keycode {
        Keycode::Num0 | Keycode::Kp0 => Some(0),
        Keycode::Num1 | Keycode::Kp1 => Some(1),
        Keycode::Num2 | Keycode::Kp2 => Some(2),
        Keycode::Num3 | Keycode::Kp3 => Some(3),
        Keycode::Num4 | Keycode::Kp4 => Some(4),
        Keycode::Num5 | Keycode::Kp5 => Some(5),
        _ => None,
    }
}

fn build_menu(config: ChartConfig, ctx: &FrameContext) -> Menu {
    let mut menu = Menu::new(ScreenId::Home);
    menu.register(ScreenWrapper::Home(Box::new(HomeScreen::new(
        config.colors,
        config.background,
    ))));
    menu.register(ScreenWrapper::Interrupts(Box::new(InterruptScreen::create(
        config,
    ))));
    menu.start(ctx);
    menu
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting irqscope simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: 0-5=buttons  Q=Quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("irqscope simulator", &output_settings);

    let recorders: [InterruptRecorder; LANE_COUNT] = [
        InterruptRecorder::new(),
        InterruptRecorder::new(),
        InterruptRecorder::new(),
    ];
    let mut sources = synthetic_sources();

    let start = Instant::now();
    let now = || FrameContext::at(start.elapsed().as_millis() as Tick);

    let mut menu = build_menu(ChartConfig::default(), &now());
    let mut last_update = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    let _ = menu.render(&mut display);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();
        let ctx = now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    let Some(button) = keycode_to_button(keycode) else {
                        continue;
                    };
                    if let Some(Action::ClearSources(lane)) = menu.press(&ctx, button) {
                        match lane {
                            Some(lane) => recorders[lane.index()].clear(),
                            None => recorders.iter().for_each(|recorder| recorder.clear()),
                        }
                        info!("Cleared sources: {:?}", lane);
                    }
                }

                _ => {}
            }
        }

        // --- Synthetic interrupts -----------------------------------------
        for (source, recorder) in sources.iter_mut().zip(recorders.iter()) {
            source.emit_until(ctx.now, recorder);
        }

        // --- Snapshot + update tick ---------------------------------------
        if last_update.elapsed() >= UPDATE_INTERVAL {
            for lane in Lane::ALL {
                menu.set_list(recorders[lane.index()].snapshot(), lane);
            }
            menu.tick(&ctx);
            last_update = Instant::now();
        }

        // --- Render -------------------------------------------------------
        if let Err(e) = menu.render(&mut display) {
            log::error!("Draw error: {:?}", e);
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!(
        "Simulator exiting after {} interrupts",
        recorders.iter().map(|recorder| recorder.total()).sum::<u32>()
    );
}
