#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::timer::timg::TimerGroup;
use log::{error, info};
use rtt_target::rprintln;
use static_cell::StaticCell;

// Display-LCD panel specific imports
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, models::ILI9342CRgb565};

use irqscope_core::config::ChartConfig;
use irqscope_core::framebuffer::FrameBuffer;
use irqscope_core::interrupts::Lane;
use irqscope_core::screens::{HomeScreen, InterruptScreen, Menu, ScreenWrapper};
use irqscope_core::ui::{Action, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, FrameContext, ScreenId};
use irqscope_firmware::inputs::{
    BUTTON_CHANNEL, RECORDERS, button_task, clear_sources, interrupt_source_task, now_tick,
};

extern crate alloc;
use alloc::boxed::Box;

/// UI refresh period (10 Hz)
const UI_TICK: Duration = Duration::from_millis(100);

/// SPI batching buffer size (larger = faster, uses more RAM)
const SPI_BUFFER_LEN: usize = 512;

static SPI_BUFFER: StaticCell<[u8; SPI_BUFFER_LEN]> = StaticCell::new();

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);
    // The framebuffer and its flushed shadow (300 KiB) live in PSRAM
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // Interrupt sources: active-low lines with pull-ups
    let source_config = InputConfig::default().with_pull(Pull::Up);
    let sources = [
        Input::new(peripherals.GPIO8, source_config),
        Input::new(peripherals.GPIO9, source_config),
        Input::new(peripherals.GPIO10, source_config),
    ];
    for (pin, lane) in sources.into_iter().zip(Lane::ALL) {
        spawner.spawn(interrupt_source_task(pin, lane)).unwrap();
    }

    // Front-panel buttons, ids in wiring order
    let button_config = InputConfig::default().with_pull(Pull::Up);
    let buttons = [
        Input::new(peripherals.GPIO1, button_config),
        Input::new(peripherals.GPIO2, button_config),
        Input::new(peripherals.GPIO5, button_config),
        Input::new(peripherals.GPIO6, button_config),
        Input::new(peripherals.GPIO7, button_config),
        Input::new(peripherals.GPIO13, button_config),
    ];
    for (id, pin) in buttons.into_iter().enumerate() {
        spawner.spawn(button_task(pin, id as u8)).unwrap();
    }

    // Configure and initialize the display

    // 1. Configure SPI bus
    let spi_bus = Spi::new(peripherals.SPI2, Config::default())
        .unwrap()
        .with_sck(peripherals.GPIO36)
        .with_mosi(peripherals.GPIO37);

    // 2. Create a dummy CS pin (we don't use hardware CS for this display)
    let cs = Output::new(peripherals.GPIO3, Level::High, OutputConfig::default());

    // 3. Wrap the SPI bus as a SPI device (required by embedded-hal traits)
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs).unwrap();

    // 4. Set up DC (Data/Command) pin
    let dc = Output::new(peripherals.GPIO35, Level::Low, OutputConfig::default());

    // 5. Claim the static buffer for SPI batching
    let spi_buffer = SPI_BUFFER.init([0u8; SPI_BUFFER_LEN]);

    // 6. Create display interface
    let di = SpiInterface::new(spi_device, dc, spi_buffer);

    // 7. Build and initialize the display driver
    let mut display = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut embassy_time::Delay)
        .expect("Failed to initialize display");

    rprintln!("Display initialized!");

    let chart_config = ChartConfig::default();
    let mut menu = Menu::new(ScreenId::Home);
    menu.register(ScreenWrapper::Home(Box::new(HomeScreen::new(
        chart_config.colors,
        chart_config.background,
    ))));
    menu.register(ScreenWrapper::Interrupts(Box::new(InterruptScreen::create(
        chart_config,
    ))));
    menu.start(&FrameContext::at(now_tick()));

    let mut framebuffer = Box::new(FrameBuffer::new());
    let mut ticker = Ticker::every(UI_TICK);

    loop {
        let event = select(BUTTON_CHANNEL.receive(), ticker.next()).await;
        let ctx = FrameContext::at(now_tick());

        match event {
            Either::First(button) => {
                if let Some(Action::ClearSources(lane)) = menu.press(&ctx, button) {
                    clear_sources(lane);
                }
            }
            Either::Second(()) => {
                for lane in Lane::ALL {
                    menu.set_list(RECORDERS[lane.index()].snapshot(), lane);
                }
                menu.tick(&ctx);
            }
        }

        // FrameBuffer drawing is infallible
        let _ = menu.render(framebuffer.as_mut());
        if let Err(e) = framebuffer.flush(&mut display) {
            error!("Display flush failed: {:?}", e);
        }
    }
}
