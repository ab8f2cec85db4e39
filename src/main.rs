#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    config::{Config as NrfConfig, Debug, HfclkSource, LfclkSource},
    gpio::{Input, Level, Output, OutputDrive, Pull},
    interrupt::Priority,
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Ticker, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, battery::Battery, button::SideButton, display::Display};
use system::time::TimeManager;

// Watch face
use surfreport::{
    battery::{BatteryChargeState, BatteryMonitor},
    config::{Config, Palette},
    time::{TickTimer, TimeUnit},
    ui::{self, resources::ResourcePack, SurfWatchface, WatchFace},
};

// Others
use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use enumset::EnumSet;
use static_cell::StaticCell;

// Include build time UTC epoch
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

const PALETTE: Palette<Rgb565> = Palette::new(Rgb565::WHITE, Rgb565::BLACK);

// Peripherals that stay configured but are not owned by a task
static BACKLIGHT: StaticCell<Backlight<'static>> = StaticCell::new();

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryChargeState> = Signal::new();
static BUTTON_EVENT: Signal<ThreadModeRawMutex, ui::Button> = Signal::new();
static TICK: Signal<ThreadModeRawMutex, (NaiveDateTime, EnumSet<TimeUnit>)> = Signal::new();

/// Clocks, regulator and interrupt priorities of the nRF52832
fn board_config() -> NrfConfig {
    // `Config` is `non_exhaustive`
    let mut config = NrfConfig::default();

    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;
    // DC/DC regulator, much lower runtime current
    config.dcdc.reg1 = true;
    // Button and tick timer below the SAADC and SPIM defaults
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    config.debug = Debug::Allowed;

    config
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: SideButton<'static>) {
    loop {
        if let Some(event) = button.poll().await {
            BUTTON_EVENT.signal(event);
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, mut monitor: BatteryMonitor) {
    loop {
        match battery.read().await {
            Ok(state) => {
                if monitor.update(state) {
                    defmt::info!("Battery status updated");
                    BATTERY_STATUS.signal(state);
                }
            }
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Sample the clock and emit tick events for the subscribed units.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager, mut ticks: TickTimer) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        // Without a clock there is nothing to show
        let now = unwrap!(clock.get_time());
        if let Some(units) = ticks.poll(now) {
            TICK.signal((now, units));
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Deliver events to the watch face and redraw what changed.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<'static>, mut face: SurfWatchface<Rgb565>) {
    let mut tick = Ticker::every(Duration::from_millis(50));
    loop {
        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.level.percent(),
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            face.on_battery_change(status);
        }

        if TICK.signaled() {
            let (now, units) = TICK.wait().await;
            match face.on_tick(&now, units) {
                Ok(()) => defmt::debug!("Clock {}", face.reading().time.as_str()),
                Err(e) => defmt::error!("Time update failed: {}", e),
            }
        }

        if BUTTON_EVENT.signaled() {
            let button = BUTTON_EVENT.wait().await;
            if let Err(e) = face.on_button(button) {
                defmt::error!("Button handling failed: {}", e);
            }
        }

        if !face.dirty().is_empty() {
            match display.render(&mut face) {
                Ok(regions) => defmt::debug!("Redrew regions {=u8:b}", regions.as_u8()),
                Err(e) => defmt::warn!("Display update failed: {}", e),
            }
        }

        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(board_config());
    defmt::info!("Initializing");

    let config = Config::default();

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        2,
    );
    defmt::info!("Backlight level {}", backlight.brightness());
    // Dropping the pins would switch the backlight off
    BACKLIGHT.init(backlight);

    // Initialize Battery
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    let mut monitor = BatteryMonitor::new();
    let initial_battery = match battery.read().await {
        Ok(state) => state,
        Err(e) => {
            defmt::warn!("Battery measurement failed: {}", e);
            BatteryChargeState::default()
        }
    };
    monitor.update(initial_battery);

    // Initialize Button
    let button = SideButton::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        &mut Delay,
    ));
    unwrap!(display.clear(PALETTE.background));

    // Initialize clock
    let clock = TimeManager::init(UTC_TIME, config.utc_offset_secs);
    let now = unwrap!(clock.get_time());
    let mut ticks = TickTimer::new(config.tick_units);
    ticks.poll(now);

    // Initialize watch face with the current time and battery state
    let mut face = unwrap!(SurfWatchface::new(config, PALETTE, &ResourcePack::builtin()));
    unwrap!(face.on_tick(&now, EnumSet::all()));
    face.on_battery_change(initial_battery);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_battery_status(battery, monitor)));
    unwrap!(spawner.spawn(update_time(clock, ticks)));
    unwrap!(spawner.spawn(update_lcd(display, face)));
}
