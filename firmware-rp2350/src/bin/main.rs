#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, trace, warn};
use defmt_rtt as _;
use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use rc_transmitter_rp2350::board::RadioBus;
use rc_transmitter_rp2350::{
    AlertState, BoardInputs, DefmtSink, EmbassyClock, Nrf24, TransmitLoop, Transmitter, CONFIG,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// Image definition block the RP2350 boot ROM looks for.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// SPI0, shared so the radio driver gets a chip-select managing device.
static RADIO_BUS: StaticCell<RadioBus> = StaticCell::new();

/// nRF24 SPI clock; the chip tops out at 10 MHz.
const RADIO_SPI_HZ: u32 = 8_000_000;

/// Each attempt waits out the module's 100 ms power-on reset.
const RADIO_INIT_ATTEMPTS: u8 = 10;

const FAULT_REPORT_EVERY: u32 = 1000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RC transmitter starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Inputs ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let board = BoardInputs::new(
        adc,
        [
            (6, Input::new(p.PIN_6, Pull::Up)),
            (5, Input::new(p.PIN_5, Pull::Up)),
            (4, Input::new(p.PIN_4, Pull::Up)),
            (3, Input::new(p.PIN_3, Pull::Up)),
            (7, Input::new(p.PIN_7, Pull::Up)),
            (8, Input::new(p.PIN_8, Pull::Up)),
        ],
        [
            (40, Channel::new_pin(p.PIN_40, Pull::None)),
            (41, Channel::new_pin(p.PIN_41, Pull::None)),
            (42, Channel::new_pin(p.PIN_42, Pull::None)),
            (43, Channel::new_pin(p.PIN_43, Pull::None)),
            (45, Channel::new_pin(p.PIN_45, Pull::None)),
            (46, Channel::new_pin(p.PIN_46, Pull::Up)),
            (47, Channel::new_pin(p.PIN_47, Pull::Up)),
        ],
    );

    // --- Buzzer ---
    let buzzer = Output::new(p.PIN_44, Level::Low);

    // --- Radio ---
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = RADIO_SPI_HZ;
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        spi_config,
    );
    let bus: &'static RadioBus = RADIO_BUS.init(Mutex::new(RefCell::new(spi)));
    let csn = Output::new(p.PIN_17, Level::High);
    let ce = Output::new(p.PIN_20, Level::Low);

    let mut radio = Nrf24::new(SpiDevice::new(bus, csn), ce, CONFIG.radio);
    match radio.init_with_retry(&mut Delay, RADIO_INIT_ATTEMPTS) {
        Ok(attempts) => info!(
            "nRF24 ready after {} attempt(s): channel {}, {} byte payload",
            attempts, CONFIG.radio.channel, CONFIG.radio.payload_width
        ),
        // Loop runs without a radio; packets are dropped
        Err(e) => warn!("nRF24 init failed: {}", e),
    }

    let tx = TransmitLoop::new(&CONFIG, board, radio, buzzer, EmbassyClock, DefmtSink);

    spawner.spawn(transmit_task(tx).unwrap());

    info!("Transmitting every {} us", CONFIG.effective_period_us());
}

/// Transmit task - polls the loop and reports state changes.
#[embassy_executor::task]
async fn transmit_task(mut tx: Transmitter) {
    let mut seen_faults = 0;
    let mut link_ok = true;
    let mut alert = AlertState::Idle;

    loop {
        if let Some(report) = tx.poll() {
            trace!("{}", report);

            if report.sent != link_ok {
                link_ok = report.sent;
                if link_ok {
                    info!("Radio send recovered");
                } else {
                    let stats = tx.stats();
                    warn!(
                        "Radio send failing ({} of {} cycles)",
                        stats.send_failures, stats.cycles
                    );
                }
            }

            // A dead pin faults every cycle, so only report every 1000th
            let faults = tx.read_faults();
            if faults / FAULT_REPORT_EVERY != seen_faults / FAULT_REPORT_EVERY
                || (seen_faults == 0 && faults > 0)
            {
                warn!("Input read faults: {}", faults);
            }
            seen_faults = faults;

            if report.alert != alert {
                if alert == AlertState::Idle {
                    warn!("Battery low: {=f32} V", report.voltage);
                }
                alert = report.alert;
            }
        }
        yield_now().await;
    }
}
