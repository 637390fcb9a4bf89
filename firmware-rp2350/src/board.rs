//! Board wiring: GPIO/ADC input binding, the board's transmitter
//! configuration and the concrete loop type.
//!
//! Pins are addressed by their GPIO number everywhere, so the
//! [`InputConfig`] below reads the same as the wiring table in the crate
//! docs.

use core::cell::RefCell;

use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use embassy_rp::adc::{Adc, Blocking as AdcBlocking, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use transmitter_core::{
    AxisEncoding, BatteryConfig, InputConfig, InputError, InputHal, InputLine, Nrf24,
    PacketBuilder, SwitchThreshold, TransmitLoop, TransmitterConfig,
};

use crate::clock::EmbassyClock;
use crate::diagnostics::DefmtSink;

/// Digital input pins wired on this board.
pub const DIGITAL_PINS: usize = 6;

/// ADC channels wired on this board.
pub const ANALOG_PINS: usize = 7;

/// Transmitter configuration for the RP2350B board.
///
/// 12-bit ADC, so the analog switch threshold and the axis encoding are
/// scaled up from the 10-bit defaults. The battery divider halves the pack
/// voltage into the 3.3 V ADC range.
pub const CONFIG: TransmitterConfig = TransmitterConfig {
    inputs: InputConfig {
        buttons: [
            InputLine::pull_up(6),
            InputLine::pull_up(5),
            InputLine::pull_up(4),
            InputLine::pull_up(3),
        ],
        switches: [
            InputLine::pull_up(7),
            InputLine::pull_up(8),
            InputLine::analog_pull_up(46),
            InputLine::analog_pull_up(47),
        ],
        joysticks: [40, 41, 42, 43],
        battery: 45,
        adc_max: 4095,
        switch_threshold: SwitchThreshold::Above(1600),
    },
    packet: PacketBuilder::DEFAULT.with_encoding(AxisEncoding::Scaled { bits: 12 }),
    battery: BatteryConfig {
        adc_max: 4095,
        full_scale_volts: 6.6,
        ..BatteryConfig::DEFAULT
    },
    ..TransmitterConfig::DEFAULT
};

/// SPI0 shared behind a blocking mutex so the radio gets its own chip select.
pub type RadioBus = Mutex<CriticalSectionRawMutex, RefCell<Spi<'static, SPI0, Blocking>>>;

/// nRF24 on SPI0 with CSN and CE as plain outputs.
pub type Radio = Nrf24<
    SpiDevice<'static, CriticalSectionRawMutex, Spi<'static, SPI0, Blocking>, Output<'static>>,
    Output<'static>,
>;

/// The transmit loop as wired on this board.
pub type Transmitter = TransmitLoop<
    BoardInputs<'static, DIGITAL_PINS, ANALOG_PINS>,
    Radio,
    Output<'static>,
    EmbassyClock,
    DefmtSink,
>;

/// [`InputHal`] over RP2350 GPIO inputs and ADC channels.
///
/// Each pin is stored with its GPIO number; reads of a number that was
/// not handed in at construction fail with [`InputError::UnknownPin`].
pub struct BoardInputs<'d, const D: usize, const A: usize> {
    digital: [(u8, Input<'d>); D],
    adc: Adc<'d, AdcBlocking>,
    analog: [(u8, Channel<'d>); A],
}

impl<'d, const D: usize, const A: usize> BoardInputs<'d, D, A> {
    #[must_use]
    pub fn new(
        adc: Adc<'d, AdcBlocking>,
        digital: [(u8, Input<'d>); D],
        analog: [(u8, Channel<'d>); A],
    ) -> Self {
        Self {
            digital,
            adc,
            analog,
        }
    }
}

impl<const D: usize, const A: usize> InputHal for BoardInputs<'_, D, A> {
    fn digital_read(&mut self, pin: u8) -> Result<bool, InputError> {
        self.digital
            .iter()
            .find(|(gpio, _)| *gpio == pin)
            .map(|(_, input)| input.is_high())
            .ok_or(InputError::UnknownPin)
    }

    fn analog_read(&mut self, pin: u8) -> Result<u16, InputError> {
        let (_, channel) = self
            .analog
            .iter_mut()
            .find(|(gpio, _)| *gpio == pin)
            .ok_or(InputError::UnknownPin)?;
        self.adc
            .blocking_read(channel)
            .map_err(|_| InputError::Conversion)
    }
}
