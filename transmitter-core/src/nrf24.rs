//! Transmit-only nRF24L01+ driver.
//!
//! The transceiver is configured once and then left in TX mode with CE held
//! high (standby-II). Each [`send`](RadioLink::send) only clears the status
//! flags and writes the payload into the TX FIFO; the chip starts the
//! transmission on its own. Auto-acknowledgment and retransmission are off,
//! so nothing ever waits for the air.
//!
//! # Wiring
//!
//! Any embedded-hal 1.0 [`SpiDevice`] (mode 0, up to 10 MHz, CSN handled by
//! the device) and a push-pull [`OutputPin`] for CE.

use crate::output::{RadioError, RadioLink};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

// Commands
const R_REGISTER: u8 = 0x00;
const W_REGISTER: u8 = 0x20;
const W_TX_PAYLOAD: u8 = 0xA0;
const FLUSH_TX: u8 = 0xE1;
const FLUSH_RX: u8 = 0xE2;
const NOP: u8 = 0xFF;

// Registers
const CONFIG: u8 = 0x00;
const EN_AA: u8 = 0x01;
const SETUP_AW: u8 = 0x03;
const SETUP_RETR: u8 = 0x04;
const RF_CH: u8 = 0x05;
const RF_SETUP: u8 = 0x06;
const STATUS: u8 = 0x07;
const RX_ADDR_P0: u8 = 0x0A;
const TX_ADDR: u8 = 0x10;
const RX_PW_P0: u8 = 0x11;
const DYNPD: u8 = 0x1C;
const FEATURE: u8 = 0x1D;

// CONFIG bits
const EN_CRC: u8 = 1 << 3;
const CRCO: u8 = 1 << 2;
const PWR_UP: u8 = 1 << 1;

// STATUS bits
const RX_DR: u8 = 1 << 6;
const TX_DS: u8 = 1 << 5;
const MAX_RT: u8 = 1 << 4;
const TX_FULL: u8 = 1 << 0;

// RF_SETUP bits
const RF_DR_LOW: u8 = 1 << 5;
const RF_DR_HIGH: u8 = 1 << 3;
const LNA_HCURR: u8 = 1 << 0;

/// Largest payload the chip accepts.
pub const MAX_PAYLOAD: usize = 32;

/// Address width in bytes.
pub const ADDRESS_WIDTH: usize = 5;

/// Power-on reset time; registers written earlier are lost.
const POWER_ON_RESET_MS: u32 = 100;

/// Pause between two configuration attempts.
const INIT_RETRY_MS: u32 = 100;

/// Air data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Kbps250,
    Mbps1,
    Mbps2,
}

impl DataRate {
    const fn rf_setup_bits(self) -> u8 {
        match self {
            Self::Kbps250 => RF_DR_LOW,
            Self::Mbps1 => 0,
            Self::Mbps2 => RF_DR_HIGH,
        }
    }
}

/// Transmit power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PowerLevel {
    const fn rf_setup_bits(self) -> u8 {
        let level = match self {
            Self::Min => 0,
            Self::Low => 1,
            Self::High => 2,
            Self::Max => 3,
        };
        level << 1
    }
}

/// Packet CRC length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcMode {
    OneByte,
    TwoBytes,
}

/// Radio parameters applied once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// RF channel, 2400 MHz + channel (0-125).
    pub channel: u8,
    pub data_rate: DataRate,
    pub power: PowerLevel,
    /// Request acknowledgments on pipe 0. Retransmission stays off either way.
    pub auto_ack: bool,
    pub crc: CrcMode,
    /// Destination address, least significant byte first as it goes over SPI.
    pub address: [u8; ADDRESS_WIDTH],
    /// Static payload width; shorter payloads are zero padded.
    pub payload_width: u8,
}

/// Convert a 40-bit pipe number into its on-air byte order.
#[must_use]
pub const fn pipe_address(pipe: u64) -> [u8; ADDRESS_WIDTH] {
    let b = pipe.to_le_bytes();
    [b[0], b[1], b[2], b[3], b[4]]
}

impl RadioConfig {
    /// Channel 90, 250 kbps, low power, no acknowledgments, pipe `0xE8E8F0F0E1`,
    /// 32-byte static payload.
    pub const DEFAULT: Self = Self {
        channel: 90,
        data_rate: DataRate::Kbps250,
        power: PowerLevel::Low,
        auto_ack: false,
        crc: CrcMode::TwoBytes,
        address: pipe_address(0xE8E8_F0F0_E1),
        payload_width: MAX_PAYLOAD as u8,
    };

    const fn config_register(&self) -> u8 {
        match self.crc {
            CrcMode::OneByte => EN_CRC | PWR_UP,
            CrcMode::TwoBytes => EN_CRC | CRCO | PWR_UP,
        }
    }

    const fn rf_setup_register(&self) -> u8 {
        self.data_rate.rf_setup_bits() | self.power.rf_setup_bits() | LNA_HCURR
    }

    fn payload_width(&self) -> usize {
        usize::from(self.payload_width).clamp(1, MAX_PAYLOAD)
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// nRF24L01+ in transmit-only mode.
pub struct Nrf24<SPI, CE> {
    spi: SPI,
    ce: CE,
    config: RadioConfig,
}

impl<SPI: SpiDevice, CE: OutputPin> Nrf24<SPI, CE> {
    #[must_use]
    pub fn new(spi: SPI, ce: CE, config: RadioConfig) -> Self {
        Self { spi, ce, config }
    }

    /// Configure the transceiver and enter TX standby.
    ///
    /// # Errors
    ///
    /// Returns [`RadioError::NotPresent`] if the channel register does not
    /// read back, which usually means the module is missing or miswired.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), RadioError> {
        self.ce.set_low().map_err(|_| RadioError::Pin)?;
        delay.delay_ms(POWER_ON_RESET_MS);

        let config = self.config;
        self.write_register(SETUP_RETR, 0)?;
        self.write_register(EN_AA, if config.auto_ack { 0x01 } else { 0x00 })?;
        self.write_register(SETUP_AW, (ADDRESS_WIDTH - 2) as u8)?;
        self.write_register(RF_CH, config.channel & 0x7F)?;
        self.write_register(RF_SETUP, config.rf_setup_register())?;
        self.write_register(DYNPD, 0)?;
        self.write_register(FEATURE, 0)?;
        self.write_address(TX_ADDR, &config.address)?;
        // Pipe 0 must match TX_ADDR for acknowledgments to come back
        self.write_address(RX_ADDR_P0, &config.address)?;
        self.write_register(RX_PW_P0, config.payload_width() as u8)?;
        self.command(FLUSH_TX)?;
        self.command(FLUSH_RX)?;
        self.write_register(STATUS, RX_DR | TX_DS | MAX_RT)?;
        self.write_register(CONFIG, config.config_register())?;
        // Standby-I settle time
        delay.delay_ms(2);

        if self.read_register(RF_CH)? != config.channel & 0x7F {
            return Err(RadioError::NotPresent);
        }

        self.ce.set_high().map_err(|_| RadioError::Pin)
    }

    /// [`init`](Self::init), repeated while the module does not answer.
    ///
    /// Returns the number of attempts it took.
    ///
    /// # Errors
    ///
    /// Returns the last error once `attempts` tries have failed, or any
    /// bus error straight away.
    pub fn init_with_retry<D: DelayNs>(
        &mut self,
        delay: &mut D,
        attempts: u8,
    ) -> Result<u8, RadioError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.init(delay) {
                Ok(()) => return Ok(attempt),
                Err(RadioError::NotPresent) if attempt < attempts => {
                    delay.delay_ms(INIT_RETRY_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Give back the bus device and CE pin.
    pub fn release(self) -> (SPI, CE) {
        (self.spi, self.ce)
    }

    fn command(&mut self, command: u8) -> Result<u8, RadioError> {
        let mut buf = [command];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|_| RadioError::Spi)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RadioError> {
        self.spi
            .write(&[W_REGISTER | register, value])
            .map_err(|_| RadioError::Spi)
    }

    fn write_address(
        &mut self,
        register: u8,
        address: &[u8; ADDRESS_WIDTH],
    ) -> Result<(), RadioError> {
        let mut buf = [0u8; ADDRESS_WIDTH + 1];
        buf[0] = W_REGISTER | register;
        buf[1..].copy_from_slice(address);
        self.spi.write(&buf).map_err(|_| RadioError::Spi)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, RadioError> {
        let mut buf = [R_REGISTER | register, 0];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|_| RadioError::Spi)?;
        Ok(buf[1])
    }
}

impl<SPI: SpiDevice, CE: OutputPin> RadioLink for Nrf24<SPI, CE> {
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
        let width = self.config.payload_width();
        if payload.len() > width {
            return Err(RadioError::PayloadTooLarge);
        }

        let status = self.command(NOP)?;
        if status & TX_FULL != 0 {
            // Nobody is draining the FIFO fast enough; newest data wins
            self.command(FLUSH_TX)?;
        }
        self.write_register(STATUS, TX_DS | MAX_RT)?;

        let mut frame = [0u8; MAX_PAYLOAD + 1];
        frame[0] = W_TX_PAYLOAD;
        frame[1..=payload.len()].copy_from_slice(payload);
        self.spi
            .write(&frame[..=width])
            .map_err(|_| RadioError::Spi)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};
    use std::vec::Vec;

    /// Register-file model of the chip that records every SPI frame.
    struct MockSpi {
        registers: [u8; 0x20],
        status: u8,
        frames: Vec<Vec<u8>>,
        /// Register reads still to come while the chip is in reset. Writes
        /// are dropped and reads return 0 until this runs out.
        reset_reads: usize,
    }

    impl MockSpi {
        fn new() -> Self {
            Self {
                registers: [0; 0x20],
                status: 0x0E,
                frames: Vec::new(),
                reset_reads: 0,
            }
        }

        fn handle(&mut self, frame: &mut [u8]) {
            self.frames.push(frame.to_vec());
            let command = frame[0];
            let in_reset = self.reset_reads > 0;
            if command & 0xE0 == W_REGISTER && frame.len() == 2 {
                if !in_reset {
                    self.registers[usize::from(command & 0x1F)] = frame[1];
                }
            } else if command & 0xE0 == R_REGISTER && frame.len() == 2 {
                frame[1] = if in_reset {
                    self.reset_reads -= 1;
                    0
                } else {
                    self.registers[usize::from(command & 0x1F)]
                };
            }
            frame[0] = self.status;
        }
    }

    impl ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            for op in operations {
                match op {
                    Operation::Write(buf) => {
                        let mut copy = buf.to_vec();
                        self.handle(&mut copy);
                    }
                    Operation::TransferInPlace(buf) => self.handle(buf),
                    _ => {}
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Adds up requested delays instead of waiting.
    #[derive(Default)]
    struct TotalDelay {
        ms: u64,
    }

    impl DelayNs for TotalDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ms += u64::from(ns) / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.ms += u64::from(ms);
        }
    }

    fn initialized(spi: &mut MockSpi, ce: &mut MockPin) {
        let mut radio = Nrf24::new(spi, ce, RadioConfig::DEFAULT);
        radio.init(&mut NoDelay).unwrap();
    }

    #[test]
    fn test_pipe_address_is_lsb_first() {
        assert_eq!(
            pipe_address(0xE8E8_F0F0_E1),
            [0xE1, 0xF0, 0xF0, 0xE8, 0xE8]
        );
    }

    #[test]
    fn test_init_writes_default_configuration() {
        let mut spi = MockSpi::new();
        let mut ce = MockPin::default();
        initialized(&mut spi, &mut ce);

        assert_eq!(spi.registers[usize::from(RF_CH)], 90);
        assert_eq!(spi.registers[usize::from(EN_AA)], 0x00);
        assert_eq!(spi.registers[usize::from(SETUP_RETR)], 0x00);
        // 250 kbps, -12 dBm, LNA gain
        assert_eq!(spi.registers[usize::from(RF_SETUP)], 0x23);
        assert_eq!(spi.registers[usize::from(RX_PW_P0)], 32);
        // PWR_UP, 16-bit CRC, PRIM_RX clear
        assert_eq!(spi.registers[usize::from(CONFIG)], 0x0E);
        assert!(spi.frames.contains(&std::vec![
            W_REGISTER | TX_ADDR,
            0xE1,
            0xF0,
            0xF0,
            0xE8,
            0xE8
        ]));
        assert!(ce.high, "CE left high for standby-II");
    }

    #[test]
    fn test_init_detects_missing_module() {
        /// Bus with nothing attached: reads float to 0xFF.
        struct EmptyBus;

        impl ErrorType for EmptyBus {
            type Error = Infallible;
        }

        impl SpiDevice for EmptyBus {
            fn transaction(
                &mut self,
                operations: &mut [Operation<'_, u8>],
            ) -> Result<(), Infallible> {
                for op in operations {
                    if let Operation::TransferInPlace(buf) = op {
                        buf.fill(0xFF);
                    }
                }
                Ok(())
            }
        }

        let mut radio = Nrf24::new(EmptyBus, MockPin::default(), RadioConfig::DEFAULT);
        assert_eq!(radio.init(&mut NoDelay), Err(RadioError::NotPresent));
        let (_, ce) = radio.release();
        assert!(!ce.high);
    }

    #[test]
    fn test_init_waits_for_power_on_reset() {
        let mut delay = TotalDelay::default();
        let mut radio = Nrf24::new(MockSpi::new(), MockPin::default(), RadioConfig::DEFAULT);
        radio.init(&mut delay).unwrap();
        assert!(delay.ms >= 100, "waited {} ms", delay.ms);
    }

    #[test]
    fn test_init_retries_until_module_answers() {
        let mut spi = MockSpi::new();
        spi.reset_reads = 1;
        let mut ce = MockPin::default();

        let mut radio = Nrf24::new(&mut spi, &mut ce, RadioConfig::DEFAULT);
        assert_eq!(radio.init_with_retry(&mut NoDelay, 5), Ok(2));

        assert_eq!(spi.registers[usize::from(RF_CH)], 90);
        assert_eq!(spi.registers[usize::from(CONFIG)], 0x0E);
        assert!(ce.high);
    }

    #[test]
    fn test_init_retry_gives_up() {
        let mut spi = MockSpi::new();
        spi.reset_reads = 10;
        let mut radio = Nrf24::new(&mut spi, MockPin::default(), RadioConfig::DEFAULT);
        assert_eq!(
            radio.init_with_retry(&mut NoDelay, 3),
            Err(RadioError::NotPresent)
        );
        let (_, ce) = radio.release();
        assert!(!ce.high);
        assert_eq!(spi.reset_reads, 7);
    }

    #[test]
    fn test_send_pads_to_payload_width() {
        let mut spi = MockSpi::new();
        let mut ce = MockPin::default();
        initialized(&mut spi, &mut ce);
        spi.frames.clear();

        let mut radio = Nrf24::new(&mut spi, &mut ce, RadioConfig::DEFAULT);
        radio.send(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]).unwrap();

        let frame = spi.frames.last().unwrap();
        assert_eq!(frame.len(), 33);
        assert_eq!(frame[0], W_TX_PAYLOAD);
        assert_eq!(&frame[1..13], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert!(frame[13..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_send_flushes_full_fifo() {
        let mut spi = MockSpi::new();
        spi.status = 0x0E | TX_FULL;
        let mut radio = Nrf24::new(&mut spi, MockPin::default(), RadioConfig::DEFAULT);
        radio.send(&[0; 12]).unwrap();

        assert!(spi.frames.contains(&std::vec![FLUSH_TX]));
    }

    #[test]
    fn test_send_rejects_oversized_payload() {
        let config = RadioConfig {
            payload_width: 12,
            ..RadioConfig::DEFAULT
        };
        let mut radio = Nrf24::new(MockSpi::new(), MockPin::default(), config);
        assert_eq!(radio.send(&[0; 13]), Err(RadioError::PayloadTooLarge));
        assert_eq!(radio.send(&[0; 12]), Ok(()));
    }
}
