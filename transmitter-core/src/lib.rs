//! Platform-agnostic sampling, battery alert and transmit loop for an RC transmitter.
//!
//! This crate provides the transmitter logic without any chip-specific
//! dependencies. It can be used both in embedded `no_std` firmware and on
//! host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Pin roles, thresholds and timing ([`TransmitterConfig`])
//! - [`input`]: Hardware read trait and sampler ([`InputHal`], [`InputSampler`])
//! - [`battery`]: Voltage sensing and low-battery beeps ([`BatteryMonitor`])
//! - [`clock`]: Time source and period gate ([`Clock`], [`PeriodGate`])
//! - [`output`]: Radio and diagnostic sinks ([`RadioLink`], [`DiagnosticSink`])
//! - [`nrf24`]: Transmit-only nRF24L01+ driver ([`Nrf24`])
//! - [`diagnostics`]: The per-cycle text line
//! - [`transmit`]: Ties everything together ([`TransmitLoop`])
//!
//! # Cycle
//!
//! Every `period_us` the loop samples all inputs, builds the 12-byte
//! packet, updates the battery alert from the same sample, hands the packet
//! to the radio and emits one diagnostic line. There are no
//! acknowledgments and no retries; a lost packet is simply replaced by the
//! next one.
//!
//! # Example
//!
//! ```rust
//! use transmitter_core::{
//!     InputError, InputHal, MockClock, NullSink, RadioError, RadioLink, TransmitLoop,
//!     TransmitterConfig,
//! };
//! # use core::convert::Infallible;
//! # struct Pin;
//! # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! struct Board;
//!
//! impl InputHal for Board {
//!     fn digital_read(&mut self, _pin: u8) -> Result<bool, InputError> {
//!         Ok(true)
//!     }
//!     fn analog_read(&mut self, _pin: u8) -> Result<u16, InputError> {
//!         Ok(818)
//!     }
//! }
//!
//! struct Radio;
//!
//! impl RadioLink for Radio {
//!     fn send(&mut self, _payload: &[u8]) -> Result<(), RadioError> {
//!         Ok(())
//!     }
//! }
//!
//! let config = TransmitterConfig::DEFAULT;
//! let mut tx = TransmitLoop::new(&config, Board, Radio, Pin, MockClock::new(), NullSink);
//!
//! assert!(tx.poll().is_none());
//! tx.clock().advance_ms(10);
//! let report = tx.poll().unwrap();
//! assert_eq!(report.packet.to_bytes()[..8], [0; 8]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod battery;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod input;
pub mod nrf24;
pub mod output;
pub mod transmit;

// Re-export main types at crate root
pub use battery::{voltage_from_raw, AlertState, BatteryMonitor};
pub use clock::{Clock, MockClock, PeriodGate};
pub use config::{
    ActiveLevel, BatteryConfig, InputConfig, InputLine, SwitchThreshold, TransmitterConfig,
};
pub use diagnostics::format_line;
pub use input::{InputError, InputHal, InputSampler};
pub use nrf24::{pipe_address, CrcMode, DataRate, Nrf24, PowerLevel, RadioConfig};
pub use output::{DiagnosticSink, NullSink, RadioError, RadioLink};
pub use transmit::{CycleReport, LinkStats, TransmitLoop};
pub use transmitter_proto::{
    AxisEncoding, InputSnapshot, Joystick, JoystickRouting, PacketBuilder, RadioPacket,
    PACKET_SIZE,
};
