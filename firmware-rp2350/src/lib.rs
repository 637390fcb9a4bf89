//! nRF24 RC transmitter firmware for RP2350B.
//!
//! This crate binds the chip-agnostic [`transmitter_core`] loop to the
//! RP2350B peripherals: GPIO for buttons and switches, the ADC for
//! joysticks, analog switches and battery sense, SPI0 for the radio.
//!
//! # Hardware Configuration
//!
//! | Function        | GPIO   | Description |
//! |-----------------|--------|-------------|
//! | Buttons 1-4     | 6,5,4,3| Pull-up, pressed = low |
//! | Switches 1-2    | 7, 8   | Pull-up, closed = low |
//! | Switches 3-4    | 46, 47 | ADC6, ADC7, pull-up, closed = low |
//! | Joystick X1,Y1  | 40, 41 | ADC0, ADC1 |
//! | Joystick X2,Y2  | 42, 43 | ADC2, ADC3 |
//! | Buzzer          | 44     | Active high |
//! | Battery sense   | 45     | ADC5 via 1:2 divider |
//! | nRF24 MISO      | 16     | SPI0 RX |
//! | nRF24 CSN       | 17     | Chip select, active low |
//! | nRF24 SCK       | 18     | SPI0 clock |
//! | nRF24 MOSI      | 19     | SPI0 TX |
//! | nRF24 CE        | 20     | Chip enable |
//!
//! # Architecture
//!
//! A single embassy task owns the [`TransmitLoop`] and polls it, yielding to
//! the executor in between. Timestamps come from the embassy time driver
//! ([`EmbassyClock`]) and diagnostic lines go out over RTT ([`DefmtSink`]).
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");

// Re-export core types for convenience
pub use transmitter_core::{
    AlertState, CycleReport, InputError, InputHal, LinkStats, Nrf24, RadioError, RadioLink,
    TransmitLoop, TransmitterConfig,
};

pub mod board;
pub mod clock;
pub mod diagnostics;

pub use board::{BoardInputs, Transmitter, CONFIG};
pub use clock::EmbassyClock;
pub use diagnostics::DefmtSink;
