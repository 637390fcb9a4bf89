//! Input snapshot types and radio packet format for the RC transmitter.
//!
//! This crate provides everything that crosses the radio link:
//!
//! - **Types**: Sampled input state
//!   - [`InputSnapshot`] - Buttons, switches, joysticks and battery reading of one cycle
//!   - [`Joystick`] - Raw X/Y axis pair
//!
//! - **Packet**: The 12-byte wire record
//!   - [`RadioPacket`] - Named fields in wire order
//!   - [`RadioPacket::to_bytes()`] / [`RadioPacket::from_bytes()`]
//!
//! - **Builder**: Snapshot to packet conversion
//!   - [`PacketBuilder`] - Joystick routing and axis encoding policy
//!
//! # Wire Format
//!
//! ```text
//! byte:  0   1   2   3   4   5   6   7   8    9    10   11
//!        S1  S2  S3  S4  B1  B2  B3  B4  J1X  J1Y  J2X  J2Y
//! ```
//!
//! Digital fields are `0` or `1`. Joystick fields carry one byte per axis,
//! encoded according to [`AxisEncoding`], or `0` when joysticks are not
//! routed into the packet. The receiver reads the fields in exactly this
//! order.
//!
//! # Example
//!
//! ```
//! use transmitter_proto::{InputSnapshot, Joystick, PacketBuilder, PACKET_SIZE};
//!
//! let snapshot = InputSnapshot {
//!     buttons: [true, false, false, false],
//!     joystick1: Joystick::new(512, 512),
//!     ..InputSnapshot::released()
//! };
//!
//! let packet = PacketBuilder::DEFAULT.build(&snapshot);
//! let bytes = packet.to_bytes();
//! assert_eq!(bytes.len(), PACKET_SIZE);
//! assert_eq!(bytes[4], 1);
//! assert_eq!(bytes[8], 0x80);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod builder;
pub mod packet;
pub mod types;

pub use builder::{encode_axis, AxisEncoding, JoystickRouting, PacketBuilder};
pub use packet::{PacketError, RadioPacket, PACKET_SIZE};
pub use types::{InputSnapshot, Joystick};
