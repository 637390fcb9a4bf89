//! Snapshot to packet conversion.
//!
//! [`PacketBuilder`] is a small policy value: it decides whether joystick
//! axes are carried in the packet and how a multi-bit ADC reading is folded
//! into one byte. Building is pure, the same snapshot always yields the same
//! packet.
//!
//! # Example
//!
//! ```
//! use transmitter_proto::{AxisEncoding, InputSnapshot, Joystick, JoystickRouting, PacketBuilder};
//!
//! let snapshot = InputSnapshot {
//!     joystick1: Joystick::new(1023, 0),
//!     ..InputSnapshot::released()
//! };
//!
//! let packet = PacketBuilder::DEFAULT.build(&snapshot);
//! assert_eq!(packet.joystick_x1, 0xFF);
//!
//! let packet = PacketBuilder::DEFAULT
//!     .with_routing(JoystickRouting::Zeroed)
//!     .build(&snapshot);
//! assert_eq!(packet.joystick_x1, 0);
//! ```

use crate::packet::RadioPacket;
use crate::types::InputSnapshot;

/// How a raw axis reading is reduced to one packet byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisEncoding {
    /// Clamp to the sensor range, then keep the top 8 bits.
    ///
    /// A 10-bit reading of 512 becomes `0x80`.
    Scaled {
        /// Sensor resolution in bits (8-16).
        bits: u8,
    },
    /// Keep only the low byte of the reading.
    ///
    /// This is what a plain narrowing assignment does and what older
    /// receivers may expect. Readings above 255 wrap around, so the byte
    /// does not track stick position monotonically.
    LowByte,
}

/// Whether joystick axes are carried in the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickRouting {
    /// Encode the four axes into bytes 8-11.
    Routed,
    /// Send bytes 8-11 as zero. The packet keeps its full size.
    Zeroed,
}

/// Reduce a raw axis reading to one byte.
#[inline]
#[must_use]
pub fn encode_axis(value: u16, encoding: AxisEncoding) -> u8 {
    match encoding {
        AxisEncoding::Scaled { bits } => {
            let bits = bits.clamp(8, 16);
            let max = ((1u32 << bits) - 1) as u16;
            let clamped = value.min(max);
            (clamped >> (bits - 8)) as u8
        }
        AxisEncoding::LowByte => value as u8,
    }
}

/// Builds [`RadioPacket`]s from [`InputSnapshot`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketBuilder {
    pub routing: JoystickRouting,
    pub encoding: AxisEncoding,
}

impl PacketBuilder {
    /// Joysticks routed, 10-bit readings scaled to a byte.
    pub const DEFAULT: Self = Self {
        routing: JoystickRouting::Routed,
        encoding: AxisEncoding::Scaled { bits: 10 },
    };

    #[must_use]
    pub const fn new(routing: JoystickRouting, encoding: AxisEncoding) -> Self {
        Self { routing, encoding }
    }

    /// Set the joystick routing.
    #[must_use]
    pub const fn with_routing(self, routing: JoystickRouting) -> Self {
        Self { routing, ..self }
    }

    /// Set the axis encoding.
    #[must_use]
    pub const fn with_encoding(self, encoding: AxisEncoding) -> Self {
        Self { encoding, ..self }
    }

    /// Convert a snapshot into a packet.
    #[must_use]
    pub fn build(&self, snapshot: &InputSnapshot) -> RadioPacket {
        let [x1, y1, x2, y2] = match self.routing {
            JoystickRouting::Routed => snapshot.axes().map(|v| encode_axis(v, self.encoding)),
            JoystickRouting::Zeroed => [0; 4],
        };

        RadioPacket {
            switch1: u8::from(snapshot.switches[0]),
            switch2: u8::from(snapshot.switches[1]),
            switch3: u8::from(snapshot.switches[2]),
            switch4: u8::from(snapshot.switches[3]),
            button1: u8::from(snapshot.buttons[0]),
            button2: u8::from(snapshot.buttons[1]),
            button3: u8::from(snapshot.buttons[2]),
            button4: u8::from(snapshot.buttons[3]),
            joystick_x1: x1,
            joystick_y1: y1,
            joystick_x2: x2,
            joystick_y2: y2,
        }
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::DEFAULT
    }
}
