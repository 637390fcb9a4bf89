//! The fixed 12-byte radio packet.
//!
//! Fields are written into the buffer one by one in declared order. The
//! struct layout itself is never reinterpreted as bytes.

/// Size of a serialized [`RadioPacket`] in bytes.
pub const PACKET_SIZE: usize = 12;

/// Error type for packet encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Buffer length does not match what the operation needs.
    Length,
}

impl core::fmt::Display for PacketError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Length => write!(f, "packet length mismatch"),
        }
    }
}

/// Radio packet as seen by the receiver.
///
/// Field order is part of the wire contract: switches, buttons, then the
/// four joystick axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioPacket {
    pub switch1: u8,
    pub switch2: u8,
    pub switch3: u8,
    pub switch4: u8,
    pub button1: u8,
    pub button2: u8,
    pub button3: u8,
    pub button4: u8,
    pub joystick_x1: u8,
    pub joystick_y1: u8,
    pub joystick_x2: u8,
    pub joystick_y2: u8,
}

impl RadioPacket {
    /// Serialize into wire order.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        [
            self.switch1,
            self.switch2,
            self.switch3,
            self.switch4,
            self.button1,
            self.button2,
            self.button3,
            self.button4,
            self.joystick_x1,
            self.joystick_y1,
            self.joystick_x2,
            self.joystick_y2,
        ]
    }

    /// Serialize into the front of `buf`.
    ///
    /// Returns the number of bytes written (always [`PACKET_SIZE`]).
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Length`] if `buf` is shorter than [`PACKET_SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, PacketError> {
        let dst = buf.get_mut(..PACKET_SIZE).ok_or(PacketError::Length)?;
        dst.copy_from_slice(&self.to_bytes());
        Ok(PACKET_SIZE)
    }

    /// Decode a received frame.
    ///
    /// Receivers configured for a static payload width get the packet
    /// followed by padding, so trailing bytes beyond [`PACKET_SIZE`] are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::Length`] if `bytes` is shorter than [`PACKET_SIZE`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PacketError> {
        let b = bytes.get(..PACKET_SIZE).ok_or(PacketError::Length)?;
        Ok(Self {
            switch1: b[0],
            switch2: b[1],
            switch3: b[2],
            switch4: b[3],
            button1: b[4],
            button2: b[5],
            button3: b[6],
            button4: b[7],
            joystick_x1: b[8],
            joystick_y1: b[9],
            joystick_x2: b[10],
            joystick_y2: b[11],
        })
    }
}
