//! Sampled input types: Joystick, InputSnapshot.

/// Joystick with raw X/Y axis readings.
///
/// Values are in the sensor's native resolution (0-1023 on a 10-bit ADC).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Joystick {
    pub x: u16,
    pub y: u16,
}

impl Joystick {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self { x: 0, y: 0 };
}

/// One cycle's worth of sampled transmitter inputs.
///
/// Digital inputs are stored as logical states (`true` = pressed/closed)
/// after polarity has been applied, so the 0/1 wire values can never hold
/// anything else.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    /// Buttons 1-4.
    pub buttons: [bool; 4],
    /// Switches 1-4.
    pub switches: [bool; 4],
    pub joystick1: Joystick,
    pub joystick2: Joystick,
    /// Raw battery sense reading.
    pub battery_raw: u16,
}

impl InputSnapshot {
    /// Snapshot with nothing pressed, all axes and the battery reading at 0.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            buttons: [false; 4],
            switches: [false; 4],
            joystick1: Joystick::ZERO,
            joystick2: Joystick::ZERO,
            battery_raw: 0,
        }
    }

    /// Digital states as 0/1 bytes in sampling order: buttons 1-4, then switches 1-4.
    #[must_use]
    pub fn digital(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        for (slot, &state) in out
            .iter_mut()
            .zip(self.buttons.iter().chain(self.switches.iter()))
        {
            *slot = u8::from(state);
        }
        out
    }

    /// Raw axes in order X1, Y1, X2, Y2.
    #[must_use]
    pub const fn axes(&self) -> [u16; 4] {
        [
            self.joystick1.x,
            self.joystick1.y,
            self.joystick2.x,
            self.joystick2.y,
        ]
    }
}
