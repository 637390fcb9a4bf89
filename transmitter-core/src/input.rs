//! Hardware input trait and the input sampler.

use crate::config::{ActiveLevel, InputConfig, InputLine};
use transmitter_proto::{InputSnapshot, Joystick};

/// Error type for hardware input reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Pin is not wired up on this board.
    UnknownPin,
    /// GPIO read failed.
    Io,
    /// ADC conversion failed.
    Conversion,
}

/// Digital and analog read primitives of the board.
///
/// Pins are identified by the numbers used in [`InputConfig`]; the board
/// implementation owns the mapping to its peripherals.
pub trait InputHal {
    /// Read the electrical level of a digital pin (`true` = high).
    fn digital_read(&mut self, pin: u8) -> Result<bool, InputError>;

    /// Read an analog pin in the ADC's native resolution.
    fn analog_read(&mut self, pin: u8) -> Result<u16, InputError>;
}

/// Reads all configured lines into an [`InputSnapshot`].
///
/// Reads never fail the cycle. A digital line that cannot be read counts as
/// not pressed and an analog line as 0; each such read bumps
/// [`read_faults`](Self::read_faults).
#[derive(Debug, Clone)]
pub struct InputSampler {
    config: InputConfig,
    read_faults: u32,
}

impl InputSampler {
    #[must_use]
    pub const fn new(config: InputConfig) -> Self {
        Self {
            config,
            read_faults: 0,
        }
    }

    /// Sample every input once.
    pub fn sample<H: InputHal>(&mut self, hal: &mut H) -> InputSnapshot {
        let config = self.config;
        let buttons = config.buttons.map(|line| self.read_line(hal, line));
        let switches = config.switches.map(|line| self.read_line(hal, line));
        let [x1, y1, x2, y2] = config.joysticks.map(|pin| self.read_analog(hal, pin));
        let battery_raw = self.read_analog(hal, config.battery);

        InputSnapshot {
            buttons,
            switches,
            joystick1: Joystick::new(x1, y1),
            joystick2: Joystick::new(x2, y2),
            battery_raw,
        }
    }

    /// Total failed reads since start.
    #[must_use]
    pub const fn read_faults(&self) -> u32 {
        self.read_faults
    }

    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Logical state of one line (`true` = pressed/closed).
    fn read_line<H: InputHal>(&mut self, hal: &mut H, line: InputLine) -> bool {
        let (level, active) = match line {
            InputLine::Digital { pin, active } => (hal.digital_read(pin), active),
            InputLine::Analog { pin, active } => (
                hal.analog_read(pin)
                    .map(|raw| self.config.switch_threshold.level(raw)),
                active,
            ),
        };

        match level {
            Ok(high) => high == (active == ActiveLevel::High),
            Err(_) => {
                self.read_faults = self.read_faults.saturating_add(1);
                false
            }
        }
    }

    fn read_analog<H: InputHal>(&mut self, hal: &mut H, pin: u8) -> u16 {
        match hal.analog_read(pin) {
            Ok(raw) => raw.min(self.config.adc_max),
            Err(_) => {
                self.read_faults = self.read_faults.saturating_add(1);
                0
            }
        }
    }
}
