//! Compile-time configuration: pin roles, thresholds, timing.
//!
//! Customize by creating your own `const`, usually with struct-update
//! syntax on one of the defaults below.

use crate::nrf24::RadioConfig;
use transmitter_proto::PacketBuilder;

/// Electrical level that means "pressed" or "closed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pull-up wiring: the contact pulls the line to ground.
    Low,
    High,
}

/// How an analog reading on a switch line becomes an electrical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchThreshold {
    /// Any reading above zero reads as high.
    NonZero,
    /// Readings strictly above the value read as high.
    Above(u16),
}

impl SwitchThreshold {
    /// Level a reading maps to (`true` = high).
    #[inline]
    #[must_use]
    pub const fn level(self, reading: u16) -> bool {
        match self {
            Self::NonZero => reading != 0,
            Self::Above(threshold) => reading > threshold,
        }
    }
}

/// Physical source of one logical digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLine {
    /// Digital pin read as a level.
    Digital { pin: u8, active: ActiveLevel },
    /// Analog pin read through the ADC and thresholded.
    Analog { pin: u8, active: ActiveLevel },
}

impl InputLine {
    /// Digital pin with pull-up wiring.
    #[must_use]
    pub const fn pull_up(pin: u8) -> Self {
        Self::Digital {
            pin,
            active: ActiveLevel::Low,
        }
    }

    /// Analog pin used as a switch with pull-up wiring.
    #[must_use]
    pub const fn analog_pull_up(pin: u8) -> Self {
        Self::Analog {
            pin,
            active: ActiveLevel::Low,
        }
    }
}

/// Pin role assignment and ADC properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    pub buttons: [InputLine; 4],
    pub switches: [InputLine; 4],
    /// Analog pins for X1, Y1, X2, Y2.
    pub joysticks: [u8; 4],
    /// Analog pin of the battery sense divider.
    pub battery: u8,
    /// Largest reading the ADC produces.
    pub adc_max: u16,
    pub switch_threshold: SwitchThreshold,
}

// Arduino Nano numbering: A0 = 14 ... A7 = 21.
const A0: u8 = 14;
const A1: u8 = 15;
const A2: u8 = 16;
const A3: u8 = 17;
const A5: u8 = 19;
const A6: u8 = 20;
const A7: u8 = 21;

impl InputConfig {
    /// Reference wiring on a 10-bit ADC board.
    ///
    /// - D6, D5, D4, D3 -> Buttons 1-4 (pull-up)
    /// - D7, D8 -> Switches 1-2 (pull-up)
    /// - A6, A7 -> Switches 3-4 (analog, pulled up externally)
    /// - A0-A3 -> Joystick X1, Y1, X2, Y2
    /// - A5 -> Battery sense
    pub const DEFAULT: Self = Self {
        buttons: [
            InputLine::pull_up(6),
            InputLine::pull_up(5),
            InputLine::pull_up(4),
            InputLine::pull_up(3),
        ],
        switches: [
            InputLine::pull_up(7),
            InputLine::pull_up(8),
            InputLine::analog_pull_up(A6),
            InputLine::analog_pull_up(A7),
        ],
        joysticks: [A0, A1, A2, A3],
        battery: A5,
        adc_max: 1023,
        switch_threshold: SwitchThreshold::Above(400),
    };

    /// Board revision with the two analog switch lines crossed.
    pub const SWAPPED_ANALOG_SWITCHES: Self = Self {
        switches: [
            InputLine::pull_up(7),
            InputLine::pull_up(8),
            InputLine::analog_pull_up(A7),
            InputLine::analog_pull_up(A6),
        ],
        ..Self::DEFAULT
    };
}

/// Battery sense scaling and low-battery alert timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    /// Largest reading of the battery ADC channel.
    pub adc_max: u16,
    /// Voltage that corresponds to `adc_max`.
    pub full_scale_volts: f32,
    /// Alert when the voltage is at or below this.
    pub min_volts: f32,
    /// Length of one beep.
    pub beep_us: u64,
    /// Minimum silence between two beeps.
    pub gap_us: u64,
    /// Alert period; the burst budget refills once it has elapsed.
    pub window_us: u64,
    /// Beeps allowed per alert period.
    pub burst_limit: u8,
}

impl BatteryConfig {
    /// 10-bit ADC over 0-5 V, alert at 3.1 V, 3 x 200 ms beeps per 30 s.
    pub const DEFAULT: Self = Self {
        adc_max: 1023,
        full_scale_volts: 5.0,
        min_volts: 3.1,
        beep_us: 200_000,
        gap_us: 50_000,
        window_us: 30_000_000,
        burst_limit: 3,
    };

    /// Same as [`DEFAULT`](Self::DEFAULT) with the alert at 3.2 V.
    pub const THRESHOLD_3V2: Self = Self {
        min_volts: 3.2,
        ..Self::DEFAULT
    };
}

/// Everything the transmit loop needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitterConfig {
    /// Requested time between two cycles. Values outside 2-10 ms are
    /// clamped by [`effective_period_us`](Self::effective_period_us).
    pub period_us: u64,
    pub inputs: InputConfig,
    pub packet: PacketBuilder,
    pub battery: BatteryConfig,
    pub radio: RadioConfig,
}

/// Shortest supported cycle period.
pub const MIN_PERIOD_US: u64 = 2_000;

/// Longest supported cycle period.
pub const MAX_PERIOD_US: u64 = 10_000;

impl TransmitterConfig {
    pub const DEFAULT: Self = Self {
        period_us: MAX_PERIOD_US,
        inputs: InputConfig::DEFAULT,
        packet: PacketBuilder::DEFAULT,
        battery: BatteryConfig::DEFAULT,
        radio: RadioConfig::DEFAULT,
    };

    /// Cycle period forced into the supported range.
    #[must_use]
    pub fn effective_period_us(&self) -> u64 {
        self.period_us.clamp(MIN_PERIOD_US, MAX_PERIOD_US)
    }
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
