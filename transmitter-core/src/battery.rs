//! Battery voltage sensing and the low-battery beep pattern.
//!
//! When the battery is low the buzzer chirps a short burst (3 x 200 ms by
//! default) and then stays quiet until the alert period (30 s) has passed
//! since the last beep ended. Every decision is a timestamp comparison made
//! once per call, so the transmit loop is never held up by the alert.
//!
//! Pure logic module with no async or embassy dependencies. Fully testable on host.

use crate::config::BatteryConfig;
use embedded_hal::digital::OutputPin;

/// Alert state after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertState {
    /// Voltage above threshold, buzzer off.
    Idle,
    /// Buzzer sounding.
    BeepOn,
    /// Between beeps of a burst.
    BeepOff,
    /// Burst budget spent, waiting for the alert period to pass.
    Cooldown,
}

/// Linear map of a raw reading onto `0.0..=full_scale_volts`.
#[inline]
#[must_use]
pub fn voltage_from_raw(raw: u16, config: &BatteryConfig) -> f32 {
    if config.adc_max == 0 {
        return 0.0;
    }
    f32::from(raw.min(config.adc_max)) * config.full_scale_volts / f32::from(config.adc_max)
}

/// Stateful low-battery alert driving a buzzer pin.
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    config: BatteryConfig,
    voltage: f32,
    state: AlertState,
    buzzer_on: bool,
    beep_on_us: u64,
    /// `None` until the first beep has ended.
    beep_off_us: Option<u64>,
    /// `None` until the battery is first seen low.
    period_start_us: Option<u64>,
    burst_count: u8,
}

impl BatteryMonitor {
    #[must_use]
    pub const fn new(config: BatteryConfig) -> Self {
        Self {
            config,
            voltage: 0.0,
            state: AlertState::Idle,
            buzzer_on: false,
            beep_on_us: 0,
            beep_off_us: None,
            period_start_us: None,
            burst_count: 0,
        }
    }

    /// Feed one battery reading taken at `now_us` and drive the buzzer.
    ///
    /// Buzzer pin errors are ignored; the alert is best effort.
    pub fn update<B: OutputPin>(&mut self, raw: u16, now_us: u64, buzzer: &mut B) -> AlertState {
        self.voltage = voltage_from_raw(raw, &self.config);

        if self.voltage > self.config.min_volts {
            if self.buzzer_on {
                // A beep cut short still counts against the burst budget
                self.end_beep(buzzer, now_us);
            }
            self.state = AlertState::Idle;
            return self.state;
        }

        let period_elapsed = self
            .period_start_us
            .map_or(true, |start| now_us.saturating_sub(start) > self.config.window_us);
        if period_elapsed {
            self.burst_count = 0;
            self.period_start_us = Some(now_us);
        }

        if self.buzzer_on {
            if now_us.saturating_sub(self.beep_on_us) > self.config.beep_us {
                self.end_beep(buzzer, now_us);
            }
        } else if self.burst_count < self.config.burst_limit {
            let gap_elapsed = self
                .beep_off_us
                .map_or(true, |off| now_us.saturating_sub(off) > self.config.gap_us);
            if gap_elapsed {
                self.set_buzzer(buzzer, true);
                self.beep_on_us = now_us;
            }
        }

        self.state = if self.buzzer_on {
            AlertState::BeepOn
        } else if self.burst_count < self.config.burst_limit {
            AlertState::BeepOff
        } else {
            AlertState::Cooldown
        };
        self.state
    }

    /// Voltage computed by the last update.
    #[must_use]
    pub const fn voltage(&self) -> f32 {
        self.voltage
    }

    #[must_use]
    pub const fn state(&self) -> AlertState {
        self.state
    }

    /// Beeps completed in the current alert period.
    #[must_use]
    pub const fn burst_count(&self) -> u8 {
        self.burst_count
    }

    #[must_use]
    pub const fn is_buzzer_on(&self) -> bool {
        self.buzzer_on
    }

    #[must_use]
    pub const fn config(&self) -> &BatteryConfig {
        &self.config
    }

    fn end_beep<B: OutputPin>(&mut self, buzzer: &mut B, now_us: u64) {
        self.set_buzzer(buzzer, false);
        self.beep_off_us = Some(now_us);
        self.period_start_us = Some(now_us);
        self.burst_count = self.burst_count.saturating_add(1);
    }

    fn set_buzzer<B: OutputPin>(&mut self, buzzer: &mut B, on: bool) {
        let _ = if on { buzzer.set_high() } else { buzzer.set_low() };
        self.buzzer_on = on;
    }
}
