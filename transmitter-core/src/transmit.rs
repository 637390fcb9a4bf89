//! TransmitLoop: samples inputs and sends a packet once per period.

use crate::battery::{AlertState, BatteryMonitor};
use crate::clock::{Clock, PeriodGate};
use crate::config::TransmitterConfig;
use crate::diagnostics::format_line;
use crate::input::{InputHal, InputSampler};
use crate::output::{DiagnosticSink, RadioLink};
use embedded_hal::digital::OutputPin;
use transmitter_proto::{PacketBuilder, RadioPacket};

/// Outcome of one dispatched cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Packet handed to the radio.
    pub packet: RadioPacket,
    /// Battery voltage sampled this cycle.
    pub voltage: f32,
    pub alert: AlertState,
    /// Whether the radio accepted the payload.
    pub sent: bool,
}

/// Counters accumulated over the loop's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub cycles: u32,
    pub send_failures: u32,
}

/// Fixed-period transmit loop.
///
/// Owns the hardware collaborators and all state that lives across cycles.
/// [`poll`](Self::poll) is cheap when no cycle is due, so callers can spin
/// on it or yield to an executor between calls.
///
/// # Error Handling
///
/// Nothing in a cycle stops the loop. Failed reads degrade inside the
/// sampler, radio failures are counted in [`LinkStats`] and the packet is
/// dropped, buzzer errors are ignored.
pub struct TransmitLoop<H, R, B, C, D> {
    hal: H,
    radio: R,
    buzzer: B,
    clock: C,
    sink: D,
    sampler: InputSampler,
    builder: PacketBuilder,
    battery: BatteryMonitor,
    gate: PeriodGate,
    stats: LinkStats,
}

impl<H, R, B, C, D> TransmitLoop<H, R, B, C, D>
where
    H: InputHal,
    R: RadioLink,
    B: OutputPin,
    C: Clock,
    D: DiagnosticSink,
{
    /// Create a loop from a configuration and its collaborators.
    pub fn new(config: &TransmitterConfig, hal: H, radio: R, buzzer: B, clock: C, sink: D) -> Self {
        Self {
            hal,
            radio,
            buzzer,
            clock,
            sink,
            sampler: InputSampler::new(config.inputs),
            builder: config.packet,
            battery: BatteryMonitor::new(config.battery),
            gate: PeriodGate::new(config.effective_period_us()),
            stats: LinkStats::default(),
        }
    }

    /// Run the loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            let _ = self.poll();
        }
    }

    /// Run one cycle if the period has elapsed since the last one.
    ///
    /// Returns `None` without touching any hardware when no cycle is due.
    pub fn poll(&mut self) -> Option<CycleReport> {
        let now = self.clock.now_us();
        if !self.gate.try_dispatch(now) {
            return None;
        }

        let snapshot = self.sampler.sample(&mut self.hal);
        let packet = self.builder.build(&snapshot);
        let alert = self
            .battery
            .update(snapshot.battery_raw, now, &mut self.buzzer);
        let voltage = self.battery.voltage();

        let sent = self.radio.send(&packet.to_bytes()).is_ok();
        self.stats.cycles = self.stats.cycles.wrapping_add(1);
        if !sent {
            self.stats.send_failures = self.stats.send_failures.saturating_add(1);
        }

        self.sink.emit(&format_line(&snapshot, voltage));

        Some(CycleReport {
            packet,
            voltage,
            alert,
            sent,
        })
    }

    #[must_use]
    pub const fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Failed hardware reads since start.
    #[must_use]
    pub const fn read_faults(&self) -> u32 {
        self.sampler.read_faults()
    }

    #[must_use]
    pub const fn battery(&self) -> &BatteryMonitor {
        &self.battery
    }

    /// Get a reference to the input hardware.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Get a mutable reference to the input hardware.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Get a reference to the radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Get a mutable reference to the radio.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::clock::MockClock;
    use crate::input::InputError;
    use crate::output::{NullSink, RadioError};
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::vec::Vec;

    /// Every line idle high, every analog line at `analog`.
    struct FlatHal {
        analog: u16,
        reads: usize,
    }

    impl InputHal for FlatHal {
        fn digital_read(&mut self, _pin: u8) -> Result<bool, InputError> {
            self.reads += 1;
            Ok(true)
        }

        fn analog_read(&mut self, _pin: u8) -> Result<u16, InputError> {
            self.reads += 1;
            Ok(self.analog)
        }
    }

    struct MockRadio {
        sent: Vec<Vec<u8>>,
        fail: bool,
    }

    impl RadioLink for MockRadio {
        fn send(&mut self, payload: &[u8]) -> Result<(), RadioError> {
            if self.fail {
                return Err(RadioError::Spi);
            }
            self.sent.push(payload.to_vec());
            Ok(())
        }
    }

    struct Buzzer;

    impl ErrorType for Buzzer {
        type Error = Infallible;
    }

    impl OutputPin for Buzzer {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    fn make_loop(
        analog: u16,
        fail: bool,
    ) -> TransmitLoop<FlatHal, MockRadio, Buzzer, MockClock, NullSink> {
        TransmitLoop::new(
            &TransmitterConfig::DEFAULT,
            FlatHal { analog, reads: 0 },
            MockRadio {
                sent: Vec::new(),
                fail,
            },
            Buzzer,
            MockClock::new(),
            NullSink,
        )
    }

    #[test]
    fn test_no_cycle_before_period() {
        let mut tx = make_loop(512, false);
        tx.clock().advance_ms(9);
        assert!(tx.poll().is_none());
        assert_eq!(tx.hal().reads, 0);
        assert!(tx.radio().sent.is_empty());
    }

    #[test]
    fn test_cycle_sends_twelve_bytes() {
        let mut tx = make_loop(512, false);
        tx.clock().advance_ms(10);
        let report = tx.poll().unwrap();
        assert!(report.sent);
        assert_eq!(tx.radio().sent.len(), 1);
        assert_eq!(tx.radio().sent[0], report.packet.to_bytes().to_vec());
        assert_eq!(tx.radio().sent[0].len(), 12);
    }

    #[test]
    fn test_send_failure_does_not_stop_loop() {
        let mut tx = make_loop(512, true);
        for _ in 0..3 {
            tx.clock().advance_ms(10);
            let report = tx.poll().unwrap();
            assert!(!report.sent);
        }
        assert_eq!(
            tx.stats(),
            LinkStats {
                cycles: 3,
                send_failures: 3
            }
        );
    }
}
