//! Per-cycle diagnostic line.
//!
//! ```text
//! 0, 0, 1, 0, 0, 0, 0, 0, 512, 498, 511, 530, 3.92
//! ```
//!
//! Buttons 1-4, switches 1-4, the four raw axes, then battery volts with two
//! decimals. Observability only; nothing parses it.

use core::fmt::Write;
use heapless::String;
use transmitter_proto::InputSnapshot;

/// Capacity of a diagnostic line.
///
/// 8 digits + 4 axes of up to 5 digits + voltage + separators fits comfortably.
pub const MAX_LINE_LENGTH: usize = 96;

/// Format the diagnostic line for one cycle.
#[must_use]
pub fn format_line(snapshot: &InputSnapshot, voltage: f32) -> String<MAX_LINE_LENGTH> {
    let mut line = String::new();
    // Capacity covers the longest possible line, so writes cannot fail
    for d in snapshot.digital() {
        let _ = write!(line, "{d}, ");
    }
    for a in snapshot.axes() {
        let _ = write!(line, "{a}, ");
    }
    let _ = write!(line, "{voltage:.2}");
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use transmitter_proto::Joystick;

    #[test]
    fn test_line_layout() {
        let snapshot = InputSnapshot {
            buttons: [false, false, true, false],
            switches: [true, false, false, false],
            joystick1: Joystick::new(512, 498),
            joystick2: Joystick::new(511, 1023),
            battery_raw: 0,
        };
        let line = format_line(&snapshot, 3.0);
        assert_eq!(
            line.as_str(),
            "0, 0, 1, 0, 1, 0, 0, 0, 512, 498, 511, 1023, 3.00"
        );
    }

    #[test]
    fn test_longest_line_fits() {
        let snapshot = InputSnapshot {
            joystick1: Joystick::new(u16::MAX, u16::MAX),
            joystick2: Joystick::new(u16::MAX, u16::MAX),
            ..InputSnapshot::released()
        };
        let line = format_line(&snapshot, 99.99);
        assert!(line.ends_with("65535, 99.99"));
    }
}
