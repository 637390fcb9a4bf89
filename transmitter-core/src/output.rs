//! Radio and diagnostic output traits and error types.

/// Error type for radio operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI transfer failed.
    Spi,
    /// Chip-enable pin could not be driven.
    Pin,
    /// Transceiver did not answer with the configured registers.
    NotPresent,
    /// Payload does not fit the configured payload width.
    PayloadTooLarge,
}

impl core::fmt::Display for RadioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi => write!(f, "spi transfer failed"),
            Self::Pin => write!(f, "chip enable pin failed"),
            Self::NotPresent => write!(f, "radio not responding"),
            Self::PayloadTooLarge => write!(f, "payload too large"),
        }
    }
}

/// Fire-and-forget radio transmitter.
///
/// There is no acknowledgment: `Ok` means the payload was handed to the
/// transceiver, not that anyone received it.
pub trait RadioLink {
    /// Queue one payload for transmission to the configured address.
    fn send(&mut self, payload: &[u8]) -> Result<(), RadioError>;
}

/// Line-oriented text sink for per-cycle diagnostics.
pub trait DiagnosticSink {
    /// Emit one line (without terminator).
    fn emit(&mut self, line: &str);
}

/// Diagnostic sink that discards everything.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}
