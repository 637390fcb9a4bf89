use defmt::debug;
use transmitter_core::DiagnosticSink;

/// Sends each diagnostic line to the host over RTT.
///
/// Lines are logged at `debug`; build with `DEFMT_LOG=info` to drop them.
#[derive(Debug, Default)]
pub struct DefmtSink;

impl DiagnosticSink for DefmtSink {
    fn emit(&mut self, line: &str) {
        debug!("{=str}", line);
    }
}
