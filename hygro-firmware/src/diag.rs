//! Serial diagnostic channel

use defmt::warn;
use embedded_io::Write;

use hygro_core::traits::DiagnosticSink;

/// Writes each report as one CR/LF terminated line, mirrored to defmt
pub struct SerialDiagnostics<W> {
    tx: W,
}

impl<W: Write> SerialDiagnostics<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }
}

impl<W: Write> DiagnosticSink for SerialDiagnostics<W> {
    fn report(&mut self, message: &str) {
        warn!("diag: {}", message);

        // Nothing to fall back to if the UART itself fails
        let _ = self.tx.write_all(message.as_bytes());
        let _ = self.tx.write_all(b"\r\n");
        let _ = self.tx.flush();
    }
}
