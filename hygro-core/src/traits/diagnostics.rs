//! One-way diagnostic log

/// Text sink for diagnostics that cannot go to the display
///
/// Only used for the fatal display failure at startup.
pub trait DiagnosticSink {
    /// Emit one line of text
    fn report(&mut self, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn report(&mut self, message: &str) {
        (**self).report(message)
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn report(&mut self, _message: &str) {}
}
