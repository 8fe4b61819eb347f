//! Blocking pacing wait

/// Suspends the single thread of control
///
/// Firmware blocks on a timer; tests record the requested durations
/// instead of sleeping.
pub trait Pacer {
    /// Block for `ms` milliseconds
    fn pause_ms(&mut self, ms: u32);
}

impl<T: Pacer + ?Sized> Pacer for &mut T {
    fn pause_ms(&mut self, ms: u32) {
        (**self).pause_ms(ms)
    }
}
