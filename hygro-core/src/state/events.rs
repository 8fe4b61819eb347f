//! Events that trigger state transitions

use super::machine::RenderOutcome;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Startup events
    /// Display came online and the splash was pushed
    DisplayReady,
    /// Display could not be brought online
    DisplayFailed,
    /// Splash dwell time has passed
    DwellElapsed,

    // Cycle events
    /// A cycle finished rendering its frame
    Rendered(RenderOutcome),
}
