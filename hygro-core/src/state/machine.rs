//! State machine definition

use super::events::Event;

/// What the last cycle put on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Formatted temperature and humidity
    Ok,
    /// Error caption
    Error,
}

/// Monitor lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on, devices being brought up
    #[default]
    Startup,
    /// Splash caption visible, waiting out the dwell time
    Splash,
    /// Steady state; carries the last render outcome, if any
    Sampling(Option<RenderOutcome>),
    /// Display unreachable at startup; nothing else ever happens
    Halted,
}

impl State {
    /// Check if sensor queries are allowed in this state
    pub fn sampling_allowed(&self) -> bool {
        matches!(self, State::Sampling(_))
    }

    /// Check if this is the fatal halt
    pub fn is_halted(&self) -> bool {
        matches!(self, State::Halted)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Startup transitions
            (Startup, DisplayReady) => Splash,
            (Startup, DisplayFailed) => Halted,

            // Splash transitions
            (Splash, DwellElapsed) => Sampling(None),

            // Sampling self-loop
            (Sampling(_), Rendered(outcome)) => Sampling(Some(outcome)),

            // Halted is terminal; anything else leaves the state unchanged
            _ => self,
        }
    }
}
