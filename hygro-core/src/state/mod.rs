//! Lifecycle state machine
//!
//! Tracks where the monitor is between power-on and steady-state
//! sampling.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{RenderOutcome, State};
