//! Service traits
//!
//! These traits define the interface between the monitor logic
//! and hardware-specific implementations.

pub mod diagnostics;
pub mod pacer;
pub mod sensor;

pub use diagnostics::{DiagnosticSink, NoDiagnostics};
pub use hygro_display::{DisplayError, FrameDisplay};
pub use pacer::Pacer;
pub use sensor::{ClimateSensor, SensorError};
