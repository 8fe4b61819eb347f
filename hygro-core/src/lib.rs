//! Board-agnostic core logic for the DHT11 monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Service traits (sensor, pacer, diagnostics)
//! - Reading model and validation
//! - Frame layout and rendering
//! - Lifecycle state machine
//! - Startup and the sample-render cycle
//! - Compile-time configuration

// std only for the test harness (proptest needs it)
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod monitor;
pub mod reading;
pub mod render;
pub mod state;
pub mod traits;

pub use monitor::{CycleReport, Monitor, StartupError};
pub use reading::{InvalidReading, Measurement, Quantity, Reading};
