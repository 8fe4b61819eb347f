//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the service traits
//! defined in hygro-core and hygro-display:
//!
//! - Sensors (DHT11 single-wire temperature/humidity)
//! - Displays (SSD1306 128x64 I2C OLED)
//!
//! Drivers are written against `embedded-hal` 1.0 blocking traits, so
//! they work with any HAL that implements them.

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod sensor;
