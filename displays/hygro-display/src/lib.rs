//! Display abstraction for Hygro
//!
//! This crate provides:
//! - `FrameDisplay` trait, the service the monitor core renders through
//! - `DisplayError` for startup and bus failures
//! - `TextFrame`, an in-memory display that records positioned text
//!
//! # Architecture
//!
//! The monitor core only knows about `FrameDisplay`. Hardware drivers
//! (e.g. the SSD1306 in `hygro-drivers`) implement it on top of a pixel
//! buffer, while `TextFrame` implements it on top of text spans so frame
//! content can be inspected on the host.

#![no_std]

pub mod backend;
pub mod frame;

// Re-export key types
pub use backend::{DisplayError, FrameDisplay};
pub use frame::{Span, TextFrame, CHAR_WIDTH, LINE_HEIGHT, MAX_SPANS, SPAN_LEN};
