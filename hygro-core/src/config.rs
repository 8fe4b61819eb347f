//! Compile-time configuration
//!
//! Everything the monitor needs to know about its hardware and timing.
//! None of it is adjustable at runtime.

/// Minimum time between DHT11 reads, in milliseconds
///
/// Reading faster returns stale or undefined data.
pub const DHT11_MIN_INTERVAL_MS: u32 = 2000;

/// Monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Display width in pixels
    pub display_width: u16,
    /// Display height in pixels
    pub display_height: u16,
    /// Display 7-bit I2C address
    pub display_address: u8,
    /// Delay before every sample (ms)
    pub pacing_interval_ms: u32,
    /// How long the splash stays up before sampling starts (ms)
    pub splash_dwell_ms: u32,
    /// Decimal places for rendered values
    pub decimal_places: u8,
    /// Diagnostic serial baud rate
    pub diagnostic_baud: u32,
}

impl MonitorConfig {
    /// The one configuration this firmware runs with
    pub const DEFAULT: Self = Self {
        display_width: 128,
        display_height: 64,
        display_address: 0x3C,
        pacing_interval_ms: DHT11_MIN_INTERVAL_MS,
        splash_dwell_ms: 2000,
        decimal_places: 2,
        diagnostic_baud: 9600,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Sampling faster than the sensor allows is never valid
const _: () = assert!(MonitorConfig::DEFAULT.pacing_interval_ms >= DHT11_MIN_INTERVAL_MS);
