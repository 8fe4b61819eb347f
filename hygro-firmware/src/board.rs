//! Board wiring (Raspberry Pi Pico)
//!
//! | Signal        | GPIO | Notes                               |
//! |---------------|------|-------------------------------------|
//! | UART0 TX      | 0    | Diagnostics, 9600 8N1               |
//! | I2C0 SDA      | 4    | SSD1306                             |
//! | I2C0 SCL      | 5    | SSD1306                             |
//! | DHT11 DATA    | 2    | Open drain, module pull-up to 3V3   |
//!
//! Pins are owned by `embassy_rp::Peripherals` fields, so the mapping is
//! applied in `main`; this module holds the bus settings.

use embassy_rp::{i2c, uart};

/// SSD1306 bus clock (fast mode)
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// GPIO carrying the DHT11 data line
pub const SENSOR_GPIO: u8 = 2;

pub fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}

pub fn uart_config(baud: u32) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = baud;
    config
}
