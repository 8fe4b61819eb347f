//! Hygro - DHT11 Monitor Firmware
//!
//! Main firmware binary for RP2040 boards with a DHT11 sensor and a
//! 128x64 SSD1306 OLED. Samples temperature and humidity every two
//! seconds and shows the latest reading on the display.
//!
//! The whole application is one blocking loop on the executor's main
//! task; no other tasks are spawned.

#![no_std]
#![no_main]

mod board;
mod diag;
mod pacer;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_rp::i2c::I2c;
use embassy_rp::uart::UartTx;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use hygro_core::config::MonitorConfig;
use hygro_core::{CycleReport, Monitor, Reading};
use hygro_drivers::display::Ssd1306;
use hygro_drivers::sensor::Dht11;

use crate::diag::SerialDiagnostics;
use crate::pacer::BlockingPacer;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Hygro firmware starting...");

    let config = MonitorConfig::DEFAULT;

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Diagnostics: UART0 TX only, blocking
    let uart = UartTx::new_blocking(p.UART0, p.PIN_0, board::uart_config(config.diagnostic_baud));
    let mut diagnostics = SerialDiagnostics::new(uart);

    // DHT11 data line, released (high) until the first transfer
    let line = OutputOpenDrain::new(p.PIN_2, Level::High);
    let sensor = Dht11::new(line, Delay);
    info!("DHT11 on GPIO{}", board::SENSOR_GPIO);

    // OLED on I2C0 (SCL=GPIO5, SDA=GPIO4)
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, board::i2c_config());
    let display = Ssd1306::new(i2c);

    let mut monitor = match Monitor::start(sensor, display, BlockingPacer, &mut diagnostics, config) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Startup failed: {:?}", e);
            halt();
        }
    };
    info!(
        "SSD1306 online at {=u8:#x}, sampling every {} ms",
        config.display_address, config.pacing_interval_ms
    );

    monitor.run_until(|report| {
        log_cycle(report);
        false
    });

    // The stop condition never fires
    halt();
}

fn log_cycle(report: &CycleReport) {
    match &report.reading {
        Reading::Valid(m) => debug!(
            "#{}: {} C, {} %",
            report.iteration,
            m.temperature_c(),
            m.humidity_pct()
        ),
        Reading::Invalid(e) => warn!("#{}: sensor error {:?}", report.iteration, e),
    }
}

/// Fatal halt: park the core forever
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
