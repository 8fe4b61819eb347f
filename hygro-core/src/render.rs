//! Frame layout and rendering
//!
//! Every frame is drawn from scratch: clear, write, flush. Nothing from
//! the previous frame survives, so equal readings give equal frames.

use core::fmt::Write;

use heapless::String;

use crate::config::MonitorConfig;
use crate::reading::{Measurement, Reading};
use crate::state::RenderOutcome;
use crate::traits::{DisplayError, FrameDisplay};

/// Caption shown once at startup
pub const SPLASH_CAPTION: &str = "DHT11 Monitor";

/// Header of a valid-reading frame
pub const HEADER: &str = "DHT11 Reading";

/// Rule under the header
pub const SEPARATOR: &str = "----------------";

/// Only content of an invalid-reading frame
pub const ERROR_CAPTION: &str = "Sensor Error!";

const TEMPERATURE_PREFIX: &str = "Temp: ";
const TEMPERATURE_SUFFIX: &str = " C";
const HUMIDITY_PREFIX: &str = "Humidity: ";
const HUMIDITY_SUFFIX: &str = " %";

/// Most decimal places a value is rendered with
pub const MAX_DECIMALS: u8 = 4;

// Widest in-range values: "-256" and "280", plus the decimal point
const WIDEST_TEMPERATURE: usize =
    TEMPERATURE_PREFIX.len() + 4 + 1 + MAX_DECIMALS as usize + TEMPERATURE_SUFFIX.len();
const WIDEST_HUMIDITY: usize =
    HUMIDITY_PREFIX.len() + 3 + 1 + MAX_DECIMALS as usize + HUMIDITY_SUFFIX.len();

/// Maximum characters in a formatted value line
pub const LINE_LEN: usize = if WIDEST_TEMPERATURE > WIDEST_HUMIDITY {
    WIDEST_TEMPERATURE
} else {
    WIDEST_HUMIDITY
};

const _: () = assert!(LINE_LEN <= hygro_display::SPAN_LEN);
const _: () = assert!(MonitorConfig::DEFAULT.decimal_places <= MAX_DECIMALS);

/// Vertical pixel positions of each line (all lines start at x = 0)
pub mod rows {
    pub const HEADER: u16 = 0;
    pub const SEPARATOR: u16 = 10;
    pub const TEMPERATURE: u16 = 25;
    pub const HUMIDITY: u16 = 40;
}

/// Format `Temp: <value> C`
///
/// `celsius` must lie in [`TEMPERATURE_RANGE_C`](crate::reading::TEMPERATURE_RANGE_C);
/// `decimals` is capped at [`MAX_DECIMALS`].
pub fn temperature_line(celsius: f32, decimals: u8) -> String<LINE_LEN> {
    value_line(TEMPERATURE_PREFIX, celsius, decimals, TEMPERATURE_SUFFIX)
}

/// Format `Humidity: <value> %`
pub fn humidity_line(percent: f32, decimals: u8) -> String<LINE_LEN> {
    value_line(HUMIDITY_PREFIX, percent, decimals, HUMIDITY_SUFFIX)
}

fn value_line(prefix: &str, value: f32, decimals: u8, suffix: &str) -> String<LINE_LEN> {
    let decimals = usize::from(decimals.min(MAX_DECIMALS));
    let mut line = String::new();
    // Cannot overflow for in-range values, see LINE_LEN
    let _ = write!(line, "{}{:.*}{}", prefix, decimals, value, suffix);
    line
}

/// Draw the startup splash and push it to the display
pub fn render_splash<D: FrameDisplay>(display: &mut D) -> Result<(), DisplayError> {
    display.clear();
    display.set_cursor(0, rows::HEADER);
    display.write_text(SPLASH_CAPTION);
    display.flush()
}

/// Draw one cycle's frame
///
/// Flush failures are ignored: after startup the display is assumed to
/// stay reachable.
pub fn render_reading<D: FrameDisplay>(
    display: &mut D,
    reading: &Reading,
    decimals: u8,
) -> RenderOutcome {
    display.clear();

    let outcome = match reading {
        Reading::Valid(m) => {
            draw_measurement(display, m, decimals);
            RenderOutcome::Ok
        }
        Reading::Invalid(_) => {
            display.set_cursor(0, rows::HEADER);
            display.write_text(ERROR_CAPTION);
            RenderOutcome::Error
        }
    };

    display.flush().ok();
    outcome
}

fn draw_measurement<D: FrameDisplay>(display: &mut D, m: &Measurement, decimals: u8) {
    display.set_cursor(0, rows::HEADER);
    display.write_text(HEADER);

    display.set_cursor(0, rows::SEPARATOR);
    display.write_text(SEPARATOR);

    display.set_cursor(0, rows::TEMPERATURE);
    display.write_text(&temperature_line(m.temperature_c(), decimals));

    display.set_cursor(0, rows::HUMIDITY);
    display.write_text(&humidity_line(m.humidity_pct(), decimals));
}
