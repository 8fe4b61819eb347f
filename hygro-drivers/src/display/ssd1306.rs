//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C.
//! Text is drawn into a local frame buffer with embedded-graphics
//! (6x10 font, 21 chars x 6 lines) and pushed on `flush`.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use embedded_hal::i2c::I2c;

use hygro_display::{DisplayError, FrameDisplay, CHAR_WIDTH, LINE_HEIGHT};

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: display data follows
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

/// Power-on sequence (internal charge pump, horizontal addressing)
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_MEMORY_MODE,
    0x00,                  // Horizontal addressing
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_RAM,
    cmd::SET_NORMAL,
    cmd::DEACTIVATE_SCROLL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    /// Set by a successful `initialize`
    address: Option<u8>,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    cursor: Point,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: None,
            buffer: [[0; WIDTH]; PAGES],
            cursor: Point::zero(),
        }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Frame buffer contents
    pub fn buffer(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.buffer
    }

    /// Send a command to the display
    fn command(&mut self, address: u8, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(address, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-screen pixels are clipped
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }

            let mask = 1u8 << (y % 8);
            let byte = &mut self.buffer[y / 8][x];
            if color.is_on() {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> FrameDisplay for Ssd1306<I2C> {
    fn initialize(&mut self, width: u16, height: u16, address: u8) -> Result<(), DisplayError> {
        if usize::from(width) != WIDTH || usize::from(height) != HEIGHT {
            return Err(DisplayError::UnsupportedGeometry);
        }

        for &c in INIT_SEQUENCE {
            self.command(address, c)?;
        }

        self.address = Some(address);
        Ok(())
    }

    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        self.cursor = Point::zero();
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(i32::from(x), i32::from(y));
    }

    fn write_text(&mut self, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                // Continuation lines start at the left edge
                self.cursor = Point::new(0, self.cursor.y + i32::from(LINE_HEIGHT));
            }
            // Infallible: drawing into RAM
            let _ = Text::with_baseline(line, self.cursor, style, Baseline::Top).draw(self);
            self.cursor.x += line.chars().count() as i32 * i32::from(CHAR_WIDTH);
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let address = self.address.ok_or(DisplayError::NotInitialized)?;

        // Full window: columns 0-127, pages 0-7
        for &c in &[
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(address, c)?;
        }

        for page in 0..PAGES {
            // Send page data
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(address, &data)
                .map_err(|_| DisplayError::Bus)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use heapless::Vec;
    use hygro_core::render;
    use hygro_core::Reading;

    #[derive(Debug)]
    struct Nack;

    impl embedded_hal::i2c::Error for Nack {
        fn kind(&self) -> ErrorKind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        }
    }

    /// I2C bus recording what was written
    #[derive(Default)]
    struct RecordingBus {
        /// Every write NACKs
        absent: bool,
        address: Option<u8>,
        commands: Vec<u8, 64>,
        data_bytes: usize,
    }

    impl ErrorType for RecordingBus {
        type Error = Nack;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Nack> {
            if self.absent {
                return Err(Nack);
            }
            self.address = Some(address);
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    match bytes.split_first() {
                        Some((&CONTROL_COMMAND, rest)) => {
                            for &b in rest {
                                // Overflow only loses history, not behavior
                                let _ = self.commands.push(b);
                            }
                        }
                        Some((&CONTROL_DATA, rest)) => self.data_bytes += rest.len(),
                        _ => {}
                    }
                }
            }
            Ok(())
        }
    }

    fn online() -> Ssd1306<RecordingBus> {
        let mut oled = Ssd1306::new(RecordingBus::default());
        oled.initialize(128, 64, 0x3C).unwrap();
        oled
    }

    fn lit_pixels(oled: &Ssd1306<RecordingBus>) -> u32 {
        oled.buffer()
            .iter()
            .flat_map(|page| page.iter())
            .map(|b| b.count_ones())
            .sum()
    }

    #[test]
    fn test_initialize_sends_sequence() {
        let oled = online();
        let bus = oled.release();
        assert_eq!(bus.address, Some(0x3C));
        assert_eq!(bus.commands.as_slice(), INIT_SEQUENCE);
    }

    #[test]
    fn test_absent_display_is_bus_error() {
        let mut oled = Ssd1306::new(RecordingBus {
            absent: true,
            ..Default::default()
        });
        assert_eq!(oled.initialize(128, 64, 0x3C), Err(DisplayError::Bus));
        assert_eq!(oled.flush(), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_unsupported_geometry() {
        let mut oled = Ssd1306::new(RecordingBus::default());
        assert_eq!(
            oled.initialize(128, 32, 0x3C),
            Err(DisplayError::UnsupportedGeometry)
        );
    }

    #[test]
    fn test_flush_sends_full_frame() {
        let mut oled = online();
        oled.flush().unwrap();

        let bus = oled.release();
        assert_eq!(bus.data_bytes, WIDTH * PAGES);
        let window = &bus.commands[INIT_SEQUENCE.len()..];
        assert_eq!(window, &[0x21, 0, 127, 0x22, 0, 7]);
    }

    #[test]
    fn test_text_lights_pixels_and_clear_resets() {
        let mut oled = online();
        oled.set_cursor(0, 0);
        oled.write_text("Sensor Error!");
        assert!(lit_pixels(&oled) > 0);
        // 6x10 glyphs at y=0 stay within pages 0 and 1
        assert!(oled.buffer()[2..].iter().all(|page| page.iter().all(|&b| b == 0)));

        FrameDisplay::clear(&mut oled);
        assert_eq!(lit_pixels(&oled), 0);
    }

    #[test]
    fn test_cursor_advances() {
        let mut oled = online();
        oled.set_cursor(0, 25);
        oled.write_text("Temp");
        assert_eq!(oled.cursor, Point::new(24, 25));

        oled.write_text("a\nbc");
        assert_eq!(oled.cursor, Point::new(12, 35));
    }

    #[test]
    fn test_offscreen_text_is_clipped() {
        let mut oled = online();
        oled.set_cursor(120, 60);
        oled.write_text("overflowing text");
        // Only the visible corner may be touched
        assert!(oled.buffer()[..7].iter().all(|page| page[..120].iter().all(|&b| b == 0)));
    }

    #[test]
    fn test_same_reading_same_pixels() {
        let mut oled = online();
        let reading = Reading::from_samples(Ok(23.5), Ok(41.0));

        render::render_reading(&mut oled, &reading, 2);
        let first = *oled.buffer();
        render::render_reading(&mut oled, &reading, 2);

        assert_eq!(oled.buffer(), &first);
        assert!(lit_pixels(&oled) > 0);
    }

    #[test]
    fn test_error_frame_differs_from_reading_frame() {
        let mut oled = online();
        render::render_reading(&mut oled, &Reading::from_samples(Ok(23.5), Ok(41.0)), 2);
        let reading_frame = *oled.buffer();

        render::render_reading(&mut oled, &Reading::from_samples(Ok(f32::NAN), Ok(41.0)), 2);
        assert_ne!(oled.buffer(), &reading_frame);
        // Error caption occupies only the first text row
        assert!(oled.buffer()[2..].iter().all(|page| page.iter().all(|&b| b == 0)));
    }
}
