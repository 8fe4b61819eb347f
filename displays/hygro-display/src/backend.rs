//! Display backend trait
//!
//! Defines the interface every display type offers to the monitor.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display (bus NACK, arbitration loss, ...)
    Bus,
    /// Requested geometry is not supported by this display
    UnsupportedGeometry,
    /// Display used before a successful `initialize`
    NotInitialized,
}

/// Frame-buffered display
///
/// All drawing goes to an off-screen frame; nothing is visible until
/// [`flush`](FrameDisplay::flush) pushes the frame to the device.
pub trait FrameDisplay {
    /// Bring the display online
    ///
    /// - `width`, `height`: Pixel area
    /// - `address`: 7-bit bus address
    fn initialize(&mut self, width: u16, height: u16, address: u8) -> Result<(), DisplayError>;

    /// Clear the frame buffer and home the cursor
    fn clear(&mut self);

    /// Move the text cursor to pixel position (x, y)
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Write text at the cursor, advancing it
    ///
    /// Text that runs past the right or bottom edge is clipped.
    fn write_text(&mut self, text: &str);

    /// Push the frame buffer to the physical device
    fn flush(&mut self) -> Result<(), DisplayError>;
}

impl<T: FrameDisplay + ?Sized> FrameDisplay for &mut T {
    fn initialize(&mut self, width: u16, height: u16, address: u8) -> Result<(), DisplayError> {
        (**self).initialize(width, height, address)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        (**self).set_cursor(x, y)
    }

    fn write_text(&mut self, text: &str) {
        (**self).write_text(text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }
}
