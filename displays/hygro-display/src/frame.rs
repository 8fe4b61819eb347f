//! In-memory text frame
//!
//! Records positioned text instead of pixels. Used wherever frame
//! content has to be inspected, such as host-side tests of the monitor.

use heapless::{String, Vec};

use crate::backend::{DisplayError, FrameDisplay};

/// Maximum number of text spans held by one frame
pub const MAX_SPANS: usize = 8;

/// Maximum characters per span
pub const SPAN_LEN: usize = 24;

/// Glyph advance in pixels (6x10 font)
pub const CHAR_WIDTH: u16 = 6;

/// Line advance in pixels for `'\n'`
pub const LINE_HEIGHT: u16 = 10;

/// A run of text written at one cursor position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub text: String<SPAN_LEN>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Span {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "({}, {}) {}", self.x, self.y, self.text.as_str());
    }
}

/// Text-recording display
///
/// Keeps a working frame that drawing calls modify, and a visible frame
/// that only changes on `flush`.
#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    width: u16,
    height: u16,
    address: Option<u8>,
    cursor: (u16, u16),
    /// Frame being drawn
    working: Vec<Span, MAX_SPANS>,
    /// Frame last pushed by `flush`
    visible: Vec<Span, MAX_SPANS>,
    flushes: u32,
    /// Error returned by `initialize`, to simulate an absent display
    init_failure: Option<DisplayError>,
    /// Error returned by every `flush` after a successful `initialize`
    flush_failure: Option<DisplayError>,
}

impl TextFrame {
    /// Create a display that comes online normally
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a display whose `initialize` fails with `error`
    pub fn unreachable(error: DisplayError) -> Self {
        Self {
            init_failure: Some(error),
            ..Self::default()
        }
    }

    /// Create a display that comes online but fails every flush with `error`
    pub fn failing_flush(error: DisplayError) -> Self {
        Self {
            flush_failure: Some(error),
            ..Self::default()
        }
    }

    /// Bus address given to a successful `initialize`
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Pixel dimensions given to `initialize`
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Number of completed flushes
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Spans visible on the device
    pub fn spans(&self) -> &[Span] {
        &self.visible
    }

    /// Visible text, one entry per span, in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|s| s.text.as_str())
    }

    /// Check whether any visible span contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|line| line.contains(needle))
    }

    fn columns_left(&self) -> usize {
        (self.width.saturating_sub(self.cursor.0) / CHAR_WIDTH) as usize
    }

    fn push_span(&mut self, text: &str) {
        if text.is_empty() || self.cursor.1 >= self.height {
            return;
        }

        // Clip at the right edge (in glyphs) and at span capacity (in bytes)
        let columns = self.columns_left();
        let mut end = 0;
        for (glyphs, (idx, ch)) in text.char_indices().enumerate() {
            let next = idx + ch.len_utf8();
            if glyphs >= columns || next > SPAN_LEN {
                break;
            }
            end = next;
        }
        let clipped = &text[..end];
        if clipped.is_empty() {
            return;
        }

        let mut span = Span {
            x: self.cursor.0,
            y: self.cursor.1,
            text: String::new(),
        };
        // Fits: clipped to SPAN_LEN bytes above
        let _ = span.text.push_str(clipped);
        let advance = clipped.chars().count() as u16 * CHAR_WIDTH;
        // Frame full: drop the span, like pixels drawn off-screen
        let _ = self.working.push(span);
        self.cursor.0 = self.cursor.0.saturating_add(advance);
    }
}

impl FrameDisplay for TextFrame {
    fn initialize(&mut self, width: u16, height: u16, address: u8) -> Result<(), DisplayError> {
        if let Some(error) = self.init_failure {
            return Err(error);
        }
        self.width = width;
        self.height = height;
        self.address = Some(address);
        Ok(())
    }

    fn clear(&mut self) {
        self.working.clear();
        self.cursor = (0, 0);
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    fn write_text(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.push_span(first);
        }
        for line in lines {
            self.cursor = (0, self.cursor.1.saturating_add(LINE_HEIGHT));
            self.push_span(line);
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.address.is_none() {
            return Err(DisplayError::NotInitialized);
        }
        if let Some(error) = self.flush_failure {
            return Err(error);
        }
        self.visible = self.working.clone();
        self.flushes += 1;
        Ok(())
    }
}
