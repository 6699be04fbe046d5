//! Display width checks and font scaling for the input line.

use serde::Serialize;

/// Font size step applied per overflowing edit.
const SHRINK_STEP: u32 = 2;

/// Answers whether text fits the input line at a given font size.
pub trait WidthOracle {
    /// Rendered width of `text` in pixels.
    fn measure_width(&self, text: &str, font_size: u32) -> u32;

    /// Width available for text in pixels.
    fn available_width(&self) -> u32;

    fn overflows(&self, text: &str, font_size: u32) -> bool {
        self.measure_width(text, font_size) >= self.available_width()
    }
}

/// Width model where every glyph advances by the same fraction of the
/// font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Width of the input line in pixels.
    pub width: u32,
    /// Pixels reserved for margins inside the input line.
    pub padding: u32,
    /// Glyph advance as a fraction of the font size.
    pub glyph_advance: f32,
}

impl MonospaceMetrics {
    pub fn new(width: u32, padding: u32, glyph_advance: f32) -> Self {
        Self {
            width,
            padding,
            glyph_advance,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(320, 30, 0.6)
    }
}

impl WidthOracle for MonospaceMetrics {
    fn measure_width(&self, text: &str, font_size: u32) -> u32 {
        let advance = font_size as f32 * self.glyph_advance;
        (text.chars().count() as f32 * advance).ceil() as u32
    }

    fn available_width(&self) -> u32 {
        self.width.saturating_sub(self.padding)
    }
}

/// Current font size of the input line.
///
/// The size only shrinks while editing; [`FontScale::reset`] is the only
/// way back to the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FontScale {
    size: u32,
    default_size: u32,
    min_size: u32,
}

impl FontScale {
    /// `min_size` is clamped to `default_size`.
    pub fn new(default_size: u32, min_size: u32) -> Self {
        let min_size = min_size.min(default_size);
        Self {
            size: default_size,
            default_size,
            min_size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    pub fn shrink(&mut self) {
        self.size = self.size.saturating_sub(SHRINK_STEP).max(self.min_size);
    }

    pub fn reset(&mut self) {
        self.size = self.default_size;
    }

    /// Shrink once if `text` overflows at the current size.
    ///
    /// Returns whether the size changed.
    pub fn fit(&mut self, text: &str, oracle: &dyn WidthOracle) -> bool {
        if !oracle.overflows(text, self.size) {
            return false;
        }

        let before = self.size;
        self.shrink();
        before != self.size
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::new(25, 10)
    }
}
