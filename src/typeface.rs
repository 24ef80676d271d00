//! Measuring and rasterizing text runs.
//!
//! The fitter only needs widths ([`TextMeasure`]); the compositor additionally
//! needs coverage bitmaps ([`Typeface`]). Both take the font size explicitly so
//! a measurement can never silently refer to a stale size.

use std::sync::Arc;

/// fontdue-backed typeface with a glyph coverage cache.
pub mod font;
/// Fixed-advance typeface that draws solid boxes.
pub mod block;

pub use block::BlockTypeface;
pub use font::FontTypeface;

/// Measures the advance width of a run of text.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `font_size` pixels.
    fn measure_width(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32) -> f32,
{
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Coverage bitmap of one glyph, positioned relative to the pen origin.
///
/// **Y-axis goes down.** `y` is the offset of the bitmap's top row from the
/// baseline, so it is negative for glyphs that sit above the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    /// Row-major 8-bit coverage, `width * height` entries.
    pub coverage: Arc<[u8]>,
}

/// A [`TextMeasure`] that can also produce glyph bitmaps for drawing.
pub trait Typeface: TextMeasure {
    /// Lays out `text` on a single line starting at the pen origin and returns
    /// the bitmaps of every visible glyph.
    fn rasterize(&self, text: &str, font_size: f32) -> Vec<GlyphBitmap>;
}
