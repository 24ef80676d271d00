use std::sync::Arc;

use crate::typeface::{GlyphBitmap, TextMeasure, Typeface};

/// Monospaced stand-in for a real font.
///
/// Every character advances by `font_size * advance_ratio`; visible characters
/// are drawn as fully covered boxes sitting on the baseline. Useful for
/// previews and for deterministic layouts where no system fonts exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockTypeface {
    pub advance_ratio: f32,
    /// Box height as a fraction of the font size.
    pub ink_ratio: f32,
}

impl Default for BlockTypeface {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl BlockTypeface {
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            ink_ratio: 0.7,
        }
    }

    fn advance(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }
}

impl TextMeasure for BlockTypeface {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance(font_size)
    }
}

impl Typeface for BlockTypeface {
    fn rasterize(&self, text: &str, font_size: f32) -> Vec<GlyphBitmap> {
        let advance = self.advance(font_size);
        // leave a one pixel gap between neighbouring boxes
        let width = (advance - 1.0).floor().max(1.0) as usize;
        let height = (font_size * self.ink_ratio).round().max(1.0) as usize;
        let coverage: Arc<[u8]> = vec![255u8; width * height].into();

        text.chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(i, _)| GlyphBitmap {
                x: i as f32 * advance,
                y: -(height as f32),
                width,
                height,
                coverage: Arc::clone(&coverage),
            })
            .collect()
    }
}
