use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{
    error::Result,
    font_storage::FontStorage,
    typeface::{GlyphBitmap, TextMeasure, Typeface},
};

const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Cache key for one rasterized glyph. The size is quantized so that
/// float noise does not create duplicate entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GlyphKey {
    glyph_index: u16,
    font_size: u32,
}

impl GlyphKey {
    fn new(glyph_index: u16, font_size: f32) -> Self {
        Self {
            glyph_index,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
        }
    }
}

struct CachedGlyph {
    metrics: fontdue::Metrics,
    coverage: Arc<[u8]>,
}

/// A single parsed face used for both measuring and drawing.
///
/// Widths follow canvas `measureText` semantics: the sum of advance widths
/// plus pair kerning, not the ink bounds.
pub struct FontTypeface {
    font_id: fontdb::ID,
    font: Arc<fontdue::Font>,
    cache: Mutex<HashMap<GlyphKey, Arc<CachedGlyph>, fxhash::FxBuildHasher>>,
}

impl FontTypeface {
    pub fn new(font_id: fontdb::ID, font: Arc<fontdue::Font>) -> Self {
        Self {
            font_id,
            font,
            cache: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Resolves `family` in `font_storage` (with serif fallback).
    pub fn from_storage(font_storage: &mut FontStorage, family: &str) -> Result<Self> {
        let (font_id, font) = font_storage.query_family(family)?;
        Ok(Self::new(font_id, font))
    }

    pub fn font_id(&self) -> fontdb::ID {
        self.font_id
    }

    pub fn font(&self) -> &fontdue::Font {
        &self.font
    }

    /// Number of glyph bitmaps currently cached.
    pub fn cached_glyphs(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops every cached bitmap.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn glyph(&self, glyph_index: u16, font_size: f32) -> Arc<CachedGlyph> {
        let key = GlyphKey::new(glyph_index, font_size);
        let mut cache = self.cache.lock();
        let entry = cache.entry(key).or_insert_with(|| {
            let (metrics, coverage) = self.font.rasterize_indexed(glyph_index, font_size);
            Arc::new(CachedGlyph {
                metrics,
                coverage: coverage.into(),
            })
        });
        Arc::clone(entry)
    }

    fn kerning(&self, previous: Option<u16>, glyph_index: u16, font_size: f32) -> f32 {
        previous
            .and_then(|left| {
                self.font
                    .horizontal_kern_indexed(left, glyph_index, font_size)
            })
            .unwrap_or(0.0)
    }
}

impl TextMeasure for FontTypeface {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let glyph_index = self.font.lookup_glyph_index(ch);
            width += self.kerning(previous, glyph_index, font_size);
            width += self
                .font
                .metrics_indexed(glyph_index, font_size)
                .advance_width;
            previous = Some(glyph_index);
        }
        width
    }
}

impl Typeface for FontTypeface {
    fn rasterize(&self, text: &str, font_size: f32) -> Vec<GlyphBitmap> {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen_x = 0.0;
        let mut previous = None;

        for ch in text.chars() {
            let glyph_index = self.font.lookup_glyph_index(ch);
            pen_x += self.kerning(previous, glyph_index, font_size);
            previous = Some(glyph_index);

            let glyph = self.glyph(glyph_index, font_size);
            let metrics = glyph.metrics;
            if metrics.width > 0 && metrics.height > 0 {
                glyphs.push(GlyphBitmap {
                    x: pen_x + metrics.xmin as f32,
                    y: -(metrics.ymin as f32 + metrics.height as f32),
                    width: metrics.width,
                    height: metrics.height,
                    coverage: Arc::clone(&glyph.coverage),
                });
            }
            pen_x += metrics.advance_width;
        }

        glyphs
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    /// A system face that covers basic Latin, or `None` on machines without
    /// usable fonts.
    fn system_typeface() -> Option<(FontStorage, FontTypeface)> {
        let mut storage = FontStorage::new();
        storage.load_system_fonts();
        if storage.is_empty() {
            return None;
        }

        let typeface = FontTypeface::from_storage(&mut storage, "Times New Roman").ok()?;
        let covers_latin = "AVhelo"
            .chars()
            .all(|ch| typeface.font().lookup_glyph_index(ch) != 0);
        covers_latin.then_some((storage, typeface))
    }

    #[test]
    fn glyph_key_quantizes_size() {
        assert_eq!(GlyphKey::new(7, 12.0), GlyphKey::new(7, 12.0001));
        assert_ne!(GlyphKey::new(7, 12.0), GlyphKey::new(7, 13.0));
        assert_ne!(GlyphKey::new(7, 12.0), GlyphKey::new(8, 12.0));
    }

    #[test]
    fn typeface_keeps_the_resolved_face_id() {
        let Some((mut storage, typeface)) = system_typeface() else {
            return;
        };
        let (id, _) = storage.query_family("Times New Roman").unwrap();
        assert_eq!(typeface.font_id(), id);
    }

    #[test]
    fn width_is_advances_plus_kerning() {
        let Some((_, typeface)) = system_typeface() else {
            return;
        };
        let font = typeface.font();
        let size = 40.0;

        let a = font.lookup_glyph_index('A');
        let v = font.lookup_glyph_index('V');
        let expected = font.metrics_indexed(a, size).advance_width
            + font.horizontal_kern_indexed(a, v, size).unwrap_or(0.0)
            + font.metrics_indexed(v, size).advance_width;

        assert!((typeface.measure_width("AV", size) - expected).abs() < 1e-3);
        assert_eq!(typeface.measure_width("", size), 0.0);
        assert!(typeface.measure_width("AV", 20.0) < typeface.measure_width("AV", size));
    }

    #[test]
    fn glyphs_are_placed_along_the_baseline() {
        let Some((_, typeface)) = system_typeface() else {
            return;
        };
        let text = "AV hello";
        let glyphs = typeface.rasterize(text, 40.0);

        // the space has no ink
        assert_eq!(glyphs.len(), 7);
        assert!(glyphs.windows(2).all(|pair| pair[0].x < pair[1].x));
        assert!(glyphs.last().unwrap().x < typeface.measure_width(text, 40.0));

        // 'A' rests on the baseline: its top is above it, its bottom near it
        let a = &glyphs[0];
        assert!(a.y < 0.0);
        assert!((a.y + a.height as f32).abs() <= 3.0);
        assert_eq!(a.coverage.len(), a.width * a.height);
    }

    #[test]
    fn repeated_rasterize_reuses_cache() {
        let Some((_, typeface)) = system_typeface() else {
            return;
        };
        typeface.clear_cache();

        typeface.rasterize("hello", 24.0);
        let cached = typeface.cached_glyphs();
        assert_eq!(cached, 4);

        typeface.rasterize("hello", 24.0);
        assert_eq!(typeface.cached_glyphs(), cached);

        typeface.rasterize("hello", 25.0);
        assert_eq!(typeface.cached_glyphs(), cached * 2);

        typeface.clear_cache();
        assert_eq!(typeface.cached_glyphs(), 0);
    }
}
