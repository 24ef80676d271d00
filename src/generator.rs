use std::{path::Path, sync::Arc};

use parking_lot::Mutex;

use crate::{
    error::Result,
    font_storage::FontStorage,
    renderer::{Frame, TextStyle, compose},
    state::Assets,
    text::{SearchOutcome, TextFitter},
    typeface::{FontTypeface, Typeface},
};

/// High-level entry point: fonts, layout and rendering behind one handle.
///
/// Holds the layout (`TextFitter`) and style as plain values, and the font
/// database plus the active typeface behind `Mutex`es so a single generator
/// can be shared between threads.
pub struct Generator {
    fitter: TextFitter,
    style: TextStyle,

    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
    typeface: Mutex<Option<Arc<dyn Typeface + Send + Sync>>>,
}

impl Generator {
    /// Creates a generator with an empty font storage and no typeface.
    pub fn new(fitter: TextFitter, style: TextStyle) -> Self {
        Self {
            fitter,
            style,
            font_storage: Mutex::new(FontStorage::new()),
            typeface: Mutex::new(None),
        }
    }

    /// Column layout and font-size bounds.
    pub fn fitter(&self) -> &TextFitter {
        &self.fitter
    }

    /// Family and colour the text is drawn in.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }
}

/// font setup
impl Generator {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font file into the storage.
    pub fn load_font_file(&self, path: &Path) -> Result<()> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Resolves the style's family in the storage and makes it the active
    /// typeface.
    pub fn select_style_family(&self) -> Result<()> {
        let typeface =
            FontTypeface::from_storage(&mut self.font_storage.lock(), &self.style.font_family)?;
        log::info!(
            "Using font {:?} for family '{}'",
            typeface.font().name(),
            self.style.font_family
        );
        self.set_typeface(typeface);
        Ok(())
    }

    /// Replaces the active typeface.
    pub fn set_typeface(&self, typeface: impl Typeface + Send + Sync + 'static) {
        *self.typeface.lock() = Some(Arc::new(typeface));
    }

    pub fn has_typeface(&self) -> bool {
        self.typeface.lock().is_some()
    }

    fn typeface(&self) -> Option<Arc<dyn Typeface + Send + Sync>> {
        self.typeface.lock().clone()
    }
}

/// layout and rendering
impl Generator {
    /// Runs the font-size search for `text` without drawing.
    pub fn search(&self, text: &str) -> Option<SearchOutcome> {
        let Some(typeface) = self.typeface() else {
            log::warn!("Search called before a typeface was selected.");
            return None;
        };
        Some(self.fitter.search(text, typeface.as_ref()))
    }

    /// Composes `text` onto `assets`.
    ///
    /// Returns `None` when no typeface has been selected yet.
    pub fn render(&self, assets: &Assets, text: &str) -> Option<Frame> {
        let Some(typeface) = self.typeface() else {
            log::warn!("Render called before a typeface was selected.");
            return None;
        };
        Some(compose(
            assets,
            &self.fitter,
            typeface.as_ref(),
            &self.style,
            text,
        ))
    }
}
