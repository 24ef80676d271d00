use crate::{
    text::{FitAttempt, TextFitter},
    typeface::TextMeasure,
};

/// Final state of a font-size search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Layout at the chosen size. Render from this; it was computed at
    /// `attempt.font_size`.
    pub attempt: FitAttempt,
    /// Number of layouts tried, including the final one.
    pub attempts: u32,
    /// Number of times the size was decreased.
    pub reductions: u32,
}

impl SearchOutcome {
    pub fn font_size(&self) -> u32 {
        self.attempt.font_size
    }

    /// `false` when the floor was reached and text is still left over.
    pub fn fits(&self) -> bool {
        self.attempt.fits()
    }
}

impl TextFitter {
    /// Shrinks the font one pixel at a time until `text` fits.
    ///
    /// The search starts at the initial font size and stops at the first size
    /// that fits or at the floor, whichever comes first. At the floor the last
    /// attempt is returned as is: some words may be missing from it. Every
    /// size is laid out from scratch since wrap points move with the glyph
    /// widths.
    pub fn search<M>(&self, text: &str, measure: &M) -> SearchOutcome
    where
        M: TextMeasure + ?Sized,
    {
        let mut font_size = self.initial_font_size();
        let mut attempts = 0;
        let mut reductions = 0;

        loop {
            let attempt = self.attempt(text, font_size, measure);
            attempts += 1;

            if attempt.fits() {
                log::debug!("Text fits at font size {}", font_size);
                return SearchOutcome {
                    attempt,
                    attempts,
                    reductions,
                };
            }

            if font_size <= self.min_font_size() {
                log::warn!(
                    "Font size reached the floor of {}px. Some words might not fit properly.",
                    font_size
                );
                return SearchOutcome {
                    attempt,
                    attempts,
                    reductions,
                };
            }

            font_size -= 1;
            reductions += 1;
            log::info!("Reducing font size to {} to fit text.", font_size);
        }
    }
}
