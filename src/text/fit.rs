use crate::{
    text::{LayoutConfig, MIN_FONT_SIZE, WordWrap},
    typeface::TextMeasure,
};

/// A line ready to be drawn, in the column's untransformed coordinates.
/// `y` is the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Result of flowing text into one column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnFit {
    pub lines: Vec<PlacedLine>,
    /// Words that did not fit, joined by single spaces. Empty when everything fit.
    pub remainder: String,
}

impl ColumnFit {
    pub fn fits(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// One trial of the whole layout at a single font size.
///
/// The lines are only meaningful together with `font_size`; a new size means a
/// new attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct FitAttempt {
    pub font_size: u32,
    /// One entry per configured column, in flow order.
    pub columns: Vec<ColumnFit>,
    /// What the last column could not take. It is never drawn.
    pub remainder: String,
}

impl FitAttempt {
    pub fn fits(&self) -> bool {
        self.remainder.is_empty()
    }

    /// Every placed line across all columns, in flow order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.columns.iter().flat_map(|column| column.lines.iter())
    }
}

/// Lays text out across one or more columns and searches for a font size at
/// which it fits.
///
/// With a single column nothing overflows anywhere: the attempt simply does
/// not fit. With more columns the remainder of each column is flowed into the
/// next, and only the last remainder is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFitter {
    columns: Vec<LayoutConfig>,
    initial_font_size: u32,
    min_font_size: u32,
}

impl TextFitter {
    pub fn new(columns: Vec<LayoutConfig>, initial_font_size: u32) -> Self {
        Self {
            columns,
            initial_font_size,
            min_font_size: MIN_FONT_SIZE,
        }
    }

    /// Overrides the search floor.
    pub fn with_min_font_size(mut self, min_font_size: u32) -> Self {
        self.min_font_size = min_font_size;
        self
    }

    pub fn columns(&self) -> &[LayoutConfig] {
        &self.columns
    }

    pub fn initial_font_size(&self) -> u32 {
        self.initial_font_size
    }

    pub fn min_font_size(&self) -> u32 {
        self.min_font_size
    }

    /// Runs the full layout once at `font_size`.
    pub fn attempt<M>(&self, text: &str, font_size: u32, measure: &M) -> FitAttempt
    where
        M: TextMeasure + ?Sized,
    {
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut pending = text.to_string();

        for config in &self.columns {
            let column = fit_column(&pending, config, font_size, measure);
            pending.clone_from(&column.remainder);
            columns.push(column);
        }

        FitAttempt {
            font_size,
            columns,
            remainder: pending,
        }
    }
}

/// Flows `text` into a single column at `font_size`.
///
/// Lines are pulled from the wrapper one at a time; the first line whose
/// baseline would pass the column bottom stops the flow and everything from
/// that line on becomes the remainder.
pub fn fit_column<M>(text: &str, config: &LayoutConfig, font_size: u32, measure: &M) -> ColumnFit
where
    M: TextMeasure + ?Sized,
{
    let size = font_size as f32;
    let line_height = config.line_height(font_size);
    let bottom = config.bottom();

    let words: Vec<&str> = text.split(' ').collect();
    let wrap = WordWrap::new(&words, config.max_width, |line: &str| {
        measure.measure_width(line, size)
    });

    let mut fit = ColumnFit::default();
    let mut y = config.anchor_y;

    for line in wrap {
        if y + line_height > bottom {
            fit.remainder = words[line.words.start..].join(" ");
            break;
        }

        fit.lines.push(PlacedLine {
            text: line.text,
            x: config.line_x(y),
            y,
        });
        y += line_height;
    }

    fit
}
