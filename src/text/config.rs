use euclid::default::Transform2D;

use crate::text::TextFitter;

/// Smallest font size the search will try, in pixels.
pub const MIN_FONT_SIZE: u32 = 5;

/// Geometry of one text column.
///
/// **Y-axis goes down.** The anchor is the baseline of the first line and the
/// point the column is sheared about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Left edge of the column before the per-line lean.
    pub anchor_x: f32,
    /// Baseline of the first line.
    pub anchor_y: f32,
    /// Widest a line may measure.
    pub max_width: f32,
    /// Baselines may descend this far below `anchor_y`.
    pub max_height: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
    /// Horizontal shear factor (`c` of the canvas transform).
    pub skew_x: f32,
    /// Vertical shear factor (`b` of the canvas transform).
    pub skew_y: f32,
    /// Extra horizontal shift per pixel of descent, measured from `x_offset_base_y`.
    pub x_offset_multiplier: f32,
    pub x_offset_base_y: f32,
}

impl LayoutConfig {
    /// Distance between consecutive baselines, rounded to whole pixels.
    pub fn line_height(&self, font_size: u32) -> f32 {
        (font_size as f32 * self.line_height_ratio).round()
    }

    /// Lowest y a line may reach.
    pub fn bottom(&self) -> f32 {
        self.anchor_y + self.max_height
    }

    /// Left edge of a line whose baseline sits at `y`.
    pub fn line_x(&self, y: f32) -> f32 {
        self.anchor_x + (y - self.x_offset_base_y) * self.x_offset_multiplier
    }

    /// Shear about the anchor: translate to the anchor, apply the
    /// `[1, skew_y, skew_x, 1]` matrix, translate back.
    pub fn transform(&self) -> Transform2D<f32> {
        let shear = Transform2D::new(1.0, self.skew_y, self.skew_x, 1.0, 0.0, 0.0);
        Transform2D::translation(-self.anchor_x, -self.anchor_y)
            .then(&shear)
            .then(&Transform2D::translation(self.anchor_x, self.anchor_y))
    }
}

/// Lean applied to a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    pub skew_x: f32,
    pub skew_y: f32,
    pub x_offset_multiplier: f32,
    pub x_offset_base_y: f32,
}

/// Placement of the overflow column in [`TwoColumnConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecondColumn {
    pub x: f32,
    pub y: f32,
    pub perspective: Perspective,
}

/// Two columns sharing width, font size and line spacing. Whatever does not
/// fit the first column flows into the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoColumnConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub max_width: f32,
    pub initial_font_size: u32,
    pub line_height_ratio: f32,
    pub first_column_max_height: f32,
    pub second_column_max_height: f32,
    pub first_column: Perspective,
    pub second_column: SecondColumn,
}

impl TwoColumnConfig {
    /// Layout of the executive order template.
    pub const EXECUTIVE_ORDER: Self = Self {
        start_x: 170.0,
        start_y: 150.0,
        max_width: 170.0,
        initial_font_size: 36,
        line_height_ratio: 1.5,
        first_column_max_height: 200.0,
        second_column_max_height: 150.0,
        first_column: Perspective {
            skew_x: -0.02,
            skew_y: 0.1,
            x_offset_multiplier: 0.05,
            x_offset_base_y: 50.0,
        },
        second_column: SecondColumn {
            x: 370.0,
            y: 160.0,
            perspective: Perspective {
                skew_x: 0.02,
                skew_y: -0.08,
                x_offset_multiplier: 0.03,
                x_offset_base_y: 50.0,
            },
        },
    };

    /// The first and the overflow column, in fill order.
    pub fn columns(&self) -> [LayoutConfig; 2] {
        let first = self.first_column;
        let second = self.second_column.perspective;
        [
            LayoutConfig {
                anchor_x: self.start_x,
                anchor_y: self.start_y,
                max_width: self.max_width,
                max_height: self.first_column_max_height,
                line_height_ratio: self.line_height_ratio,
                skew_x: first.skew_x,
                skew_y: first.skew_y,
                x_offset_multiplier: first.x_offset_multiplier,
                x_offset_base_y: first.x_offset_base_y,
            },
            LayoutConfig {
                anchor_x: self.second_column.x,
                anchor_y: self.second_column.y,
                max_width: self.max_width,
                max_height: self.second_column_max_height,
                line_height_ratio: self.line_height_ratio,
                skew_x: second.skew_x,
                skew_y: second.skew_y,
                x_offset_multiplier: second.x_offset_multiplier,
                x_offset_base_y: second.x_offset_base_y,
            },
        ]
    }
}

impl From<TwoColumnConfig> for TextFitter {
    fn from(config: TwoColumnConfig) -> Self {
        TextFitter::new(config.columns().to_vec(), config.initial_font_size)
    }
}

/// One column; text that does not fit is never carried anywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleColumnConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub max_width: f32,
    pub max_height: f32,
    pub initial_font_size: u32,
    pub line_height_ratio: f32,
    pub transform: Perspective,
}

impl SingleColumnConfig {
    /// The first column of [`TwoColumnConfig::EXECUTIVE_ORDER`] stretched down
    /// to cover both column heights.
    pub const EXECUTIVE_ORDER: Self = Self {
        start_x: 170.0,
        start_y: 150.0,
        max_width: 170.0,
        max_height: 350.0,
        initial_font_size: 36,
        line_height_ratio: 1.5,
        transform: Perspective {
            skew_x: -0.02,
            skew_y: 0.1,
            x_offset_multiplier: 0.05,
            x_offset_base_y: 50.0,
        },
    };

    /// The only column of this layout.
    pub fn column(&self) -> LayoutConfig {
        LayoutConfig {
            anchor_x: self.start_x,
            anchor_y: self.start_y,
            max_width: self.max_width,
            max_height: self.max_height,
            line_height_ratio: self.line_height_ratio,
            skew_x: self.transform.skew_x,
            skew_y: self.transform.skew_y,
            x_offset_multiplier: self.transform.x_offset_multiplier,
            x_offset_base_y: self.transform.x_offset_base_y,
        }
    }
}

impl From<SingleColumnConfig> for TextFitter {
    fn from(config: SingleColumnConfig) -> Self {
        TextFitter::new(vec![config.column()], config.initial_font_size)
    }
}
