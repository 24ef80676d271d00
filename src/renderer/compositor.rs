use image::{Rgba, RgbaImage};

use crate::{
    renderer::Canvas,
    state::Assets,
    text::{FitAttempt, SearchOutcome, TextFitter},
    typeface::Typeface,
};

/// Family and colour the text is set in.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub color: Rgba<u8>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            color: Rgba([0, 0, 0, 255]),
        }
    }
}

/// A finished composite and the layout that produced it.
pub struct Frame {
    pub image: RgbaImage,
    pub outcome: SearchOutcome,
}

/// Searches for a font size and draws the final composite.
///
/// The canvas takes the size of the base image. Drawing order is: base image,
/// each column under its own shear, overlay. The overlay is drawn whether or
/// not the text fit.
pub fn compose<F>(
    assets: &Assets,
    fitter: &TextFitter,
    typeface: &F,
    style: &TextStyle,
    text: &str,
) -> Frame
where
    F: Typeface + ?Sized,
{
    let outcome = fitter.search(text, typeface);

    let mut canvas = Canvas::new(assets.base.width(), assets.base.height());
    canvas.clear();
    canvas.draw_image(&assets.base, 0, 0);
    canvas.set_fill_color(style.color);
    draw_attempt(&mut canvas, fitter, &outcome.attempt, typeface);
    canvas.draw_image(&assets.overlay, 0, 0);

    log::debug!(
        "Composed {}x{} frame at font size {} ({} lines)",
        canvas.width(),
        canvas.height(),
        outcome.font_size(),
        outcome.attempt.lines().count()
    );

    Frame {
        image: canvas.into_image(),
        outcome,
    }
}

/// Draws every column of `attempt` at the size it was computed for.
pub fn draw_attempt<F>(
    canvas: &mut Canvas,
    fitter: &TextFitter,
    attempt: &FitAttempt,
    typeface: &F,
) where
    F: Typeface + ?Sized,
{
    let font_size = attempt.font_size as f32;

    for (config, column) in fitter.columns().iter().zip(&attempt.columns) {
        canvas.with_transform(&config.transform(), |canvas| {
            for line in &column.lines {
                canvas.fill_text(typeface, &line.text, font_size, line.x, line.y);
            }
        });
    }
}
