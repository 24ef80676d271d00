use std::ops::{Deref, DerefMut};

use euclid::default::{Box2D, Point2D, Transform2D};
use image::{Rgba, RgbaImage};

use crate::typeface::{GlyphBitmap, Typeface};

/// RGBA raster with a current transform and fill colour, drawn with
/// source-over compositing.
///
/// **Y-axis goes down.** Text is positioned by its baseline.
pub struct Canvas {
    pixels: RgbaImage,
    transform: Transform2D<f32>,
    fill: Rgba<u8>,
    saved: Vec<(Transform2D<f32>, Rgba<u8>)>,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            transform: Transform2D::identity(),
            fill: Rgba([0, 0, 0, 255]),
            saved: Vec::new(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixels drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Current user-to-device transform.
    pub fn transform(&self) -> Transform2D<f32> {
        self.transform
    }

    pub fn set_fill_color(&mut self, color: Rgba<u8>) {
        self.fill = color;
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Draws `image` untransformed with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.pixels, image, x, y);
    }

    /// Pushes the transform and fill colour; the returned guard pops them
    /// when dropped, however the scope is left.
    pub fn save(&mut self) -> CanvasScope<'_> {
        self.saved.push((self.transform, self.fill));
        CanvasScope { canvas: self }
    }

    /// Pre-multiplies `local` onto the current transform, like canvas
    /// `transform()`: points go through `local` first.
    pub fn apply_transform(&mut self, local: &Transform2D<f32>) {
        self.transform = local.then(&self.transform);
    }

    /// Runs `draw` with `local` applied, restoring the previous state after.
    pub fn with_transform<R>(
        &mut self,
        local: &Transform2D<f32>,
        draw: impl FnOnce(&mut Canvas) -> R,
    ) -> R {
        let mut scope = self.save();
        scope.apply_transform(local);
        draw(&mut scope)
    }

    /// Fills `text` with its baseline starting at `(x, y)` in user space.
    pub fn fill_text<F>(&mut self, typeface: &F, text: &str, font_size: f32, x: f32, y: f32)
    where
        F: Typeface + ?Sized,
    {
        for glyph in typeface.rasterize(text, font_size) {
            self.fill_glyph(&glyph, x + glyph.x, y + glyph.y);
        }
    }

    fn restore(&mut self) {
        if let Some((transform, fill)) = self.saved.pop() {
            self.transform = transform;
            self.fill = fill;
        } else {
            log::warn!("Canvas restore called without a matching save.");
        }
    }

    /// Paints one coverage bitmap whose top-left corner sits at `(left, top)`
    /// in user space.
    ///
    /// Device pixels inside the transformed bounds are mapped back into the
    /// bitmap and sampled, so sheared glyphs come out without holes.
    fn fill_glyph(&mut self, glyph: &GlyphBitmap, left: f32, top: f32) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }

        let to_device = Transform2D::translation(left, top).then(&self.transform);
        let Some(to_glyph) = to_device.inverse() else {
            return;
        };

        let bounds = to_device.outer_transformed_box(&Box2D::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(glyph.width as f32, glyph.height as f32),
        ));

        let x0 = bounds.min.x.floor().max(0.0) as u32;
        let y0 = bounds.min.y.floor().max(0.0) as u32;
        let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(self.height());

        for py in y0..y1 {
            for px in x0..x1 {
                let sample =
                    to_glyph.transform_point(Point2D::new(px as f32 + 0.5, py as f32 + 0.5));
                if sample.x < 0.0 || sample.y < 0.0 {
                    continue;
                }

                let (gx, gy) = (sample.x as usize, sample.y as usize);
                if gx >= glyph.width || gy >= glyph.height {
                    continue;
                }

                let coverage = glyph.coverage[gy * glyph.width + gx];
                if coverage == 0 {
                    continue;
                }

                let alpha = coverage as f32 / 255.0 * self.fill.0[3] as f32 / 255.0;
                blend(self.pixels.get_pixel_mut(px, py), self.fill, alpha);
            }
        }
    }
}

/// Source-over of `color` at `alpha` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, alpha: f32) {
    let dst_alpha = dst.0[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for channel in 0..3 {
        let src = color.0[channel] as f32;
        let below = dst.0[channel] as f32;
        let value = (src * alpha + below * dst_alpha * (1.0 - alpha)) / out_alpha;
        dst.0[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Saved canvas state. Dereferences to the canvas and restores the saved
/// transform and fill colour on drop.
pub struct CanvasScope<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for CanvasScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeface::BlockTypeface;

    fn ink(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn scope_restores_transform() {
        let mut canvas = Canvas::new(10, 10);
        {
            let mut scope = canvas.save();
            scope.apply_transform(&Transform2D::translation(3.0, 4.0));
            scope.set_fill_color(Rgba([255, 0, 0, 255]));
            assert_eq!(scope.transform(), Transform2D::translation(3.0, 4.0));
        }
        assert_eq!(canvas.transform(), Transform2D::identity());
        assert_eq!(canvas.fill, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn with_transform_restores_after_panic() {
        let mut canvas = Canvas::new(10, 10);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            canvas.with_transform::<()>(&Transform2D::translation(2.0, 2.0), |c| {
                c.set_fill_color(Rgba([0, 0, 255, 255]));
                panic!("draw failed");
            })
        }));

        assert!(result.is_err());
        assert_eq!(canvas.transform(), Transform2D::identity());
        assert_eq!(canvas.fill, Rgba([0, 0, 0, 255]));
        assert!(canvas.saved.is_empty());
    }

    #[test]
    fn with_transform_restores_on_early_return() {
        let mut canvas = Canvas::new(10, 10);
        let result: Option<u32> = canvas.with_transform(&Transform2D::translation(1.0, 1.0), |c| {
            let w = c.width();
            if w > 5 {
                return None;
            }
            Some(w)
        });
        assert!(result.is_none());
        assert_eq!(canvas.transform(), Transform2D::identity());
        assert!(canvas.saved.is_empty());
    }

    #[test]
    fn nested_transforms_compose() {
        let mut canvas = Canvas::new(10, 10);
        canvas.with_transform(&Transform2D::translation(2.0, 0.0), |c| {
            c.with_transform(&Transform2D::scale(2.0, 2.0), |c| {
                // scale first, then translate
                let p = c.transform().transform_point(Point2D::new(1.0, 1.0));
                assert_eq!(p, Point2D::new(4.0, 2.0));
            });
            assert_eq!(c.transform(), Transform2D::translation(2.0, 0.0));
        });
    }

    #[test]
    fn fill_text_paints_boxes_above_baseline() {
        let mut canvas = Canvas::new(40, 40);
        let face = BlockTypeface::new(0.5);
        // size 20: boxes of 9x14, baseline at y = 30
        canvas.fill_text(&face, "ab", 20.0, 5.0, 30.0);

        let image = canvas.image();
        assert_eq!(image.get_pixel(5, 16).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(13, 29).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 30).0[3], 0);
        assert_eq!(image.get_pixel(5, 15).0[3], 0);
        assert_eq!(image.get_pixel(14, 20).0[3], 0);
        assert_eq!(ink(&canvas), 2 * 9 * 14);
    }

    #[test]
    fn sheared_text_moves_ink() {
        let face = BlockTypeface::new(0.5);

        let mut plain = Canvas::new(80, 80);
        plain.fill_text(&face, "abc", 20.0, 10.0, 40.0);

        let mut sheared = Canvas::new(80, 80);
        let shear = Transform2D::new(1.0, 0.3, 0.0, 1.0, 0.0, 0.0);
        sheared.with_transform(&shear, |c| c.fill_text(&face, "abc", 20.0, 10.0, 40.0));

        assert_ne!(plain.image(), sheared.image());
        // a pure y-shear keeps every column of a box solid, no holes
        let area = ink(&sheared) as i64;
        assert!((area - ink(&plain) as i64).abs() <= 3 * 14);
    }

    #[test]
    fn glyphs_outside_are_clipped() {
        let mut canvas = Canvas::new(10, 10);
        let face = BlockTypeface::new(0.5);
        canvas.fill_text(&face, "abc", 20.0, -100.0, -100.0);
        canvas.fill_text(&face, "abc", 20.0, 5.0, 12.0);
        assert!(ink(&canvas) > 0);
        assert!(ink(&canvas) < 100);
    }

    #[test]
    fn blend_over_opaque_background() {
        let mut pixel = Rgba([255, 255, 255, 255]);
        blend(&mut pixel, Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(pixel.0[3], 255);
        assert!((pixel.0[0] as i32 - 128).abs() <= 1);

        let mut clear = Rgba([0, 0, 0, 0]);
        blend(&mut clear, Rgba([10, 20, 30, 255]), 1.0);
        assert_eq!(clear, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn draw_image_composites_alpha() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(&RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])), 0, 0);
        canvas.draw_image(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])), 0, 0);
        canvas.draw_image(&RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255])), 3, 3);

        let image = canvas.image();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [255, 0, 0, 255]);

        canvas.clear();
        assert_eq!(ink(&canvas), 0);
    }
}
