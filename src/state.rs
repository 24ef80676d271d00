//! Loaded images, current text and the last composed frame.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    error::Result,
    export,
    generator::Generator,
    renderer::Frame,
};

/// The two images every frame is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    /// Drawn first; its size becomes the canvas size.
    pub base: RgbaImage,
    /// Drawn last at the origin, over the text.
    pub overlay: RgbaImage,
}

impl Assets {
    pub fn new(base: RgbaImage, overlay: RgbaImage) -> Self {
        Self { base, overlay }
    }

    /// Decodes both images concurrently and waits for both.
    ///
    /// Nothing can be drawn until both are available, so a failure of either
    /// fails the whole load.
    pub fn load(base: &Path, overlay: &Path) -> Result<Self> {
        let (base, overlay) = std::thread::scope(|scope| {
            let base = scope.spawn(|| load_rgba(base));
            let overlay = scope.spawn(|| load_rgba(overlay));
            (join(base), join(overlay))
        });

        Ok(Self::new(base?, overlay?))
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)?.to_rgba8();
    log::debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// State driven by the two triggers: the images becoming available and the
/// text changing.
///
/// Every trigger after the images are loaded redraws synchronously with the
/// current text, so the latest text always wins. Before that, text changes are
/// only recorded.
#[derive(Default)]
pub struct RenderState {
    assets: Option<Assets>,
    text: String,
    frame: Option<Frame>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.assets.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn assets(&self) -> Option<&Assets> {
        self.assets.as_ref()
    }

    /// Last composed frame, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Images finished loading: draws the first frame.
    pub fn images_loaded(&mut self, assets: Assets, generator: &Generator) -> Option<&Frame> {
        self.assets = Some(assets);
        self.redraw(generator)
    }

    /// Text changed: records it and redraws when the images are ready.
    pub fn set_text(&mut self, text: impl Into<String>, generator: &Generator) -> Option<&Frame> {
        self.text = text.into();
        self.redraw(generator)
    }

    fn redraw(&mut self, generator: &Generator) -> Option<&Frame> {
        let Some(assets) = &self.assets else {
            log::debug!("Images not loaded yet; skipping draw.");
            return None;
        };

        if let Some(frame) = generator.render(assets, &self.text) {
            self.frame = Some(frame);
        }
        self.frame.as_ref()
    }

    /// Writes the last frame as PNG to `path`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when nothing has
    /// been drawn yet.
    pub fn export(&self, path: &Path) -> Result<Option<PathBuf>> {
        let Some(frame) = &self.frame else {
            log::debug!("Nothing drawn yet; skipping export.");
            return Ok(None);
        };

        export::save_png(&frame.image, path)?;
        Ok(Some(path.to_path_buf()))
    }

    /// Writes the last frame as [`export::DEFAULT_FILE_NAME`] inside `dir`.
    pub fn export_in(&self, dir: &Path) -> Result<Option<PathBuf>> {
        self.export(&dir.join(export::DEFAULT_FILE_NAME))
    }
}
