//! PNG export of finished frames.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbaImage};

use crate::error::Result;

/// File name used when only a directory is given.
pub const DEFAULT_FILE_NAME: &str = "executive-order.png";

/// Encodes `image` as PNG in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Writes `image` as PNG to `path`, whatever its extension.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    log::info!("Saved {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Writes `image` as [`DEFAULT_FILE_NAME`] inside `dir`.
pub fn save_png_in(image: &RgbaImage, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(DEFAULT_FILE_NAME);
    save_png(image, &path)?;
    Ok(path)
}
