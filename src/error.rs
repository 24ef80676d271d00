//! Error types shared by the library.

use thiserror::Error;

/// Errors produced while loading assets, resolving fonts or exporting frames.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("No font matches family '{0}'")]
    FontNotFound(String),

    #[error("Failed to load font: {0}")]
    FontLoad(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
