//! Error types for slideshow generation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideshowError {
    #[error("Image folder does not exist: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("No images found.")]
    NoImagesFound,

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error(
        "Transition of {transition}s is too long for {images} images shown {display}s each"
    )]
    TransitionTooLong {
        display: f64,
        transition: f64,
        images: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type Result<T> = std::result::Result<T, SlideshowError>;
