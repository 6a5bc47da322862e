// Error type for the library. Every variant states *where* things went wrong.
// Note there is no variant for the comparison itself: it cannot fail.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Font bytes could not be read or parsed.
    #[error("Font load error: {0}")]
    FontLoad(String),

    /// A pre-rendered reference image could not be opened or decoded.
    #[error("Image load error ({path}): {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The debug strip could not be written. Never affects the distance.
    #[error("Visualization unavailable: could not write {path}: {reason}")]
    DebugWrite { path: PathBuf, reason: String },

    /// Settings file unreadable or out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Pixel data that doesn't match its declared size.
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    /// The preview window failed to open or update.
    #[error("Preview window error: {0}")]
    Preview(String),
}
