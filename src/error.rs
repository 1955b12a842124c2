//! Error types for image to ZPL conversion.
//!
//! The conversion pipeline itself is total: every pixel binarizes, every
//! byte hex-encodes, every run compresses. Errors only arise at the decode
//! and file I/O boundaries before the pipeline runs.

use thiserror::Error;

/// Main error type for loading images to convert.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be decoded as an image.
    ///
    /// Wraps underlying `image` crate errors for unsupported formats,
    /// truncated files, or corrupt image data.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// A PNG taking the indexed-color fast path failed to decode.
    #[error(transparent)]
    Png(#[from] png::DecodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
