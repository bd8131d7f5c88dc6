//! Crate-level error type wrapping the per-codec error enums.

use crate::encode::ean::EanError;
use crate::png::writer::PngError;
use std::io;
use thiserror::Error;

/// Main error type for the barcode encoder library.
#[derive(Error, Debug)]
pub enum BarcodeError {
    /// The digit string could not be encoded
    #[error(transparent)]
    Ean(#[from] EanError),
    /// The bit sequence could not be serialized as a PNG
    #[error(transparent)]
    Png(#[from] PngError),
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for barcode encoding operations.
pub type Result<T> = std::result::Result<T, BarcodeError>;
