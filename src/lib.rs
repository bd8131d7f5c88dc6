//! # EAN Barcode Encoder Library
//!
//! Encodes EAN-8 and EAN-13 digit strings into their bar/space bit patterns
//! and serializes those patterns as grayscale PNG images.
//!
//! This library is organized into several modules:
//! - `utils`: Error handling and the shared bit-sequence type
//! - `encode`: The EAN symbol encoder (checksum, symbol table, emission)
//! - `png`: CRC-32 and the minimal PNG container writer

// Re-export commonly used types at the crate root
pub use utils::error::{BarcodeError, Result};

pub mod utils {
    pub mod bits;
    pub mod error;
}

pub mod encode {
    pub mod ean;
}

pub mod png {
    pub mod crc;
    pub mod writer;
}

// Public API exports
pub use encode::ean::{EanError, checksum, encode_ean};
pub use png::writer::{BARCODE_HEIGHT, PNG_SIGNATURE, PngError, make_png};
pub use utils::bits::{BitSequence, render};

/// Encodes `code` and serializes the resulting bar pattern as a PNG.
///
/// Convenience wrapper chaining [`encode_ean`] and [`make_png`]; the returned
/// buffer is a complete image file ready to be written to disk verbatim.
pub fn generate_png(code: &str) -> Result<Vec<u8>> {
    let bits = encode_ean(code)?;
    Ok(make_png(&bits)?)
}
