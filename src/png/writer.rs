// src/png/writer.rs

//! Minimal PNG writer for barcode rasters.
//!
//! Serializes a bar/space module sequence into a grayscale PNG held entirely
//! in memory: the 8-byte file signature followed by IHDR, IDAT, and IEND
//! chunks, each length-prefixed and closed with a CRC-32 computed over the
//! chunk tag and payload. Every scanline repeats the same bar pattern, so
//! the image is `len(bits)` pixels wide and [`BARCODE_HEIGHT`] tall.

use crate::png::crc::Crc32;
use crate::utils::bits::BitSequence;
use byteorder::{BigEndian, WriteBytesExt};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::debug;
use std::io::Write;
use thiserror::Error;

/// The fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Barcode images are always this many pixels tall.
pub const BARCODE_HEIGHT: u32 = 30;

/// Bit-pattern lengths accepted by [`make_png`].
pub const EAN8_BIT_LENGTH: usize = 7 * 8 + 11;
pub const EAN13_BIT_LENGTH: usize = 7 * 13 + 11;

// IHDR field values for a non-interlaced 8-bit grayscale image.
const ONE_BYTE_PER_PIXEL: u8 = 8;
const TRUE_GRAY: u8 = 0;
const ZLIB: u8 = 0;
const ADAPTIVE: u8 = 0;
const NO_INTERLACE: u8 = 0;

/// Scanline filter selector: no filtering.
const FILTER_NONE: u8 = 0;

const DARK: u8 = 0x00;
const LIGHT: u8 = 0xFF;

/// Errors that can occur while writing the PNG container.
#[derive(Error, Debug)]
pub enum PngError {
    /// The module sequence is neither an EAN-8 nor an EAN-13 pattern.
    #[error("bit sequence of {0} bits is not an EAN-8 or EAN-13 pattern")]
    UnsupportedLength(usize),
    /// An I/O error occurred while writing to the in-memory buffer.
    #[error("I/O error during write operation")]
    Io(#[from] std::io::Error),
}

/// Rasterizes `bits` and frames the result as a complete PNG byte buffer.
///
/// The caller is responsible for persisting the returned bytes; no partial
/// output is ever produced.
pub fn make_png(bits: &BitSequence) -> Result<Vec<u8>, PngError> {
    let width = bits.len();
    if width != EAN8_BIT_LENGTH && width != EAN13_BIT_LENGTH {
        return Err(PngError::UnsupportedLength(width));
    }

    let raw = rasterize(bits, BARCODE_HEIGHT);
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;
    debug!(
        "compressed {} scanline bytes into {}",
        raw.len(),
        compressed.len()
    );

    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, *b"IHDR", &ihdr_payload(width as u32, BARCODE_HEIGHT)?)?;
    write_chunk(&mut out, *b"IDAT", &compressed)?;
    write_chunk(&mut out, *b"IEND", &[])?;
    Ok(out)
}

/// One filter byte per scanline, then one gray sample per module.
fn rasterize(bits: &BitSequence, height: u32) -> Vec<u8> {
    let mut raw = Vec::with_capacity((bits.len() + 1) * height as usize);
    for _ in 0..height {
        raw.push(FILTER_NONE);
        for bit in bits.iter() {
            raw.push(if *bit { DARK } else { LIGHT });
        }
    }
    raw
}

fn ihdr_payload(width: u32, height: u32) -> Result<Vec<u8>, PngError> {
    let mut header = Vec::with_capacity(13);
    header.write_u32::<BigEndian>(width)?;
    header.write_u32::<BigEndian>(height)?;
    header.write_u8(ONE_BYTE_PER_PIXEL)?;
    header.write_u8(TRUE_GRAY)?;
    header.write_u8(ZLIB)?;
    header.write_u8(ADAPTIVE)?;
    header.write_u8(NO_INTERLACE)?;
    Ok(header)
}

/// Length prefix, tag, payload, then a CRC-32 over tag and payload.
fn write_chunk(out: &mut Vec<u8>, tag: [u8; 4], payload: &[u8]) -> Result<(), PngError> {
    out.write_u32::<BigEndian>(payload.len() as u32)?;
    out.extend_from_slice(&tag);
    out.extend_from_slice(payload);
    let mut crc = Crc32::new();
    crc.update(&tag);
    crc.update(payload);
    out.write_u32::<BigEndian>(crc.finalize())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::ean::encode_ean;
    use crate::png::crc::crc32;
    use bitvec::vec::BitVec;

    fn read_u32(bytes: &[u8]) -> u32 {
        u32::from_be_bytes(bytes[..4].try_into().unwrap())
    }

    #[test]
    fn test_unsupported_lengths_rejected() {
        for len in [0, 66, 95, 103] {
            let bits: BitSequence = BitVec::repeat(true, len);
            assert!(matches!(
                make_png(&bits),
                Err(PngError::UnsupportedLength(n)) if n == len
            ));
        }
    }

    #[test]
    fn test_ihdr_layout() {
        let png = make_png(&encode_ean("12345670").unwrap()).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        // IHDR: 13-byte payload directly after the signature.
        assert_eq!(read_u32(&png[8..]), 13);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(read_u32(&png[16..]), 67);
        assert_eq!(read_u32(&png[20..]), BARCODE_HEIGHT);
        assert_eq!(
            &png[24..29],
            &[ONE_BYTE_PER_PIXEL, TRUE_GRAY, ZLIB, ADAPTIVE, NO_INTERLACE]
        );
        assert_eq!(read_u32(&png[29..]), crc32(&png[12..29]));
    }

    #[test]
    fn test_chunk_sequence_and_crcs() {
        let png = make_png(&encode_ean("12345670").unwrap()).unwrap();
        let mut tags = Vec::new();
        let mut offset = 8;
        while offset < png.len() {
            let size = read_u32(&png[offset..]) as usize;
            let tag_end = offset + 8;
            let payload_end = tag_end + size;
            tags.push(png[offset + 4..tag_end].to_vec());
            assert_eq!(
                read_u32(&png[payload_end..]),
                crc32(&png[offset + 4..payload_end]),
                "chunk checksum mismatch"
            );
            offset = payload_end + 4;
        }
        assert_eq!(offset, png.len());
        assert_eq!(tags, [b"IHDR".to_vec(), b"IDAT".to_vec(), b"IEND".to_vec()]);
    }

    #[test]
    fn test_scanlines_round_trip() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let bits = encode_ean("55123457").unwrap();
        let png = make_png(&bits).unwrap();

        // IDAT payload starts after the signature and the framed IHDR chunk.
        let idat_len = read_u32(&png[33..]) as usize;
        assert_eq!(&png[37..41], b"IDAT");
        let mut raw = Vec::new();
        ZlibDecoder::new(&png[41..41 + idat_len])
            .read_to_end(&mut raw)
            .unwrap();

        let stride = bits.len() + 1;
        assert_eq!(raw.len(), stride * BARCODE_HEIGHT as usize);
        for row in raw.chunks(stride) {
            assert_eq!(row[0], FILTER_NONE);
            for (sample, bit) in row[1..].iter().zip(bits.iter()) {
                assert_eq!(*sample, if *bit { DARK } else { LIGHT });
            }
        }
    }
}
