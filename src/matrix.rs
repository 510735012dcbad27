use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};

use image::{GrayImage, ImageFormat, Luma};
use rxing::common::BitMatrix;
use rxing::{MultiFormatWriter, Writer};
use tracing::debug;

use crate::error::{BarcodeError, Result};
use crate::format::SymbolFormat;

pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

const BLACK: Luma<u8> = Luma([0u8]);
const WHITE: Luma<u8> = Luma([255u8]);

fn dimension(format: SymbolFormat, name: &str, value: u32) -> Result<i32> {
    if value == 0 {
        return Err(BarcodeError::encoding(
            format,
            format!("Requested {} must be positive", name),
        ));
    }
    if value > MAX_DIMENSION {
        return Err(BarcodeError::encoding(
            format,
            format!(
                "Requested {} is too large: {} (max {})",
                name, value, MAX_DIMENSION
            ),
        ));
    }
    Ok(value as i32)
}

/// Encodes `text` into a bit matrix scaled to at least `width` x `height`.
///
/// Some symbologies adjust the aspect ratio, so the matrix may not match the
/// requested size exactly.
pub fn encode_matrix(
    text: &str,
    format: SymbolFormat,
    width: u32,
    height: u32,
) -> Result<BitMatrix> {
    let w = dimension(format, "width", width)?;
    let h = dimension(format, "height", height)?;
    format.validate(text)?;

    // Some writers panic instead of failing when the payload exceeds the
    // largest symbol (Data Matrix)
    let encoded = catch_unwind(AssertUnwindSafe(|| {
        MultiFormatWriter::default().encode(text, &format.to_rxing(), w, h)
    }))
    .map_err(|_| BarcodeError::encoding(format, "Data too large for this format"))?;
    let matrix = encoded.map_err(|e| BarcodeError::encoding(format, e.to_string()))?;

    let (matrix_width, matrix_height) = dimensions(&matrix);
    debug!(
        %format,
        width = matrix_width,
        height = matrix_height,
        "Encoded bit matrix"
    );

    Ok(matrix)
}

/// Width and height of `matrix` in cells.
pub fn dimensions(matrix: &BitMatrix) -> (u32, u32) {
    (matrix.getWidth(), matrix.getHeight())
}

/// Rasterizes a matrix one pixel per cell, set cells black on white.
pub fn matrix_to_image(matrix: &BitMatrix) -> GrayImage {
    let (width, height) = dimensions(matrix);
    GrayImage::from_fn(width, height, |x, y| {
        if matrix.get(x, y) {
            BLACK
        } else {
            WHITE
        }
    })
}

pub fn matrix_to_png(matrix: &BitMatrix) -> Result<Vec<u8>> {
    let image = matrix_to_image(matrix);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes `text` straight to PNG bytes.
pub fn encode_to_bytes(
    text: &str,
    format: SymbolFormat,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let matrix = encode_matrix(text, format, width, height)?;
    matrix_to_png(&matrix)
}
