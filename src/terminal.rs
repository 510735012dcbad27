use rxing::common::BitMatrix;

use crate::error::Result;
use crate::format::SymbolFormat;
use crate::matrix::{dimensions, encode_matrix};

/// Row count for linear symbols; they have no natural height.
pub const LINEAR_PREVIEW_ROWS: u32 = 10;

const FALLBACK_TERMINAL_SIZE: (usize, usize) = (120, 60);

/// Encodes `text` at one cell per module and renders it with half blocks.
pub fn preview(text: &str, format: SymbolFormat) -> Result<String> {
    let matrix = preview_matrix(text, format)?;
    Ok(render_matrix_to_terminal(&matrix))
}

pub fn preview_matrix(text: &str, format: SymbolFormat) -> Result<BitMatrix> {
    let rows = if format.is_linear() {
        LINEAR_PREVIEW_ROWS
    } else {
        1
    };
    // Requesting a 1px box makes the writer return the unscaled symbol
    encode_matrix(text, format, 1, rows)
}

pub fn render_matrix_to_terminal(matrix: &BitMatrix) -> String {
    let (width, height) = dimensions(matrix);
    let mut result = String::new();

    let is_dark = |x: u32, y: u32| y < height && matrix.get(x, y);

    // Two matrix rows per terminal line
    for top in (0..height).step_by(2) {
        let bottom = top + 1;
        for x in 0..width {
            let ch = match (is_dark(x, top), is_dark(x, bottom)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Character cells needed to show `matrix`: (columns, lines).
pub fn display_size(matrix: &BitMatrix) -> (usize, usize) {
    let (width, height) = dimensions(matrix);
    (width as usize, (height as usize).div_ceil(2))
}

#[cfg(feature = "terminal")]
pub fn terminal_dimensions() -> (usize, usize) {
    use terminal_size::{terminal_size, Height, Width};

    terminal_size()
        .map(|(Width(w), Height(h))| (w as usize, h as usize))
        .unwrap_or(FALLBACK_TERMINAL_SIZE)
}

#[cfg(not(feature = "terminal"))]
pub fn terminal_dimensions() -> (usize, usize) {
    FALLBACK_TERMINAL_SIZE
}

pub fn fits_in_terminal(matrix: &BitMatrix) -> bool {
    let (columns, lines) = display_size(matrix);
    let (term_width, term_height) = terminal_dimensions();
    columns <= term_width && lines <= term_height
}
