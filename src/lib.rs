pub mod config;
pub mod error;
pub mod format;
pub mod helper;
pub mod logging;
pub mod matrix;
pub mod service;
pub mod terminal;

pub use config::BarcodeProperties;
pub use error::{BarcodeError, Result};
pub use format::SymbolFormat;
pub use helper::{file_name, BarcodeHelper, Clock, FixedClock, SystemClock};
pub use matrix::{encode_matrix, encode_to_bytes, matrix_to_image, matrix_to_png, PNG_MAGIC};
pub use service::BarcodeService;
pub use terminal::{preview, render_matrix_to_terminal};
