use thiserror::Error;

use crate::format::SymbolFormat;

#[derive(Error, Debug)]
pub enum BarcodeError {
    #[error("Error generating {format} barcode: {message}")]
    Encoding {
        format: SymbolFormat,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unknown barcode format: {0}")]
    UnknownFormat(String),
}

impl BarcodeError {
    pub(crate) fn encoding(format: SymbolFormat, message: impl Into<String>) -> Self {
        BarcodeError::Encoding {
            format,
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        BarcodeError::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
