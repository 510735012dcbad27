use std::fmt;
use std::str::FromStr;

use rxing::BarcodeFormat;

use crate::error::{BarcodeError, Result};

pub const EAN_13_LENGTH: usize = 13;

/// Barcode symbologies exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolFormat {
    Code128,
    QrCode,
    Aztec,
    Ean13,
    Code39,
    Itf,
    DataMatrix,
    Pdf417,
}

impl SymbolFormat {
    pub const ALL: [SymbolFormat; 8] = [
        SymbolFormat::Code128,
        SymbolFormat::QrCode,
        SymbolFormat::Aztec,
        SymbolFormat::Ean13,
        SymbolFormat::Code39,
        SymbolFormat::Itf,
        SymbolFormat::DataMatrix,
        SymbolFormat::Pdf417,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SymbolFormat::Code128 => "CODE_128",
            SymbolFormat::QrCode => "QR_CODE",
            SymbolFormat::Aztec => "AZTEC",
            SymbolFormat::Ean13 => "EAN_13",
            SymbolFormat::Code39 => "CODE_39",
            SymbolFormat::Itf => "ITF",
            SymbolFormat::DataMatrix => "DATA_MATRIX",
            SymbolFormat::Pdf417 => "PDF_417",
        }
    }

    /// True for 1D (linear) symbologies.
    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            SymbolFormat::Code128 | SymbolFormat::Ean13 | SymbolFormat::Code39 | SymbolFormat::Itf
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            SymbolFormat::Code128 => {
                "High-density 1D format for all ASCII characters, used in logistics and tracking"
            }
            SymbolFormat::QrCode => "2D format for larger payloads such as URLs or contact data",
            SymbolFormat::Aztec => "2D format for small payloads, up to roughly 3000 characters",
            SymbolFormat::Ean13 => "1D retail product format, exactly 13 digits",
            SymbolFormat::Code39 => "1D alphanumeric format used in inventory and military labels",
            SymbolFormat::Itf => "1D numeric format for packaging, even number of digits",
            SymbolFormat::DataMatrix => {
                "2D format for small to medium payloads in industry and healthcare"
            }
            SymbolFormat::Pdf417 => "Stacked 2D format for IDs, shipping and inventory",
        }
    }

    /// A payload this format accepts.
    pub fn sample(&self) -> &'static str {
        match self {
            SymbolFormat::Code128 => "ABC123456789",
            SymbolFormat::QrCode => "https://example.com/qr",
            SymbolFormat::Aztec => "https://example.com/aztec",
            SymbolFormat::Ean13 => "0123456789012",
            SymbolFormat::Code39 => "CODE39EXAMPLE",
            SymbolFormat::Itf => "12345678",
            SymbolFormat::DataMatrix => "DATAMATRIX123",
            SymbolFormat::Pdf417 => "PDF417EXAMPLEDATA",
        }
    }

    /// Rejects payloads that can never encode in this format.
    ///
    /// Only structural checks live here. Check digits and per-character
    /// alphabets are left to the encoder.
    pub fn validate(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(BarcodeError::encoding(*self, "Found empty contents"));
        }

        let all_digits = text.bytes().all(|b| b.is_ascii_digit());

        match self {
            SymbolFormat::Ean13 => {
                if text.len() != EAN_13_LENGTH || !all_digits {
                    return Err(BarcodeError::encoding(
                        *self,
                        format!(
                            "Requires exactly {} numeric digits, got {:?}",
                            EAN_13_LENGTH, text
                        ),
                    ));
                }
            }
            SymbolFormat::Itf => {
                if !all_digits {
                    return Err(BarcodeError::encoding(
                        *self,
                        "Input should only contain digits 0-9",
                    ));
                }
                if text.len() % 2 != 0 {
                    return Err(BarcodeError::encoding(
                        *self,
                        format!("The length of the input should be even, got {}", text.len()),
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }

    pub(crate) fn to_rxing(self) -> BarcodeFormat {
        match self {
            SymbolFormat::Code128 => BarcodeFormat::CODE_128,
            SymbolFormat::QrCode => BarcodeFormat::QR_CODE,
            SymbolFormat::Aztec => BarcodeFormat::AZTEC,
            SymbolFormat::Ean13 => BarcodeFormat::EAN_13,
            SymbolFormat::Code39 => BarcodeFormat::CODE_39,
            SymbolFormat::Itf => BarcodeFormat::ITF,
            SymbolFormat::DataMatrix => BarcodeFormat::DATA_MATRIX,
            SymbolFormat::Pdf417 => BarcodeFormat::PDF_417,
        }
    }
}

impl fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolFormat {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self> {
        // "QR_CODE", "qr-code" and "qrcode" all name the same format
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        SymbolFormat::ALL
            .into_iter()
            .find(|format| format.name().replace('_', "") == wanted)
            .ok_or_else(|| BarcodeError::UnknownFormat(s.to_string()))
    }
}
