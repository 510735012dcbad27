use std::path::PathBuf;

use crate::config::BarcodeProperties;
use crate::error::Result;
use crate::format::SymbolFormat;
use crate::helper::BarcodeHelper;

/// Per-format entry points over [`BarcodeHelper`].
///
/// `barcode_img_*` writes `<baseName>_<unixTimestampSeconds>.png` into the
/// configured upload directory and returns its path. `barcode_bytes_*` returns
/// the PNG in memory.
#[derive(Debug, Clone)]
pub struct BarcodeService {
    helper: BarcodeHelper,
}

impl BarcodeService {
    pub fn new(helper: BarcodeHelper) -> Self {
        Self { helper }
    }

    pub fn from_properties(properties: BarcodeProperties) -> Self {
        Self::new(BarcodeHelper::new(properties))
    }

    pub fn helper(&self) -> &BarcodeHelper {
        &self.helper
    }

    pub fn barcode_img(
        &self,
        format: SymbolFormat,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.helper
            .generate_barcode_image(text, format, base_name, width, height)
    }

    pub fn barcode_bytes(
        &self,
        format: SymbolFormat,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        self.helper.generate_barcode_bytes(text, format, width, height)
    }

    /// CODE_128: high-density 1D format covering all ASCII characters.
    /// Common in logistics and tracking, e.g. `"ABC123456789"`.
    pub fn barcode_img_128(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Code128, text, base_name, width, height)
    }

    pub fn barcode_bytes_128(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Code128, text, width, height)
    }

    /// AZTEC: 2D format for small payloads such as URLs or identifiers.
    pub fn barcode_img_aztec(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Aztec, text, base_name, width, height)
    }

    pub fn barcode_bytes_aztec(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Aztec, text, width, height)
    }

    /// QR_CODE: 2D format for larger payloads, e.g. `"https://example.com/qr"`.
    pub fn barcode_img_qr_code(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::QrCode, text, base_name, width, height)
    }

    pub fn barcode_bytes_qr_code(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::QrCode, text, width, height)
    }

    /// EAN_13: retail product format. `text` must be exactly 13 digits with a
    /// valid check digit, e.g. `"0123456789012"`.
    pub fn barcode_img_ean13(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Ean13, text, base_name, width, height)
    }

    pub fn barcode_bytes_ean13(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Ean13, text, width, height)
    }

    /// CODE_39: alphanumeric 1D format (0-9, A-Z and a few symbols).
    pub fn barcode_img_code39(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Code39, text, base_name, width, height)
    }

    pub fn barcode_bytes_code39(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Code39, text, width, height)
    }

    /// ITF: numeric 1D format. `text` must have an even number of digits.
    pub fn barcode_img_itf(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Itf, text, base_name, width, height)
    }

    pub fn barcode_bytes_itf(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Itf, text, width, height)
    }

    pub fn barcode_img_data_matrix(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::DataMatrix, text, base_name, width, height)
    }

    pub fn barcode_bytes_data_matrix(
        &self,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::DataMatrix, text, width, height)
    }

    /// PDF_417: stacked 2D format. The output keeps the symbol's own aspect
    /// ratio, so it may be smaller than the requested box in one dimension.
    pub fn barcode_img_pdf417(
        &self,
        text: &str,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        self.barcode_img(SymbolFormat::Pdf417, text, base_name, width, height)
    }

    pub fn barcode_bytes_pdf417(&self, text: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        self.barcode_bytes(SymbolFormat::Pdf417, text, width, height)
    }
}
