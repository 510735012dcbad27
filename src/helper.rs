use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::BarcodeProperties;
use crate::error::{BarcodeError, Result};
use crate::format::SymbolFormat;
use crate::matrix::encode_to_bytes;

pub const DEFAULT_BASE_NAME: &str = "barcode";

/// Source of the timestamp embedded in output file names.
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// `<baseName>_<unixTimestampSeconds>.png`
///
/// Names are only unique per second: two images with the same base name
/// written within one second share a name and the later one wins.
pub fn file_name(base_name: &str, unix_seconds: i64) -> String {
    let base_name = if base_name.is_empty() {
        DEFAULT_BASE_NAME
    } else {
        base_name
    };
    format!("{}_{}.png", base_name, unix_seconds)
}

#[derive(Clone)]
pub struct BarcodeHelper {
    properties: BarcodeProperties,
    clock: Arc<dyn Clock>,
}

impl BarcodeHelper {
    pub fn new(properties: BarcodeProperties) -> Self {
        Self::with_clock(properties, Arc::new(SystemClock))
    }

    pub fn with_clock(properties: BarcodeProperties, clock: Arc<dyn Clock>) -> Self {
        Self { properties, clock }
    }

    pub fn properties(&self) -> &BarcodeProperties {
        &self.properties
    }

    pub fn generate_file_name(&self, base_name: &str) -> String {
        file_name(base_name, self.clock.unix_seconds())
    }

    /// Writes the barcode into the configured upload directory.
    pub fn generate_barcode_image(
        &self,
        text: &str,
        format: SymbolFormat,
        base_name: &str,
        width: u32,
        height: u32,
    ) -> Result<PathBuf> {
        if !self.properties.is_upload_dir_configured() {
            return Err(BarcodeError::configuration(
                "Upload directory is not configured (fenix.spring.barcode.uploadDir)",
            ));
        }
        let target_dir = Path::new(&self.properties.upload_dir);
        self.write_barcode_image(text, format, base_name, width, height, target_dir)
    }

    /// Encodes `text` and writes it as a PNG into `target_dir`, creating the
    /// directory when needed. Returns the path of the written file.
    pub fn write_barcode_image(
        &self,
        text: &str,
        format: SymbolFormat,
        base_name: &str,
        width: u32,
        height: u32,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        if target_dir.to_string_lossy().trim().is_empty() {
            return Err(BarcodeError::configuration("Target directory is empty"));
        }

        let bytes = encode_to_bytes(text, format, width, height)?;

        fs::create_dir_all(target_dir)?;
        let path = target_dir.join(self.generate_file_name(base_name));
        fs::write(&path, &bytes)?;

        info!(%format, path = %path.display(), "Barcode saved");
        Ok(path)
    }

    /// PNG bytes, for callers that serve the image instead of storing it.
    pub fn generate_barcode_bytes(
        &self,
        text: &str,
        format: SymbolFormat,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        encode_to_bytes(text, format, width, height)
    }
}

impl std::fmt::Debug for BarcodeHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarcodeHelper")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn helper_in(dir: &Path, now: i64) -> BarcodeHelper {
        BarcodeHelper::with_clock(
            BarcodeProperties::new(dir.to_string_lossy()),
            Arc::new(FixedClock(now)),
        )
    }

    #[test]
    fn test_file_name_pattern() {
        assert_eq!(file_name("barcode", 1700000000), "barcode_1700000000.png");
        assert_eq!(file_name("", 42), "barcode_42.png");
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.unix_seconds() > 1_577_836_800);
    }

    #[test]
    fn test_generate_image_uses_clock() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let helper = helper_in(temp_dir.path(), 1700000000);

        let path = helper
            .generate_barcode_image("ABC123456789", SymbolFormat::Code128, "label", 300, 150)
            .unwrap();

        assert_eq!(path, temp_dir.path().join("label_1700000000.png"));
        assert!(path.is_file());
    }

    #[test]
    fn test_missing_upload_dir_fails_before_encoding() {
        let helper = BarcodeHelper::new(BarcodeProperties::default());
        // Invalid EAN-13 content would be an encoding error if encoding ran first
        let err = helper
            .generate_barcode_image("bad", SymbolFormat::Ean13, "label", 300, 150)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::Configuration { .. }));
    }

    #[test]
    fn test_blank_upload_dir_is_unconfigured() {
        let helper = BarcodeHelper::new(BarcodeProperties::new("   "));
        let err = helper
            .generate_barcode_image("hello", SymbolFormat::QrCode, "label", 100, 100)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::Configuration { .. }));
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let target = temp_dir.path().join("nested").join("barcodes");
        let helper = helper_in(&target, 5);

        let path = helper
            .generate_barcode_image("hello", SymbolFormat::QrCode, "qr", 100, 100)
            .unwrap();
        assert_eq!(path, target.join("qr_5.png"));
        assert!(path.is_file());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, b"plain file").expect("Failed to write file");

        let helper = helper_in(&blocker, 7);
        let err = helper
            .generate_barcode_image("hello", SymbolFormat::QrCode, "qr", 100, 100)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::Io(_)));
    }

    #[test]
    fn test_encoding_error_writes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let helper = helper_in(temp_dir.path(), 9);

        let err = helper
            .generate_barcode_image("1234567", SymbolFormat::Itf, "itf", 300, 150)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::Encoding { .. }));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_same_second_same_name_collides() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let helper = helper_in(temp_dir.path(), 1700000000);

        let first = helper
            .generate_barcode_image("first", SymbolFormat::QrCode, "dup", 200, 200)
            .unwrap();
        let first_bytes = fs::read(&first).unwrap();

        let second = helper
            .generate_barcode_image("second payload", SymbolFormat::QrCode, "dup", 200, 200)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
        assert_ne!(fs::read(&second).unwrap(), first_bytes);
    }

    #[test]
    fn test_explicit_target_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let helper =
            BarcodeHelper::with_clock(BarcodeProperties::default(), Arc::new(FixedClock(3)));

        let path = helper
            .write_barcode_image("12345678", SymbolFormat::Itf, "itf", 300, 150, temp_dir.path())
            .unwrap();
        assert_eq!(path, temp_dir.path().join("itf_3.png"));

        let err = helper
            .write_barcode_image("12345678", SymbolFormat::Itf, "itf", 300, 150, Path::new(""))
            .unwrap_err();
        assert!(matches!(err, BarcodeError::Configuration { .. }));
    }

    #[test]
    fn test_blank_target_dir_matches_blank_upload_dir() {
        let helper =
            BarcodeHelper::with_clock(BarcodeProperties::new("  "), Arc::new(FixedClock(4)));

        let explicit = helper
            .write_barcode_image("12345678", SymbolFormat::Itf, "itf", 300, 150, Path::new("  "))
            .unwrap_err();
        let configured = helper
            .generate_barcode_image("12345678", SymbolFormat::Itf, "itf", 300, 150)
            .unwrap_err();

        assert!(matches!(explicit, BarcodeError::Configuration { .. }));
        assert!(matches!(configured, BarcodeError::Configuration { .. }));
        assert!(!Path::new("  ").exists());
    }
}
