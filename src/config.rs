use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BarcodeError, Result};

pub const PROPERTY_PREFIX: &str = "fenix.spring.barcode";
pub const UPLOAD_DIR_ENV: &str = "FENIX_SPRING_BARCODE_UPLOAD_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "fenix-barcode.toml";

/// Settings bound from `fenix.spring.barcode.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeProperties {
    /// Directory where image files are written
    #[serde(rename = "uploadDir", alias = "upload_dir", default)]
    pub upload_dir: String,
}

// Mirrors the `fenix.spring.barcode` prefix so both nested tables and
// dotted keys deserialize.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    fenix: FenixSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FenixSection {
    #[serde(default)]
    spring: SpringSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SpringSection {
    #[serde(default)]
    barcode: BarcodeProperties,
}

impl BarcodeProperties {
    pub fn new(upload_dir: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| BarcodeError::configuration(format!("Invalid configuration: {}", e)))?;
        Ok(file.fenix.spring.barcode)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = ConfigFile {
            fenix: FenixSection {
                spring: SpringSection {
                    barcode: self.clone(),
                },
            },
        };
        toml::to_string(&file).map_err(|e| {
            BarcodeError::configuration(format!("Cannot serialize configuration: {}", e))
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BarcodeError::configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path`, or `./fenix-barcode.toml` when present, then applies the
    /// environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let properties = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(properties.with_env_override(std::env::var(UPLOAD_DIR_ENV).ok()))
    }

    pub fn with_env_override(mut self, upload_dir: Option<String>) -> Self {
        if let Some(dir) = upload_dir {
            self.upload_dir = dir;
        }
        self
    }

    pub fn is_upload_dir_configured(&self) -> bool {
        !self.upload_dir.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_upload_dir_is_empty() {
        let properties = BarcodeProperties::default();
        assert_eq!(properties.upload_dir, "");
        assert!(!properties.is_upload_dir_configured());
    }

    #[test]
    fn test_nested_table() {
        let content = r#"
[fenix.spring.barcode]
uploadDir = "/var/barcodes"
"#;
        let properties = BarcodeProperties::from_toml_str(content).unwrap();
        assert_eq!(properties.upload_dir, "/var/barcodes");
    }

    #[test]
    fn test_dotted_key() {
        let content = r#"fenix.spring.barcode.uploadDir = "out""#;
        let properties = BarcodeProperties::from_toml_str(content).unwrap();
        assert_eq!(properties.upload_dir, "out");
    }

    #[test]
    fn test_snake_case_alias() {
        let content = r#"fenix.spring.barcode.upload_dir = "out""#;
        let properties = BarcodeProperties::from_toml_str(content).unwrap();
        assert_eq!(properties.upload_dir, "out");
    }

    #[test]
    fn test_missing_section_uses_default() {
        let properties = BarcodeProperties::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(properties, BarcodeProperties::default());
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err =
            BarcodeProperties::from_toml_str("fenix.spring.barcode.uploadDir = ").unwrap_err();
        assert!(matches!(err, BarcodeError::Configuration { .. }));
    }

    #[test]
    fn test_env_override() {
        let properties = BarcodeProperties::new("from-file");
        assert_eq!(
            properties.clone().with_env_override(None).upload_dir,
            "from-file"
        );
        assert_eq!(
            properties.with_env_override(Some("from-env".to_string())).upload_dir,
            "from-env"
        );
    }

    #[test]
    fn test_toml_string_roundtrip() {
        let properties = BarcodeProperties::new("images");
        let content = properties.to_toml_string().unwrap();
        assert!(content.contains("uploadDir = \"images\""));
        assert_eq!(BarcodeProperties::from_toml_str(&content).unwrap(), properties);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[fenix.spring.barcode]\nuploadDir = \"barcodes\"\n")
            .expect("Failed to write config");

        let properties = BarcodeProperties::from_file(&path).unwrap();
        assert_eq!(properties.upload_dir, "barcodes");

        let err = BarcodeProperties::from_file(&temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, BarcodeError::Configuration { .. }));
    }
}
