//! Exporter settings.
//!
//! Defaults match the game project's directory layout; a TOML file may
//! override any subset of them.

use crate::codegen::hash::DEFAULT_SEED;
use crate::error::ConfSheetError;
use crate::error::ResultMessage;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for workbooks
    pub excel_dir: PathBuf,

    /// Output directory of JSON data files
    pub json_dir: PathBuf,

    /// Output directory of generated loader sources
    pub code_dir: PathBuf,

    /// Workbooks must start with this prefix
    pub workbook_prefix: String,

    /// Workbook file extension, without the dot
    pub workbook_extension: String,

    /// Worksheets must start with this prefix and be longer than it
    pub sheet_prefix: String,

    /// Seed of the table-name hash; must match the game runtime
    pub hash_seed: u32,

    /// Extension of JSON data files, without the dot
    pub json_extension: String,

    /// Reject unrecognized column types instead of passing their values through
    pub strict_types: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excel_dir: PathBuf::from("../excel"),
            json_dir: PathBuf::from("../../Assets/Resources/CEJson"),
            code_dir: PathBuf::from("../../Assets/Scripts/CE/AutoGen"),
            workbook_prefix: "ce_".to_owned(),
            workbook_extension: "xlsx".to_owned(),
            sheet_prefix: "CE".to_owned(),
            hash_seed: DEFAULT_SEED,
            json_extension: "txt".to_owned(),
            strict_types: true,
        }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfSheetError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfSheetError> {
        let prefix = path.display().to_string();
        std::fs::read_to_string(path)
            .map_err(ConfSheetError::from)
            .and_then(|content| Self::from_toml(&content))
            .with_prefix(&prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_overrides() {
        let config = Config::from_toml(r#"
            excel_dir = "tables"
            hash_seed = 131
            strict_types = false
        "#).unwrap();
        assert_eq!(config.excel_dir, PathBuf::from("tables"));
        assert_eq!(config.hash_seed, 131);
        assert!(!config.strict_types);
        assert_eq!(config.workbook_prefix, "ce_");
        assert_eq!(config.json_extension, "txt");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = Config::from_toml("hash_seed = \"abc\"").unwrap_err();
        assert!(matches!(error, ConfSheetError::TomlError(_)));
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let error = Config::load(&path).unwrap_err();
        assert!(error.to_string().starts_with(&path.display().to_string()));
        assert!(matches!(error.root(), ConfSheetError::IoError(_)));
    }
}
