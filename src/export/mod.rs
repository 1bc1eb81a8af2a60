//! Output files: JSON data dumps plus the helpers that manage output directories.
pub mod json;

use crate::error::ConfSheetError;
use crate::error::ResultMessage;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Unity metadata files; they survive directory clears.
const PRESERVED_EXTENSION: &str = "meta";

/// Creates `dir` when missing, then removes every file below it except `.meta` files.
///
/// Subdirectories are walked but never removed.
pub fn clear_dir(dir: &Path) -> Result<(), ConfSheetError> {
    let prefix = dir.display().to_string();
    fs::create_dir_all(dir).map_err(ConfSheetError::from).with_prefix(&prefix)?;
    for entry in fs::read_dir(dir).map_err(ConfSheetError::from).with_prefix(&prefix)? {
        let path = entry?.path();
        if path.is_dir() {
            clear_dir(&path)?;
        } else if path.extension().is_some_and(|extension| extension == PRESERVED_EXTENSION) {
            continue;
        } else {
            debug!(path = %path.display(), "removing stale output");
            fs::remove_file(&path).map_err(ConfSheetError::from).with_prefix(&path.display().to_string())?;
        }
    }
    Ok(())
}

/// Writes `content` to `path`, replacing any existing file.
pub fn save_file(path: &Path, content: &str) -> Result<(), ConfSheetError> {
    let result = (|| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    })();
    result.map_err(ConfSheetError::from).with_prefix(&path.display().to_string())
}
