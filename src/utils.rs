// ABOUTME: Utility functions for the premark application
// ABOUTME: Path validation for CLI inputs and config file discovery

use crate::errors::{PremarkError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Config file picked up from a directory source when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "premark.yaml";

/// Validate that a path exists (file or directory)
pub fn validate_path_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PremarkError::PathNotFoundError(path.to_path_buf()));
    }
    Ok(())
}

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    validate_path_exists(path)?;
    if !path.is_file() {
        return Err(PremarkError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Find `premark.yaml` inside a directory source.
pub fn discover_config(source: &Path) -> Option<PathBuf> {
    if !source.is_dir() {
        return None;
    }
    let candidate = source.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        debug!("Discovered config file {:?}", candidate);
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_paths() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("slides.md");
        fs::write(&file, "# Hi").expect("write");

        assert!(validate_path_exists(tmp.path()).is_ok());
        assert!(validate_file_exists(&file).is_ok());
        assert!(matches!(
            validate_file_exists(tmp.path()),
            Err(PremarkError::ValidationError(_))
        ));
        assert!(matches!(
            validate_path_exists(&tmp.path().join("nope")),
            Err(PremarkError::PathNotFoundError(_))
        ));
    }

    #[test]
    fn test_discover_config() {
        let tmp = TempDir::new().expect("tmp");
        assert_eq!(discover_config(tmp.path()), None);

        let config = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&config, "sections: []").expect("write");
        assert_eq!(discover_config(tmp.path()), Some(config.clone()));
        assert_eq!(discover_config(&config), None);
    }
}
