//! CLI argument validation functions

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate message text is not blank
pub fn validate_text(text: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Err("Message text cannot be empty".to_string());
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_config_file_path_existing() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());
    }

    #[test]
    fn test_validate_config_file_path_missing() {
        let err = validate_config_file_path("/definitely/not/here.toml").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_validate_config_file_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text("hello").unwrap(), "hello");
        assert!(validate_text("").is_err());
        assert!(validate_text(" \t").is_err());
    }
}
