use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{LogError, Result};

/// Data directory used when `--dir` is not given.
pub const DEFAULT_DATA_DIR: &str = ".adminlog";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global data directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.adminlog`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let _ = DATA_DIR.set(dir);
}

/// Get the current data directory path.
pub fn data_dir() -> &'static Path {
    DATA_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_DATA_DIR))
}

/// Reject anything that is not a bare file name, so config values
/// cannot escape the data directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.contains(['/', '\\'])
        || name == "."
        || name.contains("..")
    {
        return Err(LogError::InvalidConfig {
            detail: format!("{what} must be a plain file name, got '{name}'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(validate_simple_filename("activity.log", "log file").is_ok());
        assert!(validate_simple_filename("users-2024.toml", "users file").is_ok());
    }

    #[test]
    fn rejects_paths_and_traversal() {
        for bad in ["", " ", "../x.log", "logs/activity.log", "..\\x", ".", "a..b", " x.log"] {
            assert!(
                validate_simple_filename(bad, "log file").is_err(),
                "'{bad}' should be rejected"
            );
        }
    }
}
