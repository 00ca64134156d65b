//! Where edgespeak keeps its state on disk.
//!
//! Resolution order:
//! 1. `EDGESPEAK_DATA_DIR` environment variable (highest priority)
//! 2. System data directory (e.g., `~/.local/share/edgespeak`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "EDGESPEAK_DATA_DIR";

const APP_DIR_NAME: &str = "edgespeak";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,
}

/// Get the directory persisted client state lives in.
pub fn data_root() -> Result<PathBuf, PathError> {
    resolve_data_root(env::var(DATA_DIR_ENV).ok().as_deref())
}

/// Resolve the data directory from an explicit override, falling back to
/// the system data directory.
pub fn resolve_data_root(override_dir: Option<&str>) -> Result<PathBuf, PathError> {
    match override_dir.map(str::trim) {
        Some("") => Err(PathError::EmptyPath),
        Some(dir) => Ok(expand_home(dir)),
        None => dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or(PathError::NoDataDir),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let path = resolve_data_root(Some("/tmp/edgespeak-test")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/edgespeak-test"));
    }

    #[test]
    fn test_empty_override_rejected() {
        assert!(matches!(resolve_data_root(Some("  ")), Err(PathError::EmptyPath)));
    }

    #[test]
    fn test_default_ends_with_app_dir() {
        if let Ok(path) = resolve_data_root(None) {
            assert!(path.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve_data_root(Some("~/state")).unwrap(), home.join("state"));
        }
    }
}
