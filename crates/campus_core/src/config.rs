//! Filesystem layout of the app-private data directory.
//!
//! # Invariants
//! - JSON documents, the session database and logs share one root.
//! - `CAMPUS_DATA_DIR` wins over the temp-dir fallback when non-empty.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CAMPUS_DATA_DIR";

const DEFAULT_DIR_NAME: &str = "campus";
const SESSION_DB_FILE_NAME: &str = "session.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved paths for one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory from `CAMPUS_DATA_DIR`, falling back to
    /// `<temp>/campus`.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(DATA_DIR_ENV).ok().as_deref())
    }

    fn resolve(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(dir) => Self::new(dir),
            None => Self::new(std::env::temp_dir().join(DEFAULT_DIR_NAME)),
        }
    }

    /// Directory holding the JSON documents.
    pub fn documents_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::AppPaths;

    #[test]
    fn resolve_prefers_non_empty_override() {
        let paths = AppPaths::resolve(Some("  /data/campus  "));
        assert_eq!(paths.documents_dir().to_str(), Some("/data/campus"));
        assert!(paths.session_db_path().ends_with("session.sqlite3"));
        assert!(paths.log_dir().ends_with("logs"));
    }

    #[test]
    fn resolve_falls_back_to_temp_dir() {
        let paths = AppPaths::resolve(Some("   "));
        assert_eq!(
            paths.documents_dir(),
            std::env::temp_dir().join("campus").as_path()
        );
    }
}
