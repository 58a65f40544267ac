//! Platform-aware data storage directory management
//!
//! ## Platform Paths
//!
//! | Type | Windows | macOS | Linux |
//! |------|---------|-------|-------|
//! | Data | `%APPDATA%\Roster\` | `~/Library/Application Support/Roster/` | `$XDG_DATA_HOME/roster/` |
//!
//! `ROSTER_DATA_DIR` overrides the platform default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::config::AppConfig;
use super::constants::{APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR};

/// Data subdirectories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubdir {
    Sqlite,
}

impl DataSubdir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSubdir::Sqlite => "sqlite",
        }
    }

    /// Returns subdirectories created on startup
    pub const fn all() -> &'static [DataSubdir] {
        &[DataSubdir::Sqlite]
    }
}

/// Application storage manager
#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Initialize storage with platform-appropriate data directory
    ///
    /// In-memory runs never touch the disk, so no directories are created.
    pub async fn init(config: &AppConfig) -> Result<Self> {
        let data_dir = Self::resolve_data_dir();

        if config.database.in_memory {
            tracing::debug!("In-memory database, skipping data directory setup");
            return Ok(Self { data_dir });
        }

        // Create directories first (canonicalize requires path to exist)
        Self::ensure_directories(&data_dir).await?;
        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        tracing::debug!(data_dir = %data_dir.display(), "Storage initialized");
        Ok(Self { data_dir })
    }

    /// Storage rooted at an explicit directory, without creating anything
    pub fn at(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve data directory from env var or platform default
    pub fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return expand_path(&dir);
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        // Fallback to local .roster
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    async fn ensure_directories(data_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        for subdir in DataSubdir::all() {
            let path = data_dir.join(subdir.as_str());
            tokio::fs::create_dir_all(&path).await.with_context(|| {
                format!(
                    "Failed to create {} directory: {}",
                    subdir.as_str(),
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to a subdirectory (canonicalized)
    pub fn subdir(&self, subdir: DataSubdir) -> PathBuf {
        let path = self.data_dir.join(subdir.as_str());
        path.canonicalize().unwrap_or(path)
    }
}

/// Expand a path string to an absolute path
///
/// Handles `~` and `~/path` via the home directory; relative paths and bare
/// names resolve against the current directory. Absolute paths pass through.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DatabaseConfig;
    use tempfile::TempDir;

    fn config(in_memory: bool) -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                in_memory,
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_data_subdir() {
        assert_eq!(DataSubdir::Sqlite.as_str(), "sqlite");
        assert_eq!(DataSubdir::all(), &[DataSubdir::Sqlite]);
    }

    #[test]
    fn test_subdir_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let storage = AppStorage::at(dir.path().to_path_buf());
        assert_eq!(storage.data_dir(), dir.path());
        assert!(storage.subdir(DataSubdir::Sqlite).ends_with("sqlite"));
    }

    #[tokio::test]
    async fn test_init_creates_subdirs() {
        let dir = TempDir::new().unwrap();
        AppStorage::ensure_directories(dir.path()).await.unwrap();
        assert!(dir.path().join("sqlite").is_dir());
    }

    #[tokio::test]
    async fn test_init_in_memory_skips_directories() {
        let storage = AppStorage::init(&config(true)).await.unwrap();
        assert!(!storage.data_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/etc/roster"), PathBuf::from("/etc/roster"));
    }

    #[test]
    fn test_expand_path_relative_is_absolute() {
        let path = expand_path("data/roster.db");
        assert!(path.is_absolute());
        assert!(path.ends_with("data/roster.db"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.roster"), home.join(".roster"));
        }
    }
}
