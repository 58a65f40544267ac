use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, SQLITE_MAX_CONNECTIONS};
use super::storage::expand_path;

// =============================================================================
// File Config Types
// =============================================================================

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// SQLite database file (defaults to the data directory)
    pub path: Option<String>,
    /// Use a throwaway in-memory database
    pub in_memory: Option<bool>,
    /// Connection pool size
    pub max_connections: Option<u32>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of top-level keys this version does not understand
    fn unknown_fields(&self) -> Vec<String> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(database) = other.database {
            let current = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default);
            if database.path.is_some() {
                tracing::trace!(path = ?database.path, "Merging database.path");
                current.path = database.path;
            }
            if database.in_memory.is_some() {
                tracing::trace!(in_memory = ?database.in_memory, "Merging database.in_memory");
                current.in_memory = database.in_memory;
            }
            if database.max_connections.is_some() {
                tracing::trace!(
                    max_connections = ?database.max_connections,
                    "Merging database.max_connections"
                );
                current.max_connections = database.max_connections;
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Types
// =============================================================================

/// Database configuration (final/runtime)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Explicit database file; `None` uses `sqlite/roster.db` in the data directory
    pub path: Option<PathBuf>,
    pub in_memory: bool,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            in_memory: false,
            max_connections: SQLITE_MAX_CONNECTIONS,
        }
    }
}

/// Final merged application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub debug: bool,
    /// Config file keys not understood by this version
    pub unknown_fields: Vec<String>,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.roster/roster.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        Self::load_with(cli, get_profile_config_path().as_deref(), &local)
    }

    /// Same as `load` with explicit profile and local config locations
    fn load_with(cli: &CliConfig, profile_path: Option<&Path>, local_path: &Path) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();
        let mut unknown_fields: Vec<String> = Vec::new();

        // 1. Profile dir - skip if not exists
        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(profile_path)?;
            unknown_fields.extend(profile_config.unknown_fields());
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else if local_path.exists() {
            Some(local_path.to_path_buf())
        } else {
            None
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            unknown_fields.extend(overlay_config.unknown_fields());
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Layer configs: defaults -> file config -> CLI/env overrides
        let file_database = file_config.database.unwrap_or_default();
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            path: cli
                .db_path
                .as_ref()
                .map(|p| expand_path(&p.to_string_lossy()))
                .or_else(|| file_database.path.as_deref().map(expand_path)),
            in_memory: cli
                .in_memory
                .or(file_database.in_memory)
                .unwrap_or(defaults.in_memory),
            max_connections: cli
                .max_connections
                .or(file_database.max_connections)
                .unwrap_or(defaults.max_connections),
        };

        let config = Self {
            database,
            debug: cli.debug || file_config.debug.unwrap_or(false),
            unknown_fields,
        };
        config.validate()?;

        tracing::debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Warn about unknown fields in the loaded config files
    ///
    /// Called once logging is up, since logging itself depends on `debug`.
    pub fn warn_unknown_fields(&self) {
        if !self.unknown_fields.is_empty() {
            tracing::warn!(
                fields = %self.unknown_fields.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }
        if self.database.in_memory && self.database.path.is_some() {
            tracing::warn!("database.in_memory is set; database.path is ignored");
        }
        Ok(())
    }
}

/// Get the profile config path (~/.roster/roster.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
