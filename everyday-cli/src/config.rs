//! Configuration loading for the `everyday` binary.
//!
//! One flat TOML file holds the project settings together with the path and
//! logging keys. Relative paths are resolved against the file's directory.

use crate::telemetry::LogFormat;
use everyday_core::{ProjectSettings, TableConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "EVERYDAY_CONFIG";

/// File looked up in the current directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "everyday.toml";

const PATH_KEYS: [&str; 3] = ["README_PATH", "TEMPLATE_PATH", "LOG_FORMAT"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathSettings {
    #[serde(rename = "README_PATH")]
    readme_path: PathBuf,
    #[serde(rename = "TEMPLATE_PATH", default)]
    template_path: Option<PathBuf>,
    #[serde(rename = "LOG_FORMAT", default)]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub project: ProjectSettings,
    pub table: TableConfig,
    pub readme_path: PathBuf,
    pub template_path: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
    /// Directory the entry files and relative paths are anchored to
    pub root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Settings(#[from] everyday_core::ConfigError),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl CliConfig {
    /// Load from `explicit`, else `EVERYDAY_CONFIG`, else `./everyday.toml`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(config_path_from_env)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let root = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_toml(&contents, &root)
    }

    /// Parse file contents; `root` anchors relative paths.
    pub fn from_toml(contents: &str, root: &Path) -> Result<Self, ConfigError> {
        let mut project_table: toml::Table = toml::from_str(contents)?;
        let mut path_table = toml::Table::new();
        for key in PATH_KEYS {
            if let Some(value) = project_table.remove(key) {
                path_table.insert(key.to_string(), value);
            }
        }

        let project: ProjectSettings = toml::Value::Table(project_table).try_into()?;
        let paths: PathSettings = toml::Value::Table(path_table).try_into()?;
        let table = TableConfig::from_settings(&project)?;

        let config = Self {
            project,
            table,
            readme_path: root.join(paths.readme_path),
            template_path: paths.template_path.map(|p| root.join(p)),
            log_format: paths.log_format,
            root: root.to_path_buf(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.readme_path.file_name().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "README_PATH",
                reason: "must name a file".to_string(),
            });
        }
        if let Some(template) = &self.template_path {
            if template.file_name().is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "TEMPLATE_PATH",
                    reason: "must name a file".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Directory new entry files are written to.
    pub fn solutions_dir(&self) -> PathBuf {
        self.root.join(self.table.solutions_dir())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
