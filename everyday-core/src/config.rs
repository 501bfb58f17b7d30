//! Configuration types
//!
//! `ProjectSettings` is the external surface, read as-is from the project
//! configuration file. `TableConfig` is the validated, immutable form the
//! engine works with; it is built once per run and never mutated.

use crate::{ColumnLayout, ConfigError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierMode {
    /// Zero-padded counter (`001`, `002`, ...)
    Sequential,
    /// Calendar date of the entry
    Date,
}

/// Raw project settings as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    #[serde(rename = "PROJ_TITLE")]
    pub proj_title: String,
    #[serde(rename = "PROJ_START", default)]
    pub proj_start: Option<NaiveDate>,
    #[serde(rename = "NB")]
    pub nb: u8,
    #[serde(rename = "NB_NAME")]
    pub nb_name: String,
    #[serde(rename = "SEQ_NOTATION")]
    pub seq_notation: u8,
    #[serde(rename = "SEQ_SPARSE")]
    pub seq_sparse: u8,
    #[serde(rename = "SITE_OPTIONS")]
    pub site_options: Vec<String>,
    #[serde(rename = "SOLUTIONS_DIR", default = "default_solutions_dir")]
    pub solutions_dir: String,
}

fn default_solutions_dir() -> String {
    "solutions".to_string()
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            proj_title: "[ ] Everyday".to_string(),
            proj_start: None,
            nb: 0,
            nb_name: "NB".to_string(),
            seq_notation: 0,
            seq_sparse: 0,
            site_options: vec![
                "Codewars".to_string(),
                "DataLemur".to_string(),
                "LeetCode".to_string(),
            ],
            solutions_dir: default_solutions_dir(),
        }
    }
}

/// Validated table configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    title: String,
    project_start: Option<NaiveDate>,
    layout: ColumnLayout,
    identifier_mode: IdentifierMode,
    allow_gaps: bool,
    site_options: Vec<String>,
    solutions_dir: String,
}

impl TableConfig {
    /// Validate raw settings and build the immutable configuration.
    pub fn from_settings(settings: &ProjectSettings) -> Result<Self, ConfigError> {
        let extra_enabled = flag("NB", settings.nb)?;
        let date_mode = flag("SEQ_NOTATION", settings.seq_notation)?;
        let allow_gaps = flag("SEQ_SPARSE", settings.seq_sparse)?;

        let layout = if extra_enabled {
            let name = settings.nb_name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "NB_NAME".to_string(),
                    value: settings.nb_name.clone(),
                    reason: "must not be empty when NB = 1".to_string(),
                });
            }
            check_cell_text("NB_NAME", name)?;
            ColumnLayout::WithExtra {
                name: name.to_string(),
            }
        } else {
            ColumnLayout::Standard
        };

        if settings.site_options.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "SITE_OPTIONS".to_string(),
            });
        }
        let mut site_options: Vec<String> = Vec::with_capacity(settings.site_options.len());
        for site in &settings.site_options {
            let site = site.trim();
            if site.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "SITE_OPTIONS".to_string(),
                    value: format!("{:?}", settings.site_options),
                    reason: "site labels must not be empty".to_string(),
                });
            }
            check_cell_text("SITE_OPTIONS", site)?;
            if site_options.iter().any(|s| s == site) {
                return Err(ConfigError::InvalidValue {
                    field: "SITE_OPTIONS".to_string(),
                    value: site.to_string(),
                    reason: "duplicate site label".to_string(),
                });
            }
            site_options.push(site.to_string());
        }

        let solutions_dir = settings.solutions_dir.trim().trim_end_matches('/');
        if solutions_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "SOLUTIONS_DIR".to_string(),
                value: settings.solutions_dir.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            title: settings.proj_title.trim().to_string(),
            project_start: settings.proj_start,
            layout,
            identifier_mode: if date_mode {
                IdentifierMode::Date
            } else {
                IdentifierMode::Sequential
            },
            allow_gaps,
            site_options,
            solutions_dir: solutions_dir.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn project_start(&self) -> Option<NaiveDate> {
        self.project_start
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn extra_column_enabled(&self) -> bool {
        self.layout.has_extra()
    }

    pub fn extra_column_name(&self) -> Option<&str> {
        self.layout.extra_name()
    }

    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    pub fn identifier_mode(&self) -> IdentifierMode {
        self.identifier_mode
    }

    pub fn allow_gaps(&self) -> bool {
        self.allow_gaps
    }

    pub fn site_options(&self) -> &[String] {
        &self.site_options
    }

    /// The site selected when a submission names none.
    pub fn default_site(&self) -> Option<&str> {
        match self.site_options.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn solutions_dir(&self) -> &str {
        &self.solutions_dir
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: "[ ] Everyday".to_string(),
            project_start: None,
            layout: ColumnLayout::Standard,
            identifier_mode: IdentifierMode::Sequential,
            allow_gaps: false,
            site_options: ProjectSettings::default().site_options,
            solutions_dir: default_solutions_dir(),
        }
    }
}

fn flag(field: &str, value: u8) -> Result<bool, ConfigError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: other.to_string(),
            reason: "must be 0 or 1".to_string(),
        }),
    }
}

fn check_cell_text(field: &str, value: &str) -> Result<(), ConfigError> {
    if let Some(found) = value.chars().find(|c| matches!(c, '|' | '\n' | '\r')) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("must not contain {:?}", found),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_defaults() {
        let config = TableConfig::from_settings(&ProjectSettings::default()).unwrap();
        assert_eq!(config.column_count(), 5);
        assert_eq!(config.identifier_mode(), IdentifierMode::Sequential);
        assert!(!config.allow_gaps());
        assert!(!config.extra_column_enabled());
        assert_eq!(config.site_options().len(), 3);
        assert_eq!(config.default_site(), None);
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_from_settings_maps_flags() {
        let settings = ProjectSettings {
            nb: 1,
            nb_name: "Notebook".to_string(),
            seq_notation: 1,
            seq_sparse: 1,
            ..ProjectSettings::default()
        };
        let config = TableConfig::from_settings(&settings).unwrap();
        assert_eq!(config.column_count(), 6);
        assert_eq!(config.extra_column_name(), Some("Notebook"));
        assert_eq!(config.identifier_mode(), IdentifierMode::Date);
        assert!(config.allow_gaps());
    }

    #[test]
    fn test_from_settings_rejects_bad_flag() {
        let settings = ProjectSettings {
            seq_sparse: 2,
            ..ProjectSettings::default()
        };
        let err = TableConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "SEQ_SPARSE"));
    }

    #[test]
    fn test_from_settings_rejects_duplicate_site() {
        let settings = ProjectSettings {
            site_options: vec!["LeetCode".to_string(), " LeetCode ".to_string()],
            ..ProjectSettings::default()
        };
        assert!(TableConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn test_from_settings_rejects_empty_sites_and_pipes() {
        let empty = ProjectSettings {
            site_options: vec![],
            ..ProjectSettings::default()
        };
        assert!(matches!(
            TableConfig::from_settings(&empty),
            Err(ConfigError::MissingRequired { .. })
        ));

        let piped = ProjectSettings {
            site_options: vec!["Leet|Code".to_string()],
            ..ProjectSettings::default()
        };
        assert!(TableConfig::from_settings(&piped).is_err());
    }

    #[test]
    fn test_single_site_is_default() {
        let settings = ProjectSettings {
            site_options: vec!["DataLemur".to_string()],
            ..ProjectSettings::default()
        };
        let config = TableConfig::from_settings(&settings).unwrap();
        assert_eq!(config.default_site(), Some("DataLemur"));
    }

    #[test]
    fn test_settings_from_toml() {
        let text = r#"
PROJ_TITLE = "SQL Everyday"
PROJ_START = "2025-02-26"
NB = 0
NB_NAME = "NB"
SEQ_NOTATION = 0
SEQ_SPARSE = 1
SITE_OPTIONS = ["DataLemur", "LeetCode"]
"#;
        let settings: ProjectSettings = toml::from_str(text).unwrap();
        assert_eq!(settings.proj_title, "SQL Everyday");
        assert_eq!(settings.proj_start, NaiveDate::from_ymd_opt(2025, 2, 26));
        assert_eq!(settings.solutions_dir, "solutions");
        let config = TableConfig::from_settings(&settings).unwrap();
        assert!(config.allow_gaps());
    }
}
