//! Entry submissions and their validation

use crate::{TableConfig, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One submission as collected by the entry form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub timestamp: NaiveDate,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub submitted_solution: Option<String>,
    #[serde(default)]
    pub site_solution: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub notebook_ref: Option<String>,
    /// Forced identifier; normally the engine assigns one.
    #[serde(default)]
    pub identifier: Option<String>,
}

impl RawEntry {
    /// Entry with only a timestamp; every other field absent.
    pub fn new(timestamp: NaiveDate) -> Self {
        Self {
            timestamp,
            url: None,
            title: None,
            site: None,
            difficulty: None,
            problem: None,
            submitted_solution: None,
            site_solution: None,
            notes: None,
            notebook_ref: None,
            identifier: None,
        }
    }
}

/// Validated data for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    timestamp: NaiveDate,
    title: String,
    url: Option<String>,
    site: String,
    difficulty: Option<String>,
    problem: Option<String>,
    submitted_solution: Option<String>,
    site_solution: Option<String>,
    notes: Option<String>,
    notebook_ref: Option<String>,
    forced_identifier: Option<String>,
}

impl EntryRecord {
    /// Validate a raw submission against the table configuration.
    pub fn validate(raw: &RawEntry, config: &TableConfig) -> Result<Self, ValidationError> {
        let title = cell_field("title", &raw.title)?.ok_or_else(|| missing("title"))?;
        let url = cell_field("url", &raw.url)?;
        let difficulty = cell_field("difficulty", &raw.difficulty)?;
        let notebook_ref = cell_field("notebook_ref", &raw.notebook_ref)?;
        let forced_identifier = cell_field("identifier", &raw.identifier)?;

        let site = match cell_field("site", &raw.site)? {
            Some(site) => site,
            None => config
                .default_site()
                .map(str::to_string)
                .ok_or_else(|| missing("site"))?,
        };
        if !config.site_options().iter().any(|s| *s == site) {
            return Err(ValidationError::InvalidSite {
                site,
                allowed: config.site_options().to_vec(),
            });
        }

        let enabled = config.extra_column_enabled();
        if enabled != notebook_ref.is_some() {
            return Err(ValidationError::ExtraColumnMismatch {
                enabled,
                supplied: notebook_ref.is_some(),
            });
        }

        Ok(Self {
            timestamp: raw.timestamp,
            title,
            url,
            site,
            difficulty,
            problem: text_field(&raw.problem),
            submitted_solution: text_field(&raw.submitted_solution),
            site_solution: text_field(&raw.site_solution),
            notes: text_field(&raw.notes),
            notebook_ref,
            forced_identifier,
        })
    }

    pub fn timestamp(&self) -> NaiveDate {
        self.timestamp
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    pub fn submitted_solution(&self) -> Option<&str> {
        self.submitted_solution.as_deref()
    }

    pub fn site_solution(&self) -> Option<&str> {
        self.site_solution.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn notebook_ref(&self) -> Option<&str> {
        self.notebook_ref.as_deref()
    }

    pub fn forced_identifier(&self) -> Option<&str> {
        self.forced_identifier.as_deref()
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::MissingField {
        field: field.to_string(),
    }
}

/// Trimmed free text; empty counts as absent.
fn text_field(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Like `text_field`, but the value ends up inside a table cell.
fn cell_field(field: &str, value: &Option<String>) -> Result<Option<String>, ValidationError> {
    let value = text_field(value);
    if let Some(text) = &value {
        if let Some(found) = text.chars().find(|c| matches!(c, '|' | '\n' | '\r')) {
            return Err(ValidationError::InvalidCharacter {
                field: field.to_string(),
                found,
            });
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectSettings;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn raw(title: &str, site: &str) -> RawEntry {
        RawEntry {
            title: Some(title.to_string()),
            site: Some(site.to_string()),
            ..RawEntry::new(date())
        }
    }

    fn config_with(settings: ProjectSettings) -> TableConfig {
        TableConfig::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_validate_trims_fields() {
        let mut input = raw("\nTwo Sum\n", "LeetCode");
        input.difficulty = Some("  ".to_string());
        input.notes = Some(" remember hash maps ".to_string());
        let record = EntryRecord::validate(&input, &TableConfig::default()).unwrap();
        assert_eq!(record.title(), "Two Sum");
        assert_eq!(record.difficulty(), None);
        assert_eq!(record.notes(), Some("remember hash maps"));
    }

    #[test]
    fn test_validate_invalid_site() {
        let err = EntryRecord::validate(&raw("Two Sum", "Reddit"), &TableConfig::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSite { ref site, .. } if site == "Reddit"));
    }

    #[test]
    fn test_validate_missing_title() {
        let mut input = raw("", "LeetCode");
        input.title = None;
        let err = EntryRecord::validate(&input, &TableConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "title".to_string()
            }
        );
    }

    #[test]
    fn test_validate_missing_site_with_several_options() {
        let mut input = raw("Two Sum", "");
        input.site = None;
        let err = EntryRecord::validate(&input, &TableConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { ref field } if field == "site"));
    }

    #[test]
    fn test_validate_single_site_is_selected_by_default() {
        let config = config_with(ProjectSettings {
            site_options: vec!["DataLemur".to_string()],
            ..ProjectSettings::default()
        });
        let mut input = raw("Cards Issued Difference", "");
        input.site = None;
        let record = EntryRecord::validate(&input, &config).unwrap();
        assert_eq!(record.site(), "DataLemur");
    }

    #[test]
    fn test_validate_notebook_ref_while_disabled() {
        let mut input = raw("Two Sum", "LeetCode");
        input.notebook_ref = Some("nb/001.ipynb".to_string());
        let err = EntryRecord::validate(&input, &TableConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ExtraColumnMismatch {
                enabled: false,
                supplied: true
            }
        );
    }

    #[test]
    fn test_validate_notebook_ref_required_while_enabled() {
        let config = config_with(ProjectSettings {
            nb: 1,
            nb_name: "Notebook".to_string(),
            ..ProjectSettings::default()
        });
        let err = EntryRecord::validate(&raw("Two Sum", "LeetCode"), &config).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ExtraColumnMismatch {
                enabled: true,
                supplied: false
            }
        );

        let mut input = raw("Two Sum", "LeetCode");
        input.notebook_ref = Some("[nb](nb/001.ipynb)".to_string());
        let record = EntryRecord::validate(&input, &config).unwrap();
        assert_eq!(record.notebook_ref(), Some("[nb](nb/001.ipynb)"));
    }

    #[test]
    fn test_validate_rejects_pipe_in_cell_field() {
        let err = EntryRecord::validate(&raw("A | B", "LeetCode"), &TableConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCharacter {
                field: "title".to_string(),
                found: '|'
            }
        );
    }

    #[test]
    fn test_validate_allows_pipe_in_free_text() {
        let mut input = raw("Two Sum", "LeetCode");
        input.submitted_solution = Some("SELECT a | b FROM t".to_string());
        assert!(EntryRecord::validate(&input, &TableConfig::default()).is_ok());
    }
}
