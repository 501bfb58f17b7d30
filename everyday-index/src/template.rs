//! Per-entry file template
//!
//! Templates use `{{ name }}` placeholders. Unknown names render as empty
//! text so a customized template never blocks an entry.

use everyday_core::ColumnLayout;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

const BUILTIN: &str = include_str!("../templates/entry.md");
const BUILTIN_EXTRA: &str = include_str!("../templates/entry_extra.md");

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("Invalid placeholder regex")
});

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTemplate {
    source: String,
}

impl EntryTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The built-in template; the extra column section is included only
    /// when the layout has one.
    pub fn builtin(layout: &ColumnLayout) -> Self {
        let mut source = BUILTIN.to_string();
        if layout.has_extra() {
            source.push_str(BUILTIN_EXTRA);
        }
        Self { source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, context: &TemplateContext) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures<'_>| {
                let name = &caps[1];
                match context.get(name) {
                    Some(value) => value.to_string(),
                    None => {
                        tracing::warn!(placeholder = name, "Unknown template placeholder");
                        String::new()
                    }
                }
            })
            .into_owned()
    }
}
