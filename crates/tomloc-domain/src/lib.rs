use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// How a field filter compares its value against a record field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SearchType {
    #[default]
    Contains,
    BeginsWith,
    EndsWith,
    Equals,
}

/// Filter for a single queryable field. An empty or whitespace-only value
/// matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FieldFilter {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub search_type: SearchType,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl FieldFilter {
    pub fn contains(value: impl Into<String>) -> Self {
        FieldFilter {
            value: Some(value.into()),
            ..FieldFilter::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.as_deref().map_or(true, |v| v.trim().is_empty())
    }
}

/// One filter per queryable field plus global overrides. A filter whose every
/// field value is blank is "empty" and short-circuits search to no results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TranslationFilter {
    pub key: FieldFilter,
    pub fr: FieldFilter,
    pub en: FieldFilter,
    pub pt: FieldFilter,
    pub group: FieldFilter,
    pub global_case_sensitive: bool,
    pub global_search_type: SearchType,
}

/// One merged translation record, as emitted on the JSON surface.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranslationRow {
    pub schema_version: u32,
    pub key: String,
    pub group: String,
    pub fr: String,
    pub en: String,
    pub pt: String,
    pub path: Option<String>,
}

/// Outcome of one per-locale file mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LocaleWriteStat {
    pub locale: String,
    pub path: String,
    /// "created" | "updated" | "removed" | "skipped" | "duplicate" | "failed"
    pub status: String,
    pub error: Option<String>,
}

/// Structured result of a create/update/delete operation. Partial failure is
/// inspectable per locale instead of collapsing into one boolean.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WriteSummary {
    pub mode: String,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<LocaleWriteStat>,
}

impl WriteSummary {
    pub fn new(mode: impl Into<String>) -> Self {
        WriteSummary {
            mode: mode.into(),
            written: 0,
            skipped: 0,
            failed: 0,
            files: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
