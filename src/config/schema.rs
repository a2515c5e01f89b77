use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// One source descriptor exactly as written in the YAML file.
///
/// Kind-specific keys (`api_pasaran`, `search_keyword`, `table_class`, ...)
/// are collected into `params` and checked by the validator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub scraper_type: Option<String>,
    #[serde(default)]
    pub target_file: String,
    #[serde(default)]
    pub timeout: Option<String>,

    #[serde(flatten)]
    pub params: BTreeMap<String, serde_yaml::Value>,
}

impl SourceConfig {
    /// Returns a string parameter, treating blank values as absent
    pub fn param(&self, key: &str) -> Option<String> {
        self.params
            .get(key)
            .and_then(|v| match v {
                serde_yaml::Value::String(s) => Some(s.trim().to_string()),
                serde_yaml::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }
}

/// A validated source, ready to be dispatched to a scraper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub target_file: String,
    pub timeout: Duration,
    pub kind: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    StaticTable {
        table: TableSelector,
        value_selector: String,
    },
    SessionApi {
        pasaran: String,
        endpoint: Option<String>,
        value_selector: String,
    },
    EmbeddedScript {
        keyword: String,
        value_selector: String,
    },
    /// Kept so the driver can report and skip it
    Unknown(String),
}

impl SourceKind {
    pub const STATIC_TABLE: &'static str = "static_table";
    pub const SESSION_API: &'static str = "scanangka_api";
    pub const EMBEDDED_SCRIPT: &'static str = "embedded_script";
    pub const DEFAULT_ALIAS: &'static str = "default";

    /// Registry key of this kind
    pub fn name(&self) -> &str {
        match self {
            SourceKind::StaticTable { .. } => Self::STATIC_TABLE,
            SourceKind::SessionApi { .. } => Self::SESSION_API,
            SourceKind::EmbeddedScript { .. } => Self::EMBEDDED_SCRIPT,
            SourceKind::Unknown(name) => name,
        }
    }

    pub fn value_selector(&self) -> Option<&str> {
        match self {
            SourceKind::StaticTable { value_selector, .. }
            | SourceKind::SessionApi { value_selector, .. }
            | SourceKind::EmbeddedScript { value_selector, .. } => Some(value_selector),
            SourceKind::Unknown(_) => None,
        }
    }
}

/// How the result table is located on a static page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    Class(String),
    Id(String),
}

impl TableSelector {
    /// True when a `<table>` with the given attributes is the one configured
    pub fn matches<'a>(
        &self,
        id: Option<&str>,
        mut classes: impl Iterator<Item = &'a str>,
    ) -> bool {
        match self {
            TableSelector::Class(class) => classes.any(|c| c == class.as_str()),
            TableSelector::Id(wanted) => id == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for TableSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSelector::Class(class) => write!(f, "table class=\"{}\"", class),
            TableSelector::Id(id) => write!(f, "table id=\"{}\"", id),
        }
    }
}
