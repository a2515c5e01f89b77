use anyhow::{anyhow, Context, Result};
use scraper::Selector;
use std::collections::HashSet;

use super::defaults::{DEFAULT_TABLE_CLASS, DEFAULT_TIMEOUT, DEFAULT_VALUE_SELECTOR};
use super::schema::{Source, SourceConfig, SourceKind, TableSelector};

pub struct ConfigValidator;

impl ConfigValidator {
    /// Turns raw descriptors into typed sources, failing on the first invalid one
    pub fn validate(sources: &[SourceConfig]) -> Result<Vec<Source>> {
        let mut names = HashSet::new();
        let mut validated = Vec::with_capacity(sources.len());

        for (idx, raw) in sources.iter().enumerate() {
            let source = Self::validate_source(raw).with_context(|| {
                format!("Invalid source at index {} ({})", idx, raw.display_name())
            })?;

            if !names.insert(source.name.clone()) {
                return Err(anyhow!("Duplicate source name: '{}'", source.name));
            }

            validated.push(source);
        }

        Ok(validated)
    }

    fn validate_source(raw: &SourceConfig) -> Result<Source> {
        let name = raw.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Source name cannot be empty"));
        }
        if raw.url.trim().is_empty() {
            return Err(anyhow!("Source must have a 'url' field"));
        }
        if raw.target_file.trim().is_empty() {
            return Err(anyhow!("Source must have a 'target_file' field"));
        }

        let timeout = match &raw.timeout {
            Some(timeout) => humantime::parse_duration(timeout)
                .with_context(|| format!("Invalid timeout format: {}", timeout))?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Source {
            name: name.to_string(),
            url: raw.url.trim().to_string(),
            target_file: raw.target_file.trim().to_string(),
            timeout,
            kind: Self::validate_kind(raw)?,
        })
    }

    fn validate_kind(raw: &SourceConfig) -> Result<SourceKind> {
        let kind_name = raw.scraper_type.as_deref().unwrap_or_default().trim();

        let kind = match kind_name {
            SourceKind::STATIC_TABLE | SourceKind::DEFAULT_ALIAS => {
                let table = match (raw.param("table_class"), raw.param("table_id")) {
                    (Some(_), Some(_)) => {
                        return Err(anyhow!(
                            "Static table source cannot set both 'table_class' and 'table_id'"
                        ));
                    }
                    (Some(class), None) => TableSelector::Class(class),
                    (None, Some(id)) => TableSelector::Id(id),
                    (None, None) => TableSelector::Class(DEFAULT_TABLE_CLASS.to_string()),
                };
                let (TableSelector::Class(ident) | TableSelector::Id(ident)) = &table;
                if ident.chars().any(char::is_whitespace) {
                    return Err(anyhow!(
                        "Table class or id cannot contain whitespace: '{}'",
                        ident
                    ));
                }

                SourceKind::StaticTable {
                    table,
                    value_selector: Self::value_selector(raw)?,
                }
            }
            SourceKind::SESSION_API => {
                let pasaran = raw
                    .param("api_pasaran")
                    .ok_or_else(|| anyhow!("Session API source must have 'api_pasaran' field"))?;

                SourceKind::SessionApi {
                    pasaran,
                    endpoint: raw.param("api_endpoint"),
                    value_selector: Self::value_selector(raw)?,
                }
            }
            SourceKind::EMBEDDED_SCRIPT => {
                let keyword = raw.param("search_keyword").ok_or_else(|| {
                    anyhow!("Embedded script source must have 'search_keyword' field")
                })?;

                SourceKind::EmbeddedScript {
                    keyword,
                    value_selector: Self::value_selector(raw)?,
                }
            }
            // Unknown kinds are skipped by the driver at run time
            other => SourceKind::Unknown(other.to_string()),
        };

        Ok(kind)
    }

    fn value_selector(raw: &SourceConfig) -> Result<String> {
        let selector = raw
            .param("value_selector")
            .unwrap_or_else(|| DEFAULT_VALUE_SELECTOR.to_string());
        Self::validate_selector(&selector).context("Invalid 'value_selector'")?;
        Ok(selector)
    }

    fn validate_selector(css: &str) -> Result<()> {
        Selector::parse(css)
            .map(|_| ())
            .map_err(|e| anyhow!("Invalid CSS selector '{}': {:?}", css, e))
    }
}
