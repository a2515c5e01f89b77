use anyhow::{Context, Result};
use std::path::Path;

use super::schema::{Source, SourceConfig};
use super::validator::ConfigValidator;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads, parses and validates the source list
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Source>> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::load_from_string(&content)
    }

    pub fn load_from_string(content: &str) -> Result<Vec<Source>> {
        let raw = Self::parse(content)?;
        ConfigValidator::validate(&raw)
    }

    /// Parses the YAML sequence without validating it
    pub fn parse(content: &str) -> Result<Vec<SourceConfig>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sources: Option<Vec<SourceConfig>> =
            serde_yaml::from_str(content).context("Failed to parse YAML config")?;

        Ok(sources.unwrap_or_default())
    }
}
