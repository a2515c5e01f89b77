use std::collections::HashMap;
use std::sync::Arc;

use super::Scraper;
use super::embedded_script::EmbeddedScriptScraper;
use super::session_api::SessionApiScraper;
use super::static_table::StaticTableScraper;

/// Registry for result scrapers
///
/// Maps a source's scraper kind to the implementation that handles it.
pub struct ScraperRegistry {
    scrapers: HashMap<String, Arc<dyn Scraper>>,
}

impl ScraperRegistry {
    /// Creates a new empty scraper registry
    pub fn new() -> Self {
        Self {
            scrapers: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in scrapers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(StaticTableScraper::new()));
        registry.register(Arc::new(SessionApiScraper::new()));
        registry.register(Arc::new(EmbeddedScriptScraper::new()));

        registry
    }

    /// Registers a scraper, replacing any previous one of the same kind
    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        self.scrapers.insert(scraper.name().to_string(), scraper);
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn Scraper>> {
        self.scrapers.get(kind).cloned()
    }

    /// Returns the registered kind names, sorted
    pub fn list_scrapers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scrapers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
