use async_trait::async_trait;

use crate::config::schema::Source;
use crate::error::Result;
use crate::record::ResultRecord;

pub mod embedded_script;
pub mod registry;
pub mod session_api;
pub mod static_table;
pub mod values;

/// Trait for result scrapers
///
/// A scraper fetches one source's page (or API) and reduces it to the single
/// latest [`ResultRecord`]. Any failure, including "page fetched but no row
/// found", is an `Err` so the driver can skip the source.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the scraper kind this implementation handles (e.g., "static_table")
    fn name(&self) -> &str;

    /// Extracts the latest record for `source`
    async fn scrape(&self, source: &Source) -> Result<ResultRecord>;
}
