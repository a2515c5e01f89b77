use async_trait::async_trait;
use reqwest::header::{ACCEPT, REFERER};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::values::record_from_rows;
use super::Scraper;
use crate::config::defaults::{ACCEPT_JSON, API_MARKET_PARAM, DEFAULT_API_PATH};
use crate::config::schema::{Source, SourceKind};
use crate::error::{Result, ResultSyncError};
use crate::http;
use crate::record::ResultRecord;

/// Visits the page for a session cookie, then asks the AJAX endpoint for the rows
pub struct SessionApiScraper;

impl Default for SessionApiScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionApiScraper {
    pub fn new() -> Self {
        Self
    }

    /// Configured endpoint, else the default path on the page's origin
    fn endpoint_for(page_url: &str, endpoint: Option<&str>) -> Result<String> {
        if let Some(endpoint) = endpoint {
            return Ok(endpoint.to_string());
        }

        let page = Url::parse(page_url).map_err(|e| {
            ResultSyncError::Config(format!("Invalid source url '{}': {}", page_url, e))
        })?;
        let api = page.join(DEFAULT_API_PATH).map_err(|e| {
            ResultSyncError::Config(format!("Cannot derive API endpoint from '{}': {}", page_url, e))
        })?;
        Ok(api.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[async_trait]
impl Scraper for SessionApiScraper {
    fn name(&self) -> &str {
        SourceKind::SESSION_API
    }

    async fn scrape(&self, source: &Source) -> Result<ResultRecord> {
        let SourceKind::SessionApi {
            pasaran,
            endpoint,
            value_selector,
        } = &source.kind
        else {
            return Err(ResultSyncError::Config(format!(
                "source '{}' is not a session API source",
                source.name
            )));
        };

        let endpoint = Self::endpoint_for(&source.url, endpoint.as_deref())?;

        // The cookie store lives exactly as long as this client
        let client = http::browser_client(source.timeout, true)?;
        http::fetch_page(&client, &source.url).await?;

        tracing::debug!(source = %source.name, endpoint = %endpoint, pasaran = %pasaran, "querying result API");
        let response = client
            .post(&endpoint)
            .header(REFERER, source.url.as_str())
            .header(ACCEPT, ACCEPT_JSON)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[(API_MARKET_PARAM, pasaran.as_str())])
            .send()
            .await?;
        let response = http::ensure_success(&endpoint, response)?;
        let body = response.text().await?;

        parse_api_response(&body, value_selector)
    }
}

/// Extracts the record from the API's `{"data": [[date, weekday, html], ...]}` body
pub fn parse_api_response(body: &str, value_selector: &str) -> Result<ResultRecord> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ResultSyncError::structure(format!("API response is not valid JSON: {}", e)))?;

    let rows = response
        .data
        .ok_or_else(|| ResultSyncError::structure("API response has no 'data' field"))?;

    record_from_rows(&rows, value_selector)
}
