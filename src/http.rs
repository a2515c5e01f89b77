use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use std::time::Duration;

use crate::config::defaults;
use crate::error::{Result, ResultSyncError};

/// Builds a client that looks like a desktop browser to the result sites.
///
/// Every request made through it is bounded by `timeout`. With `cookies`
/// set, cookies returned by one response are replayed on later requests of
/// the same client.
pub fn browser_client(timeout: Duration, cookies: bool) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(defaults::ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(defaults::ACCEPT_LANGUAGE),
    );
    headers.insert(REFERER, HeaderValue::from_static(defaults::SEARCH_REFERER));

    let client = reqwest::Client::builder()
        .user_agent(defaults::USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .cookie_store(cookies)
        .build()?;

    Ok(client)
}

/// GETs a page and returns its body, failing on any non-2xx status
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching page");

    let response = client.get(url).send().await?;
    let response = ensure_success(url, response)?;

    Ok(response.text().await?)
}

pub(crate) fn ensure_success(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(ResultSyncError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }
    Ok(response)
}
