use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

use super::values::record_from_rows;
use super::Scraper;
use crate::config::schema::{Source, SourceKind};
use crate::error::{Result, ResultSyncError};
use crate::http;
use crate::record::ResultRecord;

/// Pulls the result rows out of a JavaScript array literal in an inline script
pub struct EmbeddedScriptScraper;

impl Default for EmbeddedScriptScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddedScriptScraper {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Scraper for EmbeddedScriptScraper {
    fn name(&self) -> &str {
        SourceKind::EMBEDDED_SCRIPT
    }

    async fn scrape(&self, source: &Source) -> Result<ResultRecord> {
        let SourceKind::EmbeddedScript {
            keyword,
            value_selector,
        } = &source.kind
        else {
            return Err(ResultSyncError::Config(format!(
                "source '{}' is not an embedded script source",
                source.name
            )));
        };

        let client = http::browser_client(source.timeout, false)?;
        let body = http::fetch_page(&client, &source.url).await?;

        parse_embedded_page(&body, keyword, value_selector)
    }
}

fn array_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[\[.*?\]\]").expect("static regex"))
}

/// Text of the first inline script containing `keyword`
pub fn find_script(body: &str, keyword: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("script").ok()?;

    document
        .select(&selector)
        .map(|script| script.text().collect::<String>())
        .find(|text| text.contains(keyword))
}

/// Decodes the first `[[ ... ]]` literal in `script` into rows.
///
/// Single quotes are rewritten to double quotes before JSON decoding, so an
/// apostrophe inside a quoted string breaks the decode.
pub fn decode_array_literal(script: &str) -> Result<Vec<Value>> {
    let literal = array_literal_regex()
        .find(script)
        .ok_or_else(|| ResultSyncError::structure("no [[ ... ]] array literal in script"))?;

    let normalized = literal.as_str().replace('\'', "\"");
    serde_json::from_str(&normalized).map_err(|e| {
        ResultSyncError::structure(format!("embedded array literal is not valid JSON: {}", e))
    })
}

pub fn parse_embedded_page(body: &str, keyword: &str, value_selector: &str) -> Result<ResultRecord> {
    let script = find_script(body, keyword).ok_or_else(|| {
        ResultSyncError::structure(format!("no inline script contains '{}'", keyword))
    })?;

    let rows = decode_array_literal(&script)?;
    record_from_rows(&rows, value_selector)
}
