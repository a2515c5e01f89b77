use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::{Result, ResultSyncError};
use crate::record::ResultRecord;

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ResultSyncError::Config(format!("Invalid CSS selector '{}': {:?}", css, e)))
}

/// Trimmed text content of an element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collects the text of every value sub-element under `container`, in document order
pub fn values_in(container: &ElementRef<'_>, value_selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(value_selector)?;
    let values: Vec<String> = container
        .select(&selector)
        .map(|el| element_text(&el))
        .collect();

    if values.is_empty() {
        return Err(ResultSyncError::structure(format!(
            "no '{}' value elements in result cell",
            value_selector
        )));
    }
    Ok(values)
}

/// Same as [`values_in`] for a markup fragment taken from JSON
pub fn values_in_fragment(fragment: &str, value_selector: &str) -> Result<Vec<String>> {
    let html = Html::parse_fragment(fragment);
    values_in(&html.root_element(), value_selector)
}

/// Builds a record from the first `[date, weekday, resultHtml]` row
pub fn record_from_rows(rows: &[Value], value_selector: &str) -> Result<ResultRecord> {
    let row = rows
        .first()
        .ok_or_else(|| ResultSyncError::structure("data array is empty"))?;

    let cells = row
        .as_array()
        .ok_or_else(|| ResultSyncError::structure("first data row is not an array"))?;

    if cells.len() < 3 {
        return Err(ResultSyncError::structure(format!(
            "first data row has {} fields, expected 3",
            cells.len()
        )));
    }

    let date = cell_text(&cells[0]);
    let weekday = cell_text(&cells[1]);
    let values = values_in_fragment(&cell_text(&cells[2]), value_selector)?;

    Ok(ResultRecord::new(date, weekday, values))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
