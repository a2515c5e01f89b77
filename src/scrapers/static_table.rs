use async_trait::async_trait;
use scraper::{ElementRef, Html};

use super::values::{element_text, parse_selector, values_in};
use super::Scraper;
use crate::config::schema::{Source, SourceKind, TableSelector};
use crate::error::{Result, ResultSyncError};
use crate::http;
use crate::record::ResultRecord;

/// Reads the first body row of a result table on a plain HTML page
pub struct StaticTableScraper;

impl Default for StaticTableScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTableScraper {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Scraper for StaticTableScraper {
    fn name(&self) -> &str {
        SourceKind::STATIC_TABLE
    }

    async fn scrape(&self, source: &Source) -> Result<ResultRecord> {
        let SourceKind::StaticTable {
            table,
            value_selector,
        } = &source.kind
        else {
            return Err(ResultSyncError::Config(format!(
                "source '{}' is not a static table source",
                source.name
            )));
        };

        let client = http::browser_client(source.timeout, false)?;
        let body = http::fetch_page(&client, &source.url).await?;

        parse_table(&body, table, value_selector)
    }
}

/// Extracts the record from the first row of the table's body
pub fn parse_table(body: &str, table: &TableSelector, value_selector: &str) -> Result<ResultRecord> {
    let document = Html::parse_document(body);
    let tables = parse_selector("table")?;

    let table_el = document
        .select(&tables)
        .find(|el| table.matches(el.value().id(), el.value().classes()))
        .ok_or_else(|| ResultSyncError::structure(format!("{} not found", table)))?;

    // html5ever inserts an implied <tbody> for bare <table><tr> markup

    let tbody = child_elements(table_el, "tbody")
        .next()
        .ok_or_else(|| ResultSyncError::structure("table has no <tbody>"))?;

    let first_row = child_elements(tbody, "tr")
        .next()
        .ok_or_else(|| ResultSyncError::structure("table body has no <tr> rows"))?;

    let cells: Vec<ElementRef<'_>> = child_elements(first_row, "td").collect();
    if cells.len() < 3 {
        return Err(ResultSyncError::structure(format!(
            "first row has {} cells, expected at least 3",
            cells.len()
        )));
    }

    let date = element_text(&cells[0]);
    let weekday = element_text(&cells[1]);
    let values = values_in(&cells[2], value_selector)?;

    Ok(ResultRecord::new(date, weekday, values))
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: &str = "span.bolaresultmodif";

    fn liveresult() -> TableSelector {
        TableSelector::Class("liveresult".into())
    }

    const PAGE: &str = r#"
<html><body>
<table class="liveresult">
  <thead><tr><th>Tanggal</th><th>Hari</th><th>Result</th></tr></thead>
  <tbody>
    <tr>
      <td>  2024-10-15 </td>
      <td> Selasa </td>
      <td><span class="bolaresultmodif">1</span><span class="bolaresultmodif">9</span><span class="bolaresultmodif">0</span><span class="bolaresultmodif">4</span></td>
    </tr>
    <tr>
      <td>2024-10-14</td><td>Senin</td>
      <td><span class="bolaresultmodif">5</span></td>
    </tr>
  </tbody>
</table>
</body></html>"#;

    #[test]
    fn test_parse_first_row() {
        let record = parse_table(PAGE, &liveresult(), VALUES).unwrap();
        assert_eq!(record.to_line(), "2024-10-15 Selasa 1 9 0 4");
    }

    #[test]
    fn test_parse_by_id() {
        let page = PAGE.replace(r#"class="liveresult""#, r#"id="hasil""#);
        let record = parse_table(&page, &TableSelector::Id("hasil".into()), VALUES).unwrap();
        assert_eq!(record.values, vec!["1", "9", "0", "4"]);
    }

    #[test]
    fn test_ids_and_classes_are_matched_literally() {
        let page = PAGE.replace(r#"class="liveresult""#, r#"id="1hasil" class="table live-result""#);
        let record = parse_table(&page, &TableSelector::Id("1hasil".into()), VALUES).unwrap();
        assert_eq!(record.date, "2024-10-15");

        let record =
            parse_table(&page, &TableSelector::Class("live-result".into()), VALUES).unwrap();
        assert_eq!(record.weekday, "Selasa");

        let err = parse_table(PAGE, &TableSelector::Class("live result".into()), VALUES)
            .unwrap_err();
        assert_eq!(err.kind(), "structure");
    }

    #[test]
    fn test_rows_without_explicit_tbody_are_read() {
        let page = r#"<table class="liveresult"><tr><td>2024-10-15</td><td>Selasa</td><td><span class="bolaresultmodif">1</span></td></tr></table>"#;
        let record = parse_table(page, &liveresult(), VALUES).unwrap();
        assert_eq!(record.to_line(), "2024-10-15 Selasa 1");
    }

    #[test]
    fn test_missing_table() {
        let err = parse_table("<html><body><p>maintenance</p></body></html>", &liveresult(), VALUES)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_empty_body() {
        let page = r#"<table class="liveresult"><thead><tr><th>x</th></tr></thead><tbody></tbody></table>"#;
        let err = parse_table(page, &liveresult(), VALUES).unwrap_err();
        assert!(err.to_string().contains("no <tr>"));
    }

    #[test]
    fn test_too_few_cells() {
        let page = r#"<table class="liveresult"><tbody><tr><td>2024-10-15</td><td>Selasa</td></tr></tbody></table>"#;
        let err = parse_table(page, &liveresult(), VALUES).unwrap_err();
        assert!(err.to_string().contains("2 cells"));
    }

    #[test]
    fn test_zero_values() {
        let page = r#"<table class="liveresult"><tbody><tr><td>2024-10-15</td><td>Selasa</td><td>1 9 0 4</td></tr></tbody></table>"#;
        let err = parse_table(page, &liveresult(), VALUES).unwrap_err();
        assert_eq!(err.kind(), "structure");
    }
}
