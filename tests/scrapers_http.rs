mod common;

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use resultsync::ResultSyncError;
use resultsync::config::schema::SourceKind;
use resultsync::scrapers::Scraper;
use resultsync::scrapers::embedded_script::EmbeddedScriptScraper;
use resultsync::scrapers::session_api::SessionApiScraper;
use resultsync::scrapers::static_table::StaticTableScraper;
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use common::{EMBEDDED_PAGE, LIVERESULT_PAGE, VALUE_SELECTOR, serve, source, static_table_kind};

const SESSION_COOKIE: &str = "PHPSESSID=f00dcafe";

async fn liveresult() -> Html<&'static str> {
    Html(LIVERESULT_PAGE)
}

async fn no_values() -> Html<&'static str> {
    Html(
        r#"<table class="liveresult"><tbody><tr><td>2024-10-15</td><td>Selasa</td><td>-</td></tr></tbody></table>"#,
    )
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn stalled() -> Html<&'static str> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Html(LIVERESULT_PAGE)
}

async fn market_page() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, format!("{}; Path=/", SESSION_COOKIE))],
        Html("<html><body><table id=\"result\"></table></body></html>"),
    )
}

async fn market_api(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let has_session = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION_COOKIE));
    let is_ajax = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        == Some("XMLHttpRequest");
    let has_referer = headers.get(header::REFERER).is_some();

    if !has_session || !is_ajax || !has_referer {
        return StatusCode::FORBIDDEN.into_response();
    }

    let data = match form.get("pasaran").map(String::as_str) {
        Some("sgp") => json!([
            ["2024-10-15", "Selasa", "<span class=\"bolaresultmodif\">2</span> <span class=\"bolaresultmodif\">6</span> <span class=\"bolaresultmodif\">0</span> <span class=\"bolaresultmodif\">8</span>"],
            ["2024-10-14", "Senin", "<span class=\"bolaresultmodif\">1</span>"]
        ]),
        Some("bare") => json!([["2024-10-15", "Selasa", "2608"]]),
        _ => json!([]),
    };

    Json(json!({ "draw": 1, "data": data })).into_response()
}

async fn embedded() -> Html<&'static str> {
    Html(EMBEDDED_PAGE)
}

fn app() -> Router {
    Router::new()
        .route("/live", get(liveresult))
        .route("/live-empty", get(no_values))
        .route("/down", get(unavailable))
        .route("/slow", get(stalled))
        .route("/pasaran/sgp", get(market_page))
        .route("/ajax/result", post(market_api))
        .route("/hk", get(embedded))
}

fn session_kind(pasaran: &str) -> SourceKind {
    SourceKind::SessionApi {
        pasaran: pasaran.to_string(),
        endpoint: None,
        value_selector: VALUE_SELECTOR.into(),
    }
}

fn embedded_kind(keyword: &str) -> SourceKind {
    SourceKind::EmbeddedScript {
        keyword: keyword.to_string(),
        value_selector: VALUE_SELECTOR.into(),
    }
}

#[tokio::test]
async fn static_table_yields_first_row() {
    let base = serve(app()).await;
    let src = source("sydney", format!("{}/live", base), static_table_kind());

    let record = StaticTableScraper::new().scrape(&src).await.expect("scrape ok");
    assert_eq!(record.to_line(), "2024-10-15 Selasa 4 0 7 2");
}

#[tokio::test]
async fn static_table_without_values_is_no_result() {
    let base = serve(app()).await;
    let src = source("sydney", format!("{}/live-empty", base), static_table_kind());

    let err = StaticTableScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "structure");
}

#[tokio::test]
async fn static_table_non_2xx_is_network_failure() {
    let base = serve(app()).await;
    let src = source("sydney", format!("{}/down", base), static_table_kind());

    let err = StaticTableScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "network");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn slow_page_is_cut_off_by_source_timeout() {
    let base = serve(app()).await;
    let mut src = source("sydney", format!("{}/slow", base), static_table_kind());
    src.timeout = Duration::from_millis(200);

    let started = Instant::now();
    let err = StaticTableScraper::new().scrape(&src).await.unwrap_err();

    assert_eq!(err.kind(), "network");
    assert!(matches!(&err, ResultSyncError::Network(e) if e.is_timeout()));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn session_api_replays_cookie_and_reads_first_row() {
    let base = serve(app()).await;
    let src = source("sgp", format!("{}/pasaran/sgp", base), session_kind("sgp"));

    let record = SessionApiScraper::new().scrape(&src).await.expect("scrape ok");
    assert_eq!(record.to_line(), "2024-10-15 Selasa 2 6 0 8");
}

#[tokio::test]
async fn session_api_empty_data_is_no_result() {
    let base = serve(app()).await;
    let src = source("xx", format!("{}/pasaran/sgp", base), session_kind("unknown"));

    let err = SessionApiScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "structure");
}

#[tokio::test]
async fn session_api_row_without_values_is_no_result() {
    let base = serve(app()).await;
    let src = source("bare", format!("{}/pasaran/sgp", base), session_kind("bare"));

    let err = SessionApiScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "structure");
}

#[tokio::test]
async fn session_api_without_session_page_is_rejected() {
    let base = serve(app()).await;
    // Landing page does not set the cookie, so the API refuses the call
    let mut src = source("sgp", format!("{}/live", base), session_kind("sgp"));
    src.kind = SourceKind::SessionApi {
        pasaran: "sgp".into(),
        endpoint: Some(format!("{}/ajax/result", base)),
        value_selector: VALUE_SELECTOR.into(),
    };

    let err = SessionApiScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn embedded_script_yields_first_row() {
    let base = serve(app()).await;
    let src = source("hk", format!("{}/hk", base), embedded_kind("dataHK"));

    let record = EmbeddedScriptScraper::new().scrape(&src).await.expect("scrape ok");
    assert_eq!(record.to_line(), "2024-10-15 Selasa 3 9 1 6");
}

#[tokio::test]
async fn embedded_script_missing_keyword_is_no_result() {
    let base = serve(app()).await;
    let src = source("hk", format!("{}/hk", base), embedded_kind("dataSGP"));

    let err = EmbeddedScriptScraper::new().scrape(&src).await.unwrap_err();
    assert_eq!(err.kind(), "structure");
}
