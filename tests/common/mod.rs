#![allow(dead_code)]

use axum::Router;
use resultsync::config::schema::{Source, SourceKind, TableSelector};
use std::time::Duration;

pub const VALUE_SELECTOR: &str = "span.bolaresultmodif";

pub const LIVERESULT_PAGE: &str = include_str!("../fixtures/liveresult.html");
pub const EMBEDDED_PAGE: &str = include_str!("../fixtures/embedded_script.html");

/// Serves `app` on an ephemeral local port and returns its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });

    format!("http://{}", addr)
}

pub fn source(name: &str, url: String, kind: SourceKind) -> Source {
    Source {
        name: name.to_string(),
        url,
        target_file: format!("{}.txt", name),
        timeout: Duration::from_secs(5),
        kind,
    }
}

pub fn static_table_kind() -> SourceKind {
    SourceKind::StaticTable {
        table: TableSelector::Class("liveresult".into()),
        value_selector: VALUE_SELECTOR.into(),
    }
}
