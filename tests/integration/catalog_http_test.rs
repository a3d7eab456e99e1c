use super::common;

use common::test_server::{closed_url, TestServer};
use formselect::adapters::http_source::HttpCatalogSource;
use formselect::domain::CatalogSourcePort;
use formselect::FormSelectError;

#[tokio::test]
async fn test_fetch_catalog_array() {
    let server = TestServer::new().await;
    let source = HttpCatalogSource::new();

    let body = source.fetch(&server.url("/forms")).await.unwrap();

    let forms = body.as_array().unwrap();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0]["formId"], "f1");
}

#[tokio::test]
async fn test_error_status_is_unavailable() {
    let server = TestServer::new().await;
    let source = HttpCatalogSource::new();

    let err = source.fetch(&server.url("/down")).await.unwrap_err();

    assert!(matches!(err, FormSelectError::SourceUnavailable(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = TestServer::new().await;
    let source = HttpCatalogSource::new();

    let err = source.fetch(&server.url("/broken")).await.unwrap_err();

    assert_eq!(err.kind(), "source_malformed");
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let source = HttpCatalogSource::new();

    let err = source.fetch(&closed_url().await).await.unwrap_err();

    assert_eq!(err.kind(), "source_unavailable");
}
