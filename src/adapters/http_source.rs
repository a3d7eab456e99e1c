//! Catalog source over HTTP

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::CatalogSourcePort;
use crate::error::{FormSelectError, FormSelectResult};

/// Fetches the catalog with a single GET and decodes the JSON body.
///
/// The client is built without a request timeout; a hung source leaves the
/// field with its last good catalog.
#[derive(Clone, Default)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSourcePort for HttpCatalogSource {
    async fn fetch(&self, locator: &str) -> FormSelectResult<Value> {
        let response = self
            .client
            .get(locator)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormSelectError::SourceUnavailable(format!(
                "{} returned HTTP {}",
                locator,
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        debug!(locator, bytes = body.len(), "Catalog response received");

        Ok(serde_json::from_str(&body)?)
    }
}
