//! HTTPクライアント実装

use super::Catalog;
use crate::error::{ReconcileError, Result};
use bib_reconcile_common::{RecordBatch, SearchQuery};
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, concat!("bib-reconcile/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReconcileError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Catalog for CatalogClient {
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        let url = query.url(&self.base_url)?;
        let body = self.get_bytes(url.clone()).await?;
        let json = serde_json::from_slice(&body)?;
        debug!("Downloaded search results: {}", url);
        Ok(json)
    }

    async fn fetch_records(&self, batch: &RecordBatch) -> Result<Vec<u8>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let url = batch.url(&self.base_url)?;
        let bytes = self.get_bytes(url.clone()).await?;
        debug!(ids = batch.len(), bytes = bytes.len(), "Downloaded MARC: {}", url);
        Ok(bytes)
    }
}
