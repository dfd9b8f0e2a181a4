//! Catalog lookups and the TCGdex HTTP client.

use super::types::{CardDetails, SetDetails};
use crate::error::{ExportError, ExportResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, info, warn};

/// Card catalog lookups the exporter depends on
pub trait CatalogProvider {
    /// Fetch a set with its card listing
    fn get_set(&self, set_id: &str) -> impl Future<Output = ExportResult<SetDetails>> + Send;

    /// Fetch the full record of one card
    fn get_card(&self, card_id: &str) -> impl Future<Output = ExportResult<CardDetails>> + Send;
}

/// TCGdex API v2 client
#[derive(Debug, Clone)]
pub struct TcgdexClient {
    /// HTTP client
    client: Client,
    /// Base URL including the language segment
    base_url: String,
}

impl TcgdexClient {
    /// Create a new TCGdex client for one catalog language
    pub fn new(base_url: &str, language: &str, user_agent: &str) -> ExportResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|source| ExportError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: format!("{}/{}", base_url.trim_end_matches('/'), language),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a single GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ExportResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, "Making API request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ExportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ExportError::Request {
            url: url.clone(),
            source,
        })?;

        if status == StatusCode::NOT_FOUND {
            warn!(url = %url, "Catalog entry not found");
            return Err(ExportError::NotFound(url));
        }

        if !status.is_success() {
            warn!(url = %url, status = %status, "Request failed");
            return Err(ExportError::Status { url, status, body });
        }

        let data = serde_json::from_str(&body).map_err(|source| ExportError::Decode {
            url: url.clone(),
            source,
        })?;

        debug!(url = %url, "Request successful");
        Ok(data)
    }
}

impl CatalogProvider for TcgdexClient {
    async fn get_set(&self, set_id: &str) -> ExportResult<SetDetails> {
        info!(set_id = set_id, "Fetching set");
        self.get(&format!("/sets/{}", set_id)).await
    }

    async fn get_card(&self, card_id: &str) -> ExportResult<CardDetails> {
        debug!(card_id = card_id, "Fetching card");
        self.get(&format!("/cards/{}", card_id)).await
    }
}
