//! HTTP lookup client
//!
//! Thin reqwest wrapper around `GET {base}/api/getAddresses`.

use async_trait::async_trait;
use reqwest::Client;

use super::response::LookupResponse;
use super::{AddressLookup, AddressQuery};
use crate::config::Config;
use crate::error::LookupError;

#[derive(Clone)]
pub struct HttpAddressLookup {
    http: Client,
    base_url: String,
}

impl HttpAddressLookup {
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url_str().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a query.
    pub fn url_for(&self, query: &AddressQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }
}

#[async_trait]
impl AddressLookup for HttpAddressLookup {
    async fn lookup(&self, query: &AddressQuery) -> Result<LookupResponse, LookupError> {
        let url = self.url_for(query);
        let url = reqwest::Url::parse(&url).map_err(|e| LookupError::InvalidBaseUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(%url, "requesting addresses");

        let response = self.http.get(url).send().await?;

        // The backend reports failures in the body, so non-2xx bodies are
        // decoded like any other.
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "address lookup returned non-success status");
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        LookupResponse::from_value(value)
    }
}
