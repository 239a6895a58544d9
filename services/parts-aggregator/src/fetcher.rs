//! Supplier Fetcher
//!
//! Retrieves raw catalog documents from supplier endpoints.

use async_trait::async_trait;
use partlink_models::{RawSupplierResponse, SupplierDescriptor};
use partlink_utils::{FetchConfig, PartlinkError};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("empty payload")]
    EmptyPayload,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Unavailable(String),
}

impl FetchError {
    /// Metric label for the failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Request(error) if error.is_timeout() => "timeout",
            _ => "error",
        }
    }

    pub fn into_error(self, supplier: &str) -> PartlinkError {
        PartlinkError::supplier_unreachable(supplier, self.to_string())
    }
}

/// Source of raw supplier catalogs.
#[async_trait]
pub trait SupplierFetcher: Send + Sync {
    async fn fetch(&self, supplier: &SupplierDescriptor) -> Result<RawSupplierResponse, FetchError>;
}

/// Fetches catalogs over HTTP with one GET per supplier endpoint.
#[derive(Clone)]
pub struct HttpSupplierFetcher {
    client: Client,
}

impl HttpSupplierFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.supplier_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SupplierFetcher for HttpSupplierFetcher {
    async fn fetch(&self, supplier: &SupplierDescriptor) -> Result<RawSupplierResponse, FetchError> {
        let response = self
            .client
            .get(&supplier.endpoint)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        if payload.is_null() {
            return Err(FetchError::EmptyPayload);
        }

        Ok(RawSupplierResponse::new(supplier.name.clone(), payload))
    }
}
