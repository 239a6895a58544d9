//! Supplier models for the Partlink aggregation system.
//!
//! A supplier is an external catalog provider identified by a stable name.
//! Descriptors are static configuration; raw responses live for one request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// A configured supplier catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct SupplierDescriptor {
    #[validate(length(min = 1, max = 64, message = "Supplier name must be between 1 and 64 characters"))]
    pub name: String,
    #[serde(alias = "url")]
    #[validate(url(message = "Supplier endpoint must be a valid URL"))]
    pub endpoint: String,
}

impl SupplierDescriptor {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// The undecoded catalog document one supplier returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSupplierResponse {
    pub supplier_name: String,
    pub payload: Value,
}

impl RawSupplierResponse {
    pub fn new(supplier_name: impl Into<String>, payload: Value) -> Self {
        Self {
            supplier_name: supplier_name.into(),
            payload,
        }
    }
}
