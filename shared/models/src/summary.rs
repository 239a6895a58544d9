//! The merged, per-request answer to a part lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::part::{LeadTime, PackagingEntry, SpecificationEntry};

pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_MANUFACTURER: &str = "Unknown";

/// Denormalized summary of one part number across every supplier that carries it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPartSummary {
    /// The queried part number.
    pub name: String,
    pub description: String,
    pub total_stock: u64,
    pub manufacturer_lead_time: LeadTime,
    pub manufacturer_name: String,
    pub product_doc: Option<String>,
    pub product_url: Option<String>,
    pub product_image_url: Option<String>,
    /// Contributing suppliers in first-seen order, each listed once.
    pub source_parts: Vec<String>,
    /// Specifications grouped by supplier name.
    pub specifications: BTreeMap<String, Vec<SpecificationEntry>>,
    pub packaging: Vec<PackagingEntry>,
}

impl AggregatedPartSummary {
    pub fn contains_supplier(&self, supplier: &str) -> bool {
        self.source_parts.iter().any(|name| name == supplier)
    }
}
