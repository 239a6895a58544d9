//! # Partlink Domain Models
//!
//! Shared data model for the Partlink part aggregation system.
//!
//! ## Key Models
//!
//! - **SupplierDescriptor**: a configured supplier name and catalog endpoint
//! - **RawSupplierResponse**: the undecoded catalog document a supplier returned
//! - **NormalizedPart**: a supplier catalog row that matched the requested part number
//! - **PackagingEntry**: one purchasable offering with its price breaks and lead time
//! - **SpecificationSet**: supplier-specific key/value attributes of a part
//! - **AggregatedPartSummary**: the merged answer across all suppliers
//!
//! All models serialize with serde using the camelCase field names of the
//! public HTTP API.

pub mod part;
pub mod summary;
pub mod supplier;

pub use part::*;
pub use summary::*;
pub use supplier::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_serialization() {
        let mut specifications = BTreeMap::new();
        specifications.insert(
            "TTI".to_string(),
            vec![SpecificationEntry::new("Category", "Connectors")],
        );

        let summary = AggregatedPartSummary {
            name: "0510210200".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            total_stock: 12,
            manufacturer_lead_time: LeadTime::NotAvailable,
            manufacturer_name: DEFAULT_MANUFACTURER.to_string(),
            product_doc: None,
            product_url: None,
            product_image_url: None,
            source_parts: vec!["TTI".to_string()],
            specifications,
            packaging: vec![],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalStock"], 12);
        assert_eq!(value["manufacturerLeadTime"], "N/A");
        assert!(value["productDoc"].is_null());
        assert_eq!(value["specifications"]["TTI"][0]["key"], "Category");
        assert!(summary.contains_supplier("TTI"));
        assert!(!summary.contains_supplier("Arrow"));
    }
}
