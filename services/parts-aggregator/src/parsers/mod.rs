//! Supplier Parsers
//!
//! Each supplier publishes its catalog in its own JSON shape. A parser
//! translates one such shape into the normalized part model; the
//! [`ParserRegistry`] selects a parser by supplier name at request time.

use partlink_models::{NormalizedPart, PackagingEntry, RawSupplierResponse, SpecificationSet};
use partlink_utils::PartlinkError;
use thiserror::Error;

pub mod arrow;
pub mod fields;
pub mod registry;
pub mod tti;

pub use arrow::ArrowParser;
pub use registry::ParserRegistry;
pub use tti::TtiParser;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("catalog row for {part_number} from {supplier} is not a JSON object")]
    RowNotObject { supplier: String, part_number: String },

    #[error("invalid lead time pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<ParserError> for PartlinkError {
    fn from(error: ParserError) -> Self {
        match &error {
            ParserError::RowNotObject { supplier, .. } => {
                PartlinkError::malformed_payload(supplier.clone(), error.to_string())
            }
            ParserError::Pattern(_) => PartlinkError::internal(error.to_string()),
        }
    }
}

/// Capability every supplier parser provides.
///
/// `extract_parts` never fails: a payload without the expected collection
/// simply has no matches. Packaging and specification extraction only fail
/// when the part's raw row is not an object at all; every missing field has
/// a default.
pub trait PartParser: Send + Sync {
    /// Short name of the catalog format, used in diagnostics.
    fn catalog(&self) -> &'static str;

    fn extract_parts(&self, response: &RawSupplierResponse, part_number: &str) -> Vec<NormalizedPart>;

    fn extract_packaging(&self, part: &NormalizedPart) -> Result<Vec<PackagingEntry>, ParserError>;

    fn extract_specifications(&self, part: &NormalizedPart) -> Result<SpecificationSet, ParserError>;
}
