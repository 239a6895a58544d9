//! Reduction of normalized parts into one summary.

use partlink_models::{
    AggregatedPartSummary, LeadTime, NormalizedPart, DEFAULT_DESCRIPTION, DEFAULT_MANUFACTURER,
};
use partlink_utils::{PartlinkError, PartlinkResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::error;

use crate::parsers::PartParser;

/// Parsers resolved for one request, keyed by supplier name.
pub type ResolvedParsers = HashMap<String, Arc<dyn PartParser>>;

/// Expands every part through its origin's parser and folds the results.
///
/// Descriptive fields take the first non-empty value in part order, stock is
/// summed, lead time is the minimum over all packaging entries, and
/// specifications are grouped per supplier. When a supplier contributes
/// several parts, its last specification set is kept.
pub fn merge_parts(
    part_number: &str,
    parts: &[NormalizedPart],
    parsers: &ResolvedParsers,
) -> PartlinkResult<AggregatedPartSummary> {
    let mut packaging = Vec::new();
    let mut specifications = BTreeMap::new();

    for part in parts {
        let parser = parsers.get(&part.origin).ok_or_else(|| {
            error!(supplier = %part.origin, "No parser resolved for part origin during merge");
            PartlinkError::internal(format!("no parser resolved for {}", part.origin))
        })?;

        let entries = parser.extract_packaging(part).map_err(|e| merge_fault(part, e.into()))?;
        packaging.extend(entries);

        let spec_set = parser
            .extract_specifications(part)
            .map_err(|e| merge_fault(part, e.into()))?;
        specifications.insert(part.origin.clone(), spec_set.specifications);
    }

    let manufacturer_lead_time =
        LeadTime::shortest(packaging.iter().map(|entry| entry.manufacturer_lead_time));

    let total_stock = parts
        .iter()
        .fold(0u64, |total, part| total.saturating_add(part.stock_quantity));

    let mut source_parts: Vec<String> = Vec::new();
    for part in parts {
        if !source_parts.contains(&part.origin) {
            source_parts.push(part.origin.clone());
        }
    }

    Ok(AggregatedPartSummary {
        name: part_number.to_string(),
        description: first_present(parts, |part| part.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        total_stock,
        manufacturer_lead_time,
        manufacturer_name: first_present(parts, |part| part.manufacturer.as_deref())
            .unwrap_or(DEFAULT_MANUFACTURER)
            .to_string(),
        product_doc: first_present(parts, |part| part.datasheet_url.as_deref()).map(str::to_string),
        product_url: first_present(parts, |part| part.buy_url.as_deref()).map(str::to_string),
        product_image_url: first_present(parts, |part| part.image_url.as_deref())
            .map(str::to_string),
        source_parts,
        specifications,
        packaging,
    })
}

fn first_present<'a, F>(parts: &'a [NormalizedPart], field: F) -> Option<&'a str>
where
    F: Fn(&'a NormalizedPart) -> Option<&'a str>,
{
    parts
        .iter()
        .filter_map(field)
        .find(|value| !value.trim().is_empty())
}

fn merge_fault(part: &NormalizedPart, cause: PartlinkError) -> PartlinkError {
    error!(
        supplier = %part.origin,
        part_number = %part.matched_part_number,
        error = %cause,
        "Failed to expand supplier part"
    );
    PartlinkError::internal(cause.to_string())
}
