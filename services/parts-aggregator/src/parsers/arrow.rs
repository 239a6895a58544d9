//! Arrow catalog parser.
//!
//! Rows live under `pricingResponse` and are keyed by `partNumber`. Lead time
//! is a structured week count at `leadTime.supplierLeadTime`.

use partlink_models::{
    NormalizedPart, PackagingEntry, PriceBreak, RawSupplierResponse, SpecificationSet,
    UNSPECIFIED_PACKAGING,
};
use serde_json::Value;

use super::fields;
use super::{ParserError, PartParser};

const COLLECTION: &str = "pricingResponse";
const PART_NUMBER_FIELD: &str = "partNumber";

const SPECIFICATION_FIELDS: &[(&str, &[&str])] = &[
    ("Category", &["taxonomy"]),
    ("HTS Code", &["htsCode"]),
    ("Part Classification", &["partClassification"]),
    ("EU RoHS", &["euRohs"]),
    ("China RoHS", &["chinaRohs"]),
    ("SVHC Over Threshold", &["SVHC", "svhcOverThreshold"]),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct ArrowParser;

impl ArrowParser {
    pub fn new() -> Self {
        Self
    }
}

impl PartParser for ArrowParser {
    fn catalog(&self) -> &'static str {
        "arrow"
    }

    fn extract_parts(&self, response: &RawSupplierResponse, part_number: &str) -> Vec<NormalizedPart> {
        fields::matching_rows(&response.payload, COLLECTION, PART_NUMBER_FIELD, part_number)
            .into_iter()
            .map(|row| NormalizedPart {
                origin: response.supplier_name.clone(),
                matched_part_number: part_number.to_string(),
                description: fields::text(row.get("description")),
                manufacturer: fields::text(row.get("manufacturer")),
                datasheet_url: fields::text(row.get("datasheetURL")),
                buy_url: fields::text(row.get("buyUrl")),
                image_url: fields::text(row.get("imageURL")),
                stock_quantity: fields::stock_signal(row, "fohQuantity", "availableToSell"),
                lead_time_raw: row.get("leadTime").cloned(),
                raw: row.clone(),
            })
            .collect()
    }

    fn extract_packaging(&self, part: &NormalizedPart) -> Result<Vec<PackagingEntry>, ParserError> {
        let row = fields::row_object(part)?;

        let tiers: &[Value] = row
            .get("pricingTier")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let price_breaks: Vec<PriceBreak> = tiers
            .iter()
            .map(|tier| {
                PriceBreak::new(
                    fields::quantity(tier.get("minQuantity")).unwrap_or(0),
                    fields::price(tier.get("resalePrice")),
                )
            })
            .collect();

        // Tiered rows quote their base price on the first tier
        let unit_price = match tiers.first() {
            Some(first) => fields::price(first.get("resalePrice")),
            None => fields::price(row.get("resalePrice")),
        };

        let weeks = row
            .get("leadTime")
            .and_then(|lead_time| fields::number(lead_time.get("supplierLeadTime")));

        Ok(vec![PackagingEntry {
            packaging_type: fields::text(row.get("pkg"))
                .unwrap_or_else(|| UNSPECIFIED_PACKAGING.to_string()),
            minimum_order_quantity: fields::quantity(row.get("minOrderQuantity")).unwrap_or(1),
            quantity_available: fields::quantity(row.get("fohQuantity")).unwrap_or(0),
            unit_price,
            supplier: part.origin.clone(),
            price_breaks,
            manufacturer_lead_time: fields::weeks_to_lead_time(weeks),
            warehouse_id: fields::text(row.get("warehouseId")),
        }])
    }

    fn extract_specifications(&self, part: &NormalizedPart) -> Result<SpecificationSet, ParserError> {
        fields::row_object(part)?;

        Ok(SpecificationSet {
            supplier: part.origin.clone(),
            specifications: fields::specifications(&part.raw, SPECIFICATION_FIELDS),
        })
    }
}
