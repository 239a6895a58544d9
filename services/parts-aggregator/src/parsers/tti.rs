//! TTI catalog parser.
//!
//! Rows live under `parts` and are keyed by `manufacturerPartNumber`. Lead
//! time is free text such as "12 Weeks".

use partlink_models::{
    LeadTime, NormalizedPart, PackagingEntry, PriceBreak, RawSupplierResponse, SpecificationSet,
    UNSPECIFIED_PACKAGING,
};
use regex::Regex;
use serde_json::Value;

use super::fields;
use super::{ParserError, PartParser};

const COLLECTION: &str = "parts";
const PART_NUMBER_FIELD: &str = "manufacturerPartNumber";
const WEEKS_MARKER: &str = r"(?i)weeks?";
const LEADING_INTEGER: &str = r"\d+";

const SPECIFICATION_FIELDS: &[(&str, &[&str])] = &[
    ("Category", &["category"]),
    ("HTS Code", &["hts"]),
    ("RoHS Status", &["roHsStatus"]),
    ("Lead in Terminals", &["environmentalInformation", "leadInTerminals"]),
    ("REACH SVHC", &["environmentalInformation", "reachSVHC"]),
    ("REACH Substance Name", &["environmentalInformation", "reachSubstanceName"]),
];

#[derive(Debug, Clone)]
pub struct TtiParser {
    weeks_marker: Regex,
    leading_integer: Regex,
}

impl TtiParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            weeks_marker: Regex::new(WEEKS_MARKER)?,
            leading_integer: Regex::new(LEADING_INTEGER)?,
        })
    }

    /// Days of lead time in text like "2 weeks"; bare numbers count as weeks.
    ///
    /// Ranges such as "2-3 weeks" use their first number.
    pub fn parse_lead_time(&self, value: Option<&Value>) -> LeadTime {
        match value {
            Some(Value::String(text)) if self.weeks_marker.is_match(text) => {
                let weeks = self
                    .leading_integer
                    .find(text)
                    .and_then(|digits| digits.as_str().parse::<u32>().ok());
                weeks.map(LeadTime::from_weeks).unwrap_or(LeadTime::NotAvailable)
            }
            Some(Value::Number(n)) => fields::weeks_to_lead_time(n.as_f64()),
            _ => LeadTime::NotAvailable,
        }
    }
}

impl PartParser for TtiParser {
    fn catalog(&self) -> &'static str {
        "tti"
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
                stock_quantity: fields::stock_signal(row, "availableToSell", "fohQuantity"),
                lead_time_raw: row.get("leadTime").cloned(),
                raw: row.clone(),
            })
            .collect()
    }

    fn extract_packaging(&self, part: &NormalizedPart) -> Result<Vec<PackagingEntry>, ParserError> {
        let row = fields::row_object(part)?;
        let pricing = row.get("pricing");

        let price_breaks: Vec<PriceBreak> = pricing
            .and_then(|pricing| pricing.get("quantityPriceBreaks"))
            .and_then(Value::as_array)
            .map(|tiers| {
                tiers
                    .iter()
                    .map(|tier| {
                        PriceBreak::new(
                            fields::quantity(tier.get("quantity")).unwrap_or(0),
                            fields::price(tier.get("price")),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(vec![PackagingEntry {
            packaging_type: fields::text(row.get("packaging"))
                .unwrap_or_else(|| UNSPECIFIED_PACKAGING.to_string()),
            minimum_order_quantity: fields::quantity(row.get("salesMinimum")).unwrap_or(1),
            quantity_available: fields::quantity(row.get("availableToSell")).unwrap_or(0),
            unit_price: fields::price(pricing.and_then(|pricing| pricing.get("vipPrice"))),
            supplier: part.origin.clone(),
            price_breaks,
            manufacturer_lead_time: self.parse_lead_time(row.get("leadTime")),
            warehouse_id: None,
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
