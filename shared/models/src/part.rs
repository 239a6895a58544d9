//! Normalized part models.
//!
//! Every supplier parser translates its catalog rows into these shapes:
//! one [`NormalizedPart`] per matching row, then any number of
//! [`PackagingEntry`] values and exactly one [`SpecificationSet`] per part.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel used wherever a supplier value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Packaging type used when the supplier does not name one.
pub const UNSPECIFIED_PACKAGING: &str = "Unspecified";

/// A supplier catalog row that matched the requested part number.
///
/// `origin` is the name of the configured supplier the row came from and is
/// the only key used to find the parser that expands the part later on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPart {
    pub origin: String,
    pub matched_part_number: String,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "datasheetURL")]
    pub datasheet_url: Option<String>,
    pub buy_url: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    /// Best available quantity signal, already clamped to zero.
    pub stock_quantity: u64,
    /// Lead time exactly as the supplier reported it. Informational only;
    /// packaging entries carry the converted value.
    pub lead_time_raw: Option<Value>,
    /// The matched catalog row, kept for packaging and specification extraction.
    #[serde(skip)]
    pub raw: Value,
}

/// Manufacturer lead time in days, or the `"N/A"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeadTime {
    Days(u32),
    #[default]
    NotAvailable,
}

impl LeadTime {
    pub fn from_weeks(weeks: u32) -> Self {
        Self::Days(weeks.saturating_mul(7))
    }

    pub fn days(&self) -> Option<u32> {
        match self {
            Self::Days(days) => Some(*days),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Days(_))
    }

    /// Shortest lead time among the given values; `NotAvailable` entries are ignored.
    pub fn shortest<I>(values: I) -> Self
    where
        I: IntoIterator<Item = LeadTime>,
    {
        values
            .into_iter()
            .filter_map(|lead_time| lead_time.days())
            .min()
            .map(Self::Days)
            .unwrap_or(Self::NotAvailable)
    }
}

impl Serialize for LeadTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Days(days) => serializer.serialize_u32(*days),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for LeadTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Days(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Days(days) => Ok(Self::Days(days)),
            Repr::Text(text) if text == NOT_AVAILABLE => Ok(Self::NotAvailable),
            Repr::Text(text) => text
                .trim()
                .parse::<u32>()
                .map(Self::Days)
                .map_err(|_| de::Error::custom(format!("invalid lead time: {}", text))),
        }
    }
}

/// One quantity tier of a supplier price list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreak {
    pub break_quantity: u64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl PriceBreak {
    pub fn new(break_quantity: u64, unit_price: f64) -> Self {
        Self {
            break_quantity,
            unit_price,
            total_price: break_quantity as f64 * unit_price,
        }
    }
}

/// A purchasable offering of a matched part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackagingEntry {
    #[serde(rename = "type")]
    pub packaging_type: String,
    pub minimum_order_quantity: u64,
    pub quantity_available: u64,
    pub unit_price: f64,
    pub supplier: String,
    pub price_breaks: Vec<PriceBreak>,
    #[serde(rename = "manufacturerLeadTime")]
    pub manufacturer_lead_time: LeadTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificationEntry {
    pub key: String,
    pub value: String,
}

impl SpecificationEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Supplier-defined attributes of one part. Keys are not shared across suppliers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificationSet {
    pub supplier: String,
    pub specifications: Vec<SpecificationEntry>,
}

impl SpecificationSet {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.specifications
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lead_time_serializes_as_number_or_sentinel() {
        assert_eq!(serde_json::to_value(LeadTime::Days(14)).unwrap(), json!(14));
        assert_eq!(serde_json::to_value(LeadTime::NotAvailable).unwrap(), json!("N/A"));

        let parsed: LeadTime = serde_json::from_value(json!("N/A")).unwrap();
        assert_eq!(parsed, LeadTime::NotAvailable);
        let parsed: LeadTime = serde_json::from_value(json!("21")).unwrap();
        assert_eq!(parsed, LeadTime::Days(21));
        assert!(serde_json::from_value::<LeadTime>(json!("soon")).is_err());
    }

    #[test]
    fn shortest_lead_time_skips_sentinel() {
        let shortest = LeadTime::shortest([
            LeadTime::Days(14),
            LeadTime::NotAvailable,
            LeadTime::from_weeks(1),
        ]);
        assert_eq!(shortest, LeadTime::Days(7));
        assert_eq!(
            LeadTime::shortest([LeadTime::NotAvailable, LeadTime::NotAvailable]),
            LeadTime::NotAvailable
        );
        assert_eq!(LeadTime::shortest(Vec::new()), LeadTime::NotAvailable);
    }

    #[test]
    fn packaging_entry_uses_wire_field_names() {
        let entry = PackagingEntry {
            packaging_type: "Reel".to_string(),
            minimum_order_quantity: 1,
            quantity_available: 250,
            unit_price: 0.5,
            supplier: "TTI".to_string(),
            price_breaks: vec![PriceBreak::new(10, 0.5)],
            manufacturer_lead_time: LeadTime::Days(28),
            warehouse_id: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "Reel");
        assert_eq!(value["minimumOrderQuantity"], 1);
        assert_eq!(value["manufacturerLeadTime"], 28);
        assert_eq!(value["priceBreaks"][0]["totalPrice"], 5.0);
        assert!(value.get("warehouseId").is_none());
    }

    #[test]
    fn normalized_part_does_not_serialize_raw_row() {
        let part = NormalizedPart {
            origin: "Arrow".to_string(),
            matched_part_number: "X100".to_string(),
            description: None,
            manufacturer: Some("Molex".to_string()),
            datasheet_url: None,
            buy_url: None,
            image_url: None,
            stock_quantity: 3,
            lead_time_raw: None,
            raw: json!({"partNumber": "X100"}),
        };

        let value = serde_json::to_value(&part).unwrap();
        assert!(value.get("raw").is_none());
        assert_eq!(value["matchedPartNumber"], "X100");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn lead_time() -> impl Strategy<Value = LeadTime> {
            prop_oneof![
                (0u32..10_000).prop_map(LeadTime::Days),
                Just(LeadTime::NotAvailable),
            ]
        }

        proptest! {
            #[test]
            fn shortest_never_exceeds_any_available(values in prop::collection::vec(lead_time(), 0..16)) {
                let shortest = LeadTime::shortest(values.clone());

                match shortest.days() {
                    Some(days) => prop_assert!(values.iter().filter_map(LeadTime::days).all(|d| days <= d)),
                    None => prop_assert!(values.iter().all(|v| !v.is_available())),
                }
            }

            #[test]
            fn price_break_total_is_quantity_times_price(quantity in 0u64..1_000_000, cents in 0u32..100_000) {
                let unit_price = cents as f64 / 100.0;
                let tier = PriceBreak::new(quantity, unit_price);
                prop_assert_eq!(tier.total_price, quantity as f64 * unit_price);
            }
        }
    }
}
