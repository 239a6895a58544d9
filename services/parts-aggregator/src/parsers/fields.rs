//! Lenient readers for loosely typed supplier JSON.
//!
//! Supplier catalogs mix numbers, numeric strings, empty strings and nulls
//! for the same field. These helpers turn such values into the typed fields
//! of the normalized model without ever failing; an unusable value is `None`
//! and the caller applies its documented default.

use partlink_models::{LeadTime, NormalizedPart, SpecificationEntry, NOT_AVAILABLE};
use serde_json::{Map, Value};

use super::ParserError;

/// Catalog rows under `collection` whose `key` field equals `part_number` exactly.
pub fn matching_rows<'a>(
    payload: &'a Value,
    collection: &str,
    key: &str,
    part_number: &str,
) -> Vec<&'a Value> {
    let Some(rows) = payload.get(collection).and_then(Value::as_array) else {
        tracing::debug!(collection, "Catalog payload has no usable row collection");
        return Vec::new();
    };

    rows.iter()
        .filter(|row| row.get(key).and_then(Value::as_str) == Some(part_number))
        .collect()
}

/// The raw catalog row behind a normalized part.
pub fn row_object(part: &NormalizedPart) -> Result<&Map<String, Value>, ParserError> {
    part.raw.as_object().ok_or_else(|| ParserError::RowNotObject {
        supplier: part.origin.clone(),
        part_number: part.matched_part_number.clone(),
    })
}

/// Follows a path of object keys.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Non-empty text, with numbers and booleans rendered as text.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A finite number from a JSON number or a string with a leading numeric part.
pub fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// A positive whole quantity; zero, negative and non-numeric values are `None`.
pub fn quantity(value: Option<&Value>) -> Option<u64> {
    number(value).filter(|n| *n >= 1.0).map(|n| n.floor() as u64)
}

/// A non-negative price, defaulting to zero.
pub fn price(value: Option<&Value>) -> f64 {
    number(value).filter(|n| *n >= 0.0).unwrap_or(0.0)
}

/// Stock from the primary field, else the fallback field, else zero.
pub fn stock_signal(row: &Value, primary: &str, fallback: &str) -> u64 {
    quantity(row.get(primary))
        .or_else(|| quantity(row.get(fallback)))
        .unwrap_or(0)
}

/// Converts a lead time expressed in weeks into days.
pub fn weeks_to_lead_time(weeks: Option<f64>) -> LeadTime {
    match weeks {
        Some(weeks) if weeks >= 0.0 && weeks <= (u32::MAX / 7) as f64 => {
            LeadTime::Days((weeks * 7.0).round() as u32)
        }
        _ => LeadTime::NotAvailable,
    }
}

/// Builds a fixed specification list, substituting "N/A" for missing values.
pub fn specifications(row: &Value, fields: &[(&str, &[&str])]) -> Vec<SpecificationEntry> {
    fields
        .iter()
        .map(|(key, path)| {
            let value = text(lookup(row, path)).unwrap_or_else(|| NOT_AVAILABLE.to_string());
            SpecificationEntry::new(*key, value)
        })
        .collect()
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<f64>() {
        return Some(n);
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}
