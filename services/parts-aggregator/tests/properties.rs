mod common;

use partlink_aggregator::{merge_parts, ArrowParser, PartParser, ResolvedParsers, TtiParser};
use partlink_models::{LeadTime, NormalizedPart, RawSupplierResponse};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

use common::StaticFetcher;

fn resolved() -> ResolvedParsers {
    let mut parsers = ResolvedParsers::new();
    parsers.insert("Arrow".to_string(), Arc::new(ArrowParser::new()));
    parsers.insert("TTI".to_string(), Arc::new(TtiParser::new().unwrap()));
    parsers
}

/// A stock value as a supplier might send it: a count, numeric text, junk or nothing.
fn stock_value() -> impl Strategy<Value = (Value, u64)> {
    prop_oneof![
        (0u32..1_000_000).prop_map(|n| (json!(n), n as u64)),
        (0u32..1_000_000).prop_map(|n| (json!(n.to_string()), n as u64)),
        "[a-z]{1,6}".prop_map(|s| (json!(s), 0)),
        Just((Value::Null, 0)),
    ]
}

fn arrow_rows(values: &[Value]) -> Vec<NormalizedPart> {
    let rows: Vec<Value> = values
        .iter()
        .map(|value| json!({"partNumber": "X100", "fohQuantity": value}))
        .collect();
    let response = RawSupplierResponse::new("Arrow", json!({ "pricingResponse": rows }));
    ArrowParser::new().extract_parts(&response, "X100")
}

proptest! {
    #[test]
    fn total_stock_is_sum_of_numeric_signals(values in prop::collection::vec(stock_value(), 1..12)) {
        let (raw, expected): (Vec<Value>, Vec<u64>) = values.into_iter().unzip();
        let parts = arrow_rows(&raw);

        let summary = merge_parts("X100", &parts, &resolved()).unwrap();
        prop_assert_eq!(summary.total_stock, expected.iter().sum::<u64>());
    }

    #[test]
    fn lead_time_is_shortest_parsed_value(weeks in prop::collection::vec(prop::option::of(0u32..60), 1..8)) {
        let rows: Vec<Value> = weeks
            .iter()
            .map(|w| match w {
                Some(w) => json!({"manufacturerPartNumber": "X100", "leadTime": format!("{} Weeks", w)}),
                None => json!({"manufacturerPartNumber": "X100", "leadTime": "Call"}),
            })
            .collect();
        let response = RawSupplierResponse::new("TTI", json!({ "parts": rows }));
        let parts = TtiParser::new().unwrap().extract_parts(&response, "X100");

        let summary = merge_parts("X100", &parts, &resolved()).unwrap();
        let expected = weeks
            .iter()
            .flatten()
            .min()
            .map(|w| LeadTime::Days(w * 7))
            .unwrap_or(LeadTime::NotAvailable);
        prop_assert_eq!(summary.manufacturer_lead_time, expected);
    }

    #[test]
    fn source_parts_only_name_reachable_suppliers(arrow_up in any::<bool>(), tti_up in any::<bool>()) {
        let mut fetcher = StaticFetcher::new();
        if arrow_up {
            fetcher = fetcher.with("Arrow", common::arrow_fixture());
        }
        if tti_up {
            fetcher = fetcher.with("TTI", common::tti_fixture());
        }

        let result = tokio_test::block_on(async {
            common::aggregator(fetcher).await.aggregate("X100").await
        });

        match (arrow_up, tti_up) {
            (false, false) => prop_assert_eq!(result.unwrap_err().http_status_code(), 503),
            _ => {
                let summary = result.unwrap();
                prop_assert_eq!(summary.contains_supplier("Arrow"), arrow_up);
                prop_assert_eq!(summary.contains_supplier("TTI"), tti_up);
            }
        }
    }
}
