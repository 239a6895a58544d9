//! Parser Registry
//!
//! Maps supplier names to parsers. Populated at startup; lookups happen on
//! every request, so the map sits behind an async read-write lock to allow
//! re-registration while requests are in flight.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{ArrowParser, ParserError, PartParser, TtiParser};

#[derive(Default)]
pub struct ParserRegistry {
    parsers: RwLock<HashMap<String, Arc<dyn PartParser>>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in Arrow and TTI parsers.
    pub async fn with_default_parsers() -> Result<Self, ParserError> {
        let registry = Self::new();
        registry.register("Arrow", ArrowParser::new()).await;
        registry.register("TTI", TtiParser::new()?).await;
        Ok(registry)
    }

    /// Registers a parser. A later registration under the same name replaces the earlier one.
    pub async fn register<P: PartParser + 'static>(&self, supplier: impl Into<String>, parser: P) {
        self.register_shared(supplier, Arc::new(parser)).await;
    }

    pub async fn register_shared(&self, supplier: impl Into<String>, parser: Arc<dyn PartParser>) {
        let supplier = supplier.into();
        let catalog = parser.catalog();
        let mut parsers = self.parsers.write().await;

        match parsers.insert(supplier.clone(), parser) {
            Some(previous) => info!(
                supplier = %supplier,
                catalog,
                replaced = previous.catalog(),
                "Replaced supplier parser"
            ),
            None => debug!(supplier = %supplier, catalog, "Registered supplier parser"),
        }
    }

    /// The parser for `supplier`, if one is registered.
    pub async fn get_parser(&self, supplier: &str) -> Option<Arc<dyn PartParser>> {
        let parsers = self.parsers.read().await;
        parsers.get(supplier).cloned()
    }

    /// Registered supplier names, sorted.
    pub async fn registered_suppliers(&self) -> Vec<String> {
        let parsers = self.parsers.read().await;
        let mut names: Vec<String> = parsers.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partlink_models::{NormalizedPart, PackagingEntry, RawSupplierResponse, SpecificationSet};

    struct NamedParser(&'static str);

    impl PartParser for NamedParser {
        fn catalog(&self) -> &'static str {
            self.0
        }

        fn extract_parts(&self, _: &RawSupplierResponse, _: &str) -> Vec<NormalizedPart> {
            Vec::new()
        }

        fn extract_packaging(&self, _: &NormalizedPart) -> Result<Vec<PackagingEntry>, ParserError> {
            Ok(Vec::new())
        }

        fn extract_specifications(&self, part: &NormalizedPart) -> Result<SpecificationSet, ParserError> {
            Ok(SpecificationSet {
                supplier: part.origin.clone(),
                specifications: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let registry = ParserRegistry::new();
        registry.register("Arrow", NamedParser("first")).await;
        registry.register("Arrow", NamedParser("second")).await;

        let parser = registry.get_parser("Arrow").await.unwrap();
        assert_eq!(parser.catalog(), "second");
        assert_eq!(registry.registered_suppliers().await, vec!["Arrow".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_parser_is_none() {
        let registry = ParserRegistry::new();
        assert!(registry.get_parser("Mouser").await.is_none());
        assert!(registry.registered_suppliers().await.is_empty());
    }

    #[tokio::test]
    async fn test_default_parsers() {
        let registry = ParserRegistry::with_default_parsers().await.unwrap();

        assert_eq!(
            registry.registered_suppliers().await,
            vec!["Arrow".to_string(), "TTI".to_string()]
        );
        assert_eq!(registry.get_parser("TTI").await.unwrap().catalog(), "tti");
        // Names are case-sensitive
        assert!(registry.get_parser("tti").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_lookups_during_registration() {
        let registry = Arc::new(ParserRegistry::with_default_parsers().await.unwrap());

        let readers: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.get_parser("Arrow").await.is_some() })
            })
            .collect();
        registry.register("Arrow", NamedParser("replacement")).await;

        for reader in readers {
            assert!(reader.await.unwrap());
        }
        assert_eq!(registry.get_parser("Arrow").await.unwrap().catalog(), "replacement");
    }
}
