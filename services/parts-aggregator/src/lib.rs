//! # Partlink Aggregator
//!
//! Looks a part number up across several supplier catalogs and merges the
//! matches into one [`AggregatedPartSummary`](partlink_models::AggregatedPartSummary).
//!
//! ## Pipeline
//!
//! 1. [`fetcher`] retrieves every configured supplier catalog concurrently.
//!    Suppliers that fail or time out are left out of the lookup.
//! 2. [`parsers`] turn each catalog into normalized parts. The
//!    [`ParserRegistry`] picks the parser by supplier name.
//! 3. [`merge`] folds the parts into a summary: summed stock, shortest lead
//!    time, per-supplier specifications and every packaging offer.
//!
//! [`Aggregator`] drives the pipeline and [`create_app`] serves it over HTTP.

pub mod app;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod merge;
pub mod metrics;
pub mod middleware;
pub mod parsers;
pub mod routes;
pub mod service;

pub use app::{create_app, AppState};
pub use error::{ApiError, ApiResult};
pub use fetcher::{FetchError, HttpSupplierFetcher, SupplierFetcher};
pub use merge::{merge_parts, ResolvedParsers};
pub use metrics::AggregatorMetrics;
pub use parsers::{ArrowParser, ParserError, ParserRegistry, PartParser, TtiParser};
pub use service::Aggregator;
