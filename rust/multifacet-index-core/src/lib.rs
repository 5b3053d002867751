//! Core index-substrate abstractions for the multifacet engine.
//!
//! The faceting engine assumes a generic document-matching substrate: given a
//! boolean query, the substrate evaluates it into per-segment bitsets over
//! document identifiers; given a field, it enumerates every distinct value of
//! that field with the set of documents carrying it.
//!
//! This crate defines that seam:
//!
//! - [`Query`]: a minimal query algebra sufficient for drill-down
//!   construction (exact-match terms combined with AND/OR). Query parsing and
//!   any richer query language live outside the engine.
//! - [`IndexReader`]: the trait a substrate implements to expose query
//!   evaluation, field-value enumeration, and on-demand bitset recomputation.
//!
//! Implementations must be thread-safe: readers are shared across request
//! threads via `Arc`, and all methods take `&self`.

pub mod query;
pub mod reader;

pub use query::Query;
pub use reader::{DocAddress, FieldValuePostings, IndexReader};
