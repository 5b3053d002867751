//! Faceted counts with drill-down over an inverted-index substrate.
//!
//! For each requested field, the engine reports how many documents matching
//! the caller's query carry each distinct value of that field, while
//! respecting the values the caller has already selected on *other* fields —
//! a field's own selection never filters its own counts, so the user always
//! sees what switching that selection would yield.
//!
//! # Architecture
//!
//! - [`FieldValueCache`](cache::FieldValueCache): lazily built, concurrently
//!   shared per-field lists of `(value, bitset, cardinality)`, sorted by
//!   cardinality descending.
//! - [`MemoryOptimizer`](optimizer::MemoryOptimizer): policy that evicts
//!   low-value cached bitsets after builds; evicted bitsets are recomputed
//!   on demand from the substrate.
//! - [`build_drilldown_query`](drilldown::build_drilldown_query): combines
//!   the base query with the selections of every field except the one being
//!   counted.
//! - `FacetCounter`: scans a field's cached values in cardinality order,
//!   intersecting each with the drill-down document set, with exact early
//!   termination once no remaining value can enter the result.
//! - `ResultAccumulator`: bounded top-K collection with exact minimum-count
//!   pruning and conservative handling of tied tail entries.
//! - [`FacetSearcher`](searcher::FacetSearcher): per-index-view entry point
//!   tying the above together.
//!
//! The index substrate itself (query evaluation, value enumeration) is
//! abstracted behind `multifacet_index_core::IndexReader`.

mod accumulator;
pub mod cache;
pub mod config;
mod counter;
pub mod drilldown;
pub mod field_spec;
pub mod optimizer;
pub mod searcher;

pub use cache::{BitsetSlot, FieldCache, FieldValueCache, ValueBitset};
pub use config::FacetSearcherConfig;
pub use drilldown::build_drilldown_query;
pub use field_spec::{FacetFieldSpec, FacetMatch};
pub use optimizer::{MemoryOptimizer, NoMemoryOptimizer, RankBasedMemoryOptimizer};
pub use searcher::{FacetSearchResult, FacetSearcher, SearchHits};
