//! # Multifacet: faceted search with drill-down
//!
//! Multifacet computes faceted counts over documents matched by a query
//! against an inverted-index search engine: for each chosen field, how many
//! matching documents carry each distinct value, while respecting the values
//! the user has already selected on other fields.
//!
//! ## Key Features
//!
//! * **Self-excluding drill-down**: a field's own selection never filters its
//!   own counts, so the UI can always show what switching a selection would
//!   return
//! * **Exact top-K selection**: bounded result lists per field with precise
//!   minimum-count pruning and early termination over cardinality-sorted
//!   value lists — a pure short-circuit, never an approximation
//! * **Lazy, shared value caches**: per-field value bitsets are built at most
//!   effectively once per index view and shared across request threads
//! * **Tunable memory/CPU trade-off**: pluggable policies evict the long tail
//!   of cached bitsets and recompute them on demand under memory pressure
//! * **Segment-aware**: counts aggregate across independently-numbered index
//!   segments with per-segment live-document masks
//!
//! ## Architecture
//!
//! Multifacet is built as a modular workspace. This main crate is a
//! convenient entry point that re-exports the core components:
//!
//! * [`search`] - the faceting engine: searcher, field caches, memory
//!   policies, drill-down query construction
//! * [`index_core`] - the seam to the document-matching substrate (query
//!   algebra and the reader trait)
//! * [`common`] - shared error and result types
//! * [`support::bitset`] - document-ID bitset primitives with per-segment
//!   aggregation
//!
//! The inverted-index engine itself is an external collaborator: anything
//! that can evaluate a boolean query into per-segment bitsets and enumerate
//! the distinct values of a field can sit behind the
//! [`IndexReader`](index_core::IndexReader) trait.

pub use multifacet_common as common;
pub use multifacet_index_core as index_core;
pub use multifacet_search as search;

pub mod support {
    pub use multifacet_bitset as bitset;
}

pub use multifacet_index_core::{DocAddress, IndexReader, Query};
pub use multifacet_search::{
    FacetFieldSpec, FacetMatch, FacetSearchResult, FacetSearcher, FacetSearcherConfig, SearchHits,
};
