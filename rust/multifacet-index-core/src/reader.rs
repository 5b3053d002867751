//! Read access to an open index view.

use multifacet_bitset::SegmentedBitSet;
use multifacet_common::Result;

use crate::query::Query;

/// Identifies one document within a segmented index: the segment ordinal plus
/// the document's local ID inside that segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocAddress {
    pub segment: u32,
    pub doc_id: u32,
}

impl DocAddress {
    pub fn new(segment: u32, doc_id: u32) -> DocAddress {
        DocAddress { segment, doc_id }
    }
}

/// One distinct value of a field together with the set of documents carrying
/// it, as produced by [`IndexReader::enumerate_values`].
pub struct FieldValuePostings {
    pub value: String,
    pub bitset: SegmentedBitSet,
}

/// A read-only view over one generation of the index.
///
/// The faceting engine treats the reader as its document-matching substrate.
/// A reader is scoped to one open index view: reopening the index means
/// constructing a new reader (and a new searcher around it); nothing here is
/// invalidated in place.
///
/// # Thread Safety
///
/// Readers are shared across request threads via `Arc`; every method takes
/// `&self` and must be safe to call concurrently.
pub trait IndexReader: Send + Sync + 'static {
    /// Returns the number of segments in this index view.
    fn segment_count(&self) -> usize;

    /// Returns the size of the local document-ID universe of a segment
    /// (one more than the largest assignable local ID, deleted documents
    /// included).
    fn segment_doc_count(&self, segment: usize) -> usize;

    /// Evaluates a query into per-segment bitsets.
    ///
    /// Live-document masks are applied here: a set bit is a live, matching
    /// document. The result supports AND composition with value bitsets and
    /// cardinality extraction.
    fn evaluate(&self, query: &Query) -> Result<SegmentedBitSet>;

    /// Enumerates every distinct value of `field` with its document bitset.
    ///
    /// The order must be deterministic for a given index view; any order is
    /// acceptable (the engine re-sorts before use). Value bitsets are raw
    /// postings: they do not apply live-document masks, so a value's
    /// cardinality counts deleted documents too. Intersecting with an
    /// [`evaluate`](IndexReader::evaluate) result applies the masks
    /// implicitly.
    ///
    /// An unknown field yields an empty enumeration, not an error.
    fn enumerate_values(
        &self,
        field: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<FieldValuePostings>> + '_>>;

    /// Recomputes the document bitset of a single field value.
    ///
    /// Used when a cached bitset has been evicted under memory pressure. The
    /// result must be identical to the bitset originally produced by
    /// [`enumerate_values`](IndexReader::enumerate_values) for the same view.
    /// An unknown field or value yields an all-zero set.
    fn recompute_bitset(&self, field: &str, value: &str) -> Result<SegmentedBitSet>;
}
