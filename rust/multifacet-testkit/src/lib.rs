//! In-memory index fixtures for exercising the faceting engine in tests.
//!
//! [`MemoryIndexBuilder`] assembles a small multi-segment index of documents
//! with multi-valued string fields, optionally with deleted documents, and
//! [`MemoryIndex`] implements the engine's substrate seam over it. This crate
//! is test tooling: nothing here is tuned for scale.

use std::collections::{BTreeMap, BTreeSet};

use multifacet_bitset::{BitSet, SegmentedBitSet};
use multifacet_common::Result;
use multifacet_index_core::{DocAddress, FieldValuePostings, IndexReader, Query};

#[derive(Default)]
struct SegmentData {
    doc_count: usize,
    /// field -> value -> local doc IDs carrying that value
    postings: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
    deleted: Vec<u32>,
}

/// Builds a [`MemoryIndex`] document by document.
///
/// Documents are appended to the current segment;
/// [`finish_segment`](MemoryIndexBuilder::finish_segment) seals it and starts
/// a new one with an independent local doc-ID space. Field values are exact
/// strings; a field may carry several values on one document.
#[derive(Default)]
pub struct MemoryIndexBuilder {
    sealed: Vec<SegmentData>,
    current: SegmentData,
}

impl MemoryIndexBuilder {
    pub fn new() -> MemoryIndexBuilder {
        MemoryIndexBuilder::default()
    }

    /// Appends a document with the given `(field, values)` pairs to the
    /// current segment and returns its address.
    pub fn add_document(&mut self, fields: &[(&str, &[&str])]) -> DocAddress {
        let doc_id = self.current.doc_count as u32;
        self.current.doc_count += 1;
        for (field, values) in fields {
            let by_value = self.current.postings.entry(field.to_string()).or_default();
            for value in *values {
                by_value.entry(value.to_string()).or_default().push(doc_id);
            }
        }
        DocAddress::new(self.sealed.len() as u32, doc_id)
    }

    /// Marks a previously added document as deleted. Deleted documents stay
    /// in value postings but never match queries, mirroring how segment
    /// readers apply live-document masks at evaluation time.
    pub fn delete_document(&mut self, addr: DocAddress) {
        let segment = addr.segment as usize;
        if segment == self.sealed.len() {
            self.current.deleted.push(addr.doc_id);
        } else {
            self.sealed[segment].deleted.push(addr.doc_id);
        }
    }

    /// Seals the current segment; subsequent documents start a new one with
    /// local doc IDs from zero.
    pub fn finish_segment(&mut self) {
        if self.current.doc_count > 0 {
            self.sealed.push(std::mem::take(&mut self.current));
        }
    }

    pub fn build(mut self) -> MemoryIndex {
        self.finish_segment();
        MemoryIndex {
            segments: self
                .sealed
                .into_iter()
                .map(|data| {
                    let mut live = BitSet::full(data.doc_count);
                    for doc_id in &data.deleted {
                        live.reset(*doc_id as usize);
                    }
                    Segment {
                        doc_count: data.doc_count,
                        postings: data
                            .postings
                            .into_iter()
                            .map(|(field, by_value)| {
                                let by_value = by_value
                                    .into_iter()
                                    .map(|(value, doc_ids)| {
                                        let bits = BitSet::from_positions(
                                            doc_ids.iter().map(|&id| id as usize),
                                            data.doc_count,
                                        );
                                        (value, bits)
                                    })
                                    .collect();
                                (field, by_value)
                            })
                            .collect(),
                        live,
                    }
                })
                .collect(),
        }
    }
}

struct Segment {
    doc_count: usize,
    postings: BTreeMap<String, BTreeMap<String, BitSet>>,
    live: BitSet,
}

/// A small, immutable multi-segment index held entirely in memory.
pub struct MemoryIndex {
    segments: Vec<Segment>,
}

impl MemoryIndex {
    fn segment_lens(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.doc_count).collect()
    }

    /// Raw per-segment postings of one field value; all-zero for an unknown
    /// field or value. Live-document masks are not applied here.
    fn postings_for(&self, field: &str, value: &str) -> SegmentedBitSet {
        SegmentedBitSet::new(
            self.segments
                .iter()
                .map(|segment| {
                    segment
                        .postings
                        .get(field)
                        .and_then(|by_value| by_value.get(value))
                        .cloned()
                        .unwrap_or_else(|| BitSet::empty(segment.doc_count))
                })
                .collect(),
        )
    }

    fn eval(&self, query: &Query) -> SegmentedBitSet {
        match query {
            Query::All => SegmentedBitSet::full(&self.segment_lens()),
            Query::Term { field, value } => self.postings_for(field, value),
            Query::And(queries) => {
                let mut result = SegmentedBitSet::full(&self.segment_lens());
                for query in queries {
                    result.and_assign(&self.eval(query));
                }
                result
            }
            Query::Or(queries) => {
                let mut result = SegmentedBitSet::empty(&self.segment_lens());
                for query in queries {
                    result.or_assign(&self.eval(query));
                }
                result
            }
        }
    }
}

impl IndexReader for MemoryIndex {
    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn segment_doc_count(&self, segment: usize) -> usize {
        self.segments[segment].doc_count
    }

    fn evaluate(&self, query: &Query) -> Result<SegmentedBitSet> {
        let mut result = self.eval(query);
        for (ordinal, segment) in self.segments.iter().enumerate() {
            *result.segment_mut(ordinal) &= &segment.live;
        }
        Ok(result)
    }

    fn enumerate_values(
        &self,
        field: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<FieldValuePostings>> + '_>> {
        let values: BTreeSet<String> = self
            .segments
            .iter()
            .filter_map(|segment| segment.postings.get(field))
            .flat_map(|by_value| by_value.keys().cloned())
            .collect();
        let field = field.to_string();
        Ok(Box::new(values.into_iter().map(move |value| {
            Ok(FieldValuePostings {
                bitset: self.postings_for(&field, &value),
                value,
            })
        })))
    }

    fn recompute_bitset(&self, field: &str, value: &str) -> Result<SegmentedBitSet> {
        Ok(self.postings_for(field, value))
    }
}

/// The canonical five-document grocery fixture used across the engine's
/// tests: `color ∈ {yellow×3, white×1, none×1}` and multi-valued
/// `type ∈ {food×3, fruit×2, meat×1, drink×2}`, with a `keyword` field on
/// two of the documents.
pub fn grocery_index() -> MemoryIndex {
    let mut builder = MemoryIndexBuilder::new();
    // Banana
    builder.add_document(&[
        ("color", &["yellow"]),
        ("type", &["food", "fruit"]),
        ("keyword", &["apa"]),
    ]);
    // Apple
    builder.add_document(&[("color", &["yellow"]), ("type", &["food", "fruit"])]);
    // Burger
    builder.add_document(&[("color", &["yellow"]), ("type", &["food", "meat"])]);
    // Milk
    builder.add_document(&[("color", &["white"]), ("type", &["drink"])]);
    // Water
    builder.add_document(&[
        ("color", &["none"]),
        ("type", &["drink"]),
        ("keyword", &["apa"]),
    ]);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_and_all_queries() {
        let index = grocery_index();
        assert_eq!(index.segment_count(), 1);
        assert_eq!(index.segment_doc_count(0), 5);

        assert_eq!(index.evaluate(&Query::All).unwrap().cardinality(), 5);
        assert_eq!(
            index
                .evaluate(&Query::term("color", "yellow"))
                .unwrap()
                .cardinality(),
            3
        );
        assert_eq!(
            index
                .evaluate(&Query::term("color", "purple"))
                .unwrap()
                .cardinality(),
            0
        );
        assert_eq!(
            index
                .evaluate(&Query::term("shape", "round"))
                .unwrap()
                .cardinality(),
            0
        );
    }

    #[test]
    fn test_boolean_composition() {
        let index = grocery_index();
        let yellow_fruit = Query::and([
            Query::term("color", "yellow"),
            Query::term("type", "fruit"),
        ]);
        assert_eq!(index.evaluate(&yellow_fruit).unwrap().cardinality(), 2);

        let white_or_none = Query::or([
            Query::term("color", "white"),
            Query::term("color", "none"),
        ]);
        assert_eq!(index.evaluate(&white_or_none).unwrap().cardinality(), 2);
    }

    #[test]
    fn test_enumerate_values_is_lexical_and_unmasked() {
        let mut builder = MemoryIndexBuilder::new();
        let banana = builder.add_document(&[("type", &["fruit"])]);
        builder.add_document(&[("type", &["drink"])]);
        builder.delete_document(banana);
        let index = builder.build();

        let values: Vec<FieldValuePostings> = index
            .enumerate_values("type")
            .unwrap()
            .map(|v| v.unwrap())
            .collect();
        let names: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(names, vec!["drink", "fruit"]);

        // Postings keep the deleted document; evaluation masks it out.
        assert_eq!(values[1].bitset.cardinality(), 1);
        assert_eq!(
            index
                .evaluate(&Query::term("type", "fruit"))
                .unwrap()
                .cardinality(),
            0
        );
    }

    #[test]
    fn test_segments_have_independent_id_spaces() {
        let mut builder = MemoryIndexBuilder::new();
        let first = builder.add_document(&[("color", &["red"])]);
        builder.finish_segment();
        let second = builder.add_document(&[("color", &["red"])]);
        assert_eq!(first, DocAddress::new(0, 0));
        assert_eq!(second, DocAddress::new(1, 0));

        let index = builder.build();
        let reds = index.evaluate(&Query::term("color", "red")).unwrap();
        assert_eq!(reds.segment_count(), 2);
        assert_eq!(reds.cardinality(), 2);
    }
}
