//! Per-segment bitset aggregation.

use crate::bit_set::BitSet;

/// A document set over an index partitioned into segments with independent
/// local ID spaces: one [`BitSet`] per segment, in segment order.
///
/// Aggregate operations (cardinality, intersection) are applied segment-wise
/// and summed. No segment's contribution is assumed zero without evaluating
/// it, since live-document masks differ per segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentedBitSet {
    segments: Vec<BitSet>,
}

impl SegmentedBitSet {
    /// Wraps per-segment bitsets, one per index segment.
    pub fn new(segments: Vec<BitSet>) -> SegmentedBitSet {
        SegmentedBitSet { segments }
    }

    /// Creates an all-zero set shaped like the given per-segment universe
    /// sizes.
    pub fn empty(segment_lens: &[usize]) -> SegmentedBitSet {
        SegmentedBitSet {
            segments: segment_lens.iter().map(|&len| BitSet::empty(len)).collect(),
        }
    }

    /// Creates an all-one set shaped like the given per-segment universe
    /// sizes.
    pub fn full(segment_lens: &[usize]) -> SegmentedBitSet {
        SegmentedBitSet {
            segments: segment_lens.iter().map(|&len| BitSet::full(len)).collect(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[BitSet] {
        &self.segments
    }

    pub fn segment(&self, ordinal: usize) -> &BitSet {
        &self.segments[ordinal]
    }

    pub fn segment_mut(&mut self, ordinal: usize) -> &mut BitSet {
        &mut self.segments[ordinal]
    }

    /// Total number of set bits across all segments.
    pub fn cardinality(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| segment.count_ones() as u64)
            .sum()
    }

    /// Segment-wise intersection.
    ///
    /// # Panics
    ///
    /// Panics if the segment counts or any per-segment lengths differ.
    pub fn and(&self, other: &SegmentedBitSet) -> SegmentedBitSet {
        assert_eq!(
            self.segments.len(),
            other.segments.len(),
            "segment count mismatch: {} != {}",
            self.segments.len(),
            other.segments.len()
        );
        SegmentedBitSet {
            segments: self
                .segments
                .iter()
                .zip(other.segments.iter())
                .map(|(left, right)| left & right)
                .collect(),
        }
    }

    /// Cardinality of the segment-wise intersection, without materializing it.
    ///
    /// # Panics
    ///
    /// Panics if the segment counts or any per-segment lengths differ.
    pub fn and_cardinality(&self, other: &SegmentedBitSet) -> u64 {
        assert_eq!(
            self.segments.len(),
            other.segments.len(),
            "segment count mismatch: {} != {}",
            self.segments.len(),
            other.segments.len()
        );
        self.segments
            .iter()
            .zip(other.segments.iter())
            .map(|(left, right)| left.and_cardinality(right) as u64)
            .sum()
    }

    /// Segment-wise in-place intersection.
    pub fn and_assign(&mut self, other: &SegmentedBitSet) {
        assert_eq!(
            self.segments.len(),
            other.segments.len(),
            "segment count mismatch: {} != {}",
            self.segments.len(),
            other.segments.len()
        );
        for (left, right) in self.segments.iter_mut().zip(other.segments.iter()) {
            *left &= right;
        }
    }

    /// Segment-wise in-place union.
    pub fn or_assign(&mut self, other: &SegmentedBitSet) {
        assert_eq!(
            self.segments.len(),
            other.segments.len(),
            "segment count mismatch: {} != {}",
            self.segments.len(),
            other.segments.len()
        );
        for (left, right) in self.segments.iter_mut().zip(other.segments.iter()) {
            *left |= right;
        }
    }

    /// Iterates `(segment_ordinal, local_doc_id)` pairs of all set bits, in
    /// ascending segment then document order.
    pub fn iter_doc_ids(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(ordinal, segment)| segment.iter().map(move |doc_id| (ordinal, doc_id)))
    }
}
