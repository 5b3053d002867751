//! Bit-vector primitives over document-ID universes.
//!
//! [`BitSet`] is a fixed-size bit vector indexed by a local document ID within
//! one index segment. [`SegmentedBitSet`] aggregates one `BitSet` per segment
//! when the index substrate is partitioned into independently-numbered
//! segments, and sums cardinalities across them.

pub mod bit_set;
pub mod segmented;
#[cfg(test)]
mod tests;

pub use bit_set::BitSet;
pub use segmented::SegmentedBitSet;
