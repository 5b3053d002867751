//! Memory-pressure policies for cached value bitsets.
//!
//! A field cache keeps one bitset per distinct field value, which for
//! high-cardinality fields can dominate the searcher's memory footprint. A
//! [`MemoryOptimizer`] flags a subset of cached entries whose bitsets are
//! dropped and recomputed on demand later: the entry's value and global
//! cardinality survive, so result selection stays exact while the long tail
//! of rarely-hit bitsets stops occupying memory.

use std::sync::Arc;

use crate::cache::{FieldCache, ValueBitset};

/// Selects cached value bitsets for eviction after a cache build.
///
/// Implementations are pure selection: no I/O, no mutation. The cache applies
/// the eviction to the flagged entries.
pub trait MemoryOptimizer: Send + Sync + 'static {
    /// Flags entries whose bitsets should be dropped, given every field cache
    /// built so far.
    fn select_for_eviction<'a>(&self, caches: &'a [Arc<FieldCache>]) -> Vec<&'a ValueBitset>;
}

/// Never evicts anything; favors speed over memory.
pub struct NoMemoryOptimizer;

impl MemoryOptimizer for NoMemoryOptimizer {
    fn select_for_eviction<'a>(&self, _caches: &'a [Arc<FieldCache>]) -> Vec<&'a ValueBitset> {
        Vec::new()
    }
}

/// Evicts the low-cardinality tail of every field's value list once the total
/// number of cached entries grows past a threshold.
///
/// The cut position is `total_count * keep_percent / 100`, where
/// `total_count` is the entry count across *all* cached fields; each field's
/// cardinality-sorted list is cut at that same position (entries at 0-based
/// indexes beyond it are flagged). The threshold is global because memory
/// pressure is, while the cut is applied per field in rank order so that
/// every field keeps its most frequent values.
pub struct RankBasedMemoryOptimizer {
    keep_percent: usize,
    trigger_threshold: usize,
}

impl RankBasedMemoryOptimizer {
    /// `keep_percent` of the global entry count survives in every field's
    /// list; eviction only happens at all once the global entry count reaches
    /// `trigger_threshold`.
    pub fn new(keep_percent: usize, trigger_threshold: usize) -> RankBasedMemoryOptimizer {
        RankBasedMemoryOptimizer {
            keep_percent,
            trigger_threshold,
        }
    }
}

impl MemoryOptimizer for RankBasedMemoryOptimizer {
    fn select_for_eviction<'a>(&self, caches: &'a [Arc<FieldCache>]) -> Vec<&'a ValueBitset> {
        let total_count: usize = caches.iter().map(|cache| cache.values().len()).sum();
        if total_count < self.trigger_threshold {
            return Vec::new();
        }
        let keep = total_count * self.keep_percent / 100;
        let mut flagged = Vec::new();
        for cache in caches {
            for (index, value) in cache.values().iter().enumerate() {
                if index > keep {
                    flagged.push(value);
                }
            }
        }
        flagged
    }
}
