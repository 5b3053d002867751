//! Lazily built, concurrently shared per-field value bitsets.
//!
//! The first request that facets on a field pays for enumerating the field's
//! distinct values and materializing one document bitset per value; every
//! later request reuses the stored [`FieldCache`]. Builds are side-effect-free
//! reads of the index substrate, so concurrent callers racing on the same
//! field may each build independently — the losers' work is discarded and all
//! callers converge on the single stored instance. This trades a rare
//! duplicated build for an uncontended fast path.

use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use multifacet_bitset::SegmentedBitSet;
use multifacet_common::Result;
use multifacet_index_core::{FieldValuePostings, IndexReader};

use crate::config::FacetSearcherConfig;

/// The cached-or-evicted state of one value's document bitset.
#[derive(Clone)]
pub enum BitsetSlot {
    Present(Arc<SegmentedBitSet>),
    Evicted,
}

/// One distinct field value with its global document count and (possibly
/// evicted) document bitset.
///
/// `cardinality` is computed once at build time and survives eviction, so
/// result-selection thresholds stay exact without touching the substrate.
/// Eviction swaps the slot only; a reader holding an `Arc` to the bit data is
/// never invalidated mid-read.
pub struct ValueBitset {
    value: String,
    cardinality: u64,
    slot: RwLock<BitsetSlot>,
}

impl ValueBitset {
    pub(crate) fn new(value: String, cardinality: u64, bitset: SegmentedBitSet) -> ValueBitset {
        ValueBitset {
            value,
            cardinality,
            slot: RwLock::new(BitsetSlot::Present(Arc::new(bitset))),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Global document count of this value, deleted documents included.
    pub fn cardinality(&self) -> u64 {
        self.cardinality
    }

    /// Returns the cached bitset, or `None` if it has been evicted and must
    /// be recomputed from the substrate.
    pub fn bitset(&self) -> Option<Arc<SegmentedBitSet>> {
        match &*self.slot.read().expect("value bitset slot poisoned") {
            BitsetSlot::Present(bits) => Some(bits.clone()),
            BitsetSlot::Evicted => None,
        }
    }

    pub fn is_evicted(&self) -> bool {
        matches!(
            &*self.slot.read().expect("value bitset slot poisoned"),
            BitsetSlot::Evicted
        )
    }

    pub(crate) fn evict(&self) {
        *self.slot.write().expect("value bitset slot poisoned") = BitsetSlot::Evicted;
    }
}

/// All distinct values of one field, sorted by cardinality descending.
///
/// The ordering is fixed at build time and never re-sorted: the counting
/// scan's early termination relies on it.
pub struct FieldCache {
    field_name: String,
    values: Vec<ValueBitset>,
}

impl FieldCache {
    pub(crate) fn new(field_name: String, values: Vec<ValueBitset>) -> FieldCache {
        FieldCache { field_name, values }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn values(&self) -> &[ValueBitset] {
        &self.values
    }
}

/// Concurrent memoization table mapping field name to its built cache.
///
/// Owned by one searcher and scoped to one open index view; a reopened index
/// means a new searcher with a fresh cache.
#[derive(Default)]
pub struct FieldValueCache {
    caches: RwLock<AHashMap<String, Arc<FieldCache>>>,
}

impl FieldValueCache {
    pub fn new() -> FieldValueCache {
        FieldValueCache::default()
    }

    /// Returns the cache for `field`, building it on first reference.
    ///
    /// A field with no values (unknown fields included) yields an empty
    /// cache, not an error. After every completed build the configured memory
    /// optimizer runs over all stored caches and may evict entry bitsets.
    pub fn get_or_build(
        &self,
        field: &str,
        reader: &dyn IndexReader,
        config: &FacetSearcherConfig,
    ) -> Result<Arc<FieldCache>> {
        if let Some(cache) = self.caches.read().expect("field cache map poisoned").get(field) {
            return Ok(cache.clone());
        }

        let built = Arc::new(Self::build(field, reader, config)?);
        let stored = {
            let mut caches = self.caches.write().expect("field cache map poisoned");
            match caches.entry(field.to_string()) {
                // A concurrent build won the race; converge on its instance.
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => entry.insert(built).clone(),
            }
        };
        self.run_optimizer(config);
        Ok(stored)
    }

    /// Snapshot of every cache built so far.
    pub fn all(&self) -> Vec<Arc<FieldCache>> {
        self.caches
            .read()
            .expect("field cache map poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn build(
        field: &str,
        reader: &dyn IndexReader,
        config: &FacetSearcherConfig,
    ) -> Result<FieldCache> {
        let mut values = Vec::new();
        for postings in reader.enumerate_values(field)? {
            let FieldValuePostings { value, bitset } = postings?;
            let cardinality = bitset.cardinality();
            if cardinality < config.minimum_global_count {
                continue;
            }
            values.push(ValueBitset::new(value, cardinality, bitset));
        }
        // Stable sort: the substrate's deterministic enumeration order breaks
        // cardinality ties.
        values.sort_by(|a, b| b.cardinality.cmp(&a.cardinality));
        log::debug!(
            "built facet value cache for field '{field}' with {} values",
            values.len()
        );
        Ok(FieldCache::new(field.to_string(), values))
    }

    fn run_optimizer(&self, config: &FacetSearcherConfig) {
        let Some(optimizer) = config.memory_optimizer.as_ref() else {
            return;
        };
        let caches = self.all();
        let flagged = optimizer.select_for_eviction(&caches);
        if flagged.is_empty() {
            return;
        }
        log::debug!("evicting {} cached facet value bitsets", flagged.len());
        for value in flagged {
            value.evict();
        }
    }
}
