//! Searcher configuration.

use std::sync::Arc;

use crate::optimizer::MemoryOptimizer;

/// Configuration of a [`FacetSearcher`](crate::searcher::FacetSearcher).
///
/// The defaults match the common case: every value with at least one document
/// is eligible for the field cache, and no cached bitset is ever evicted.
#[derive(Clone)]
pub struct FacetSearcherConfig {
    /// Values whose global document count is below this threshold never enter
    /// a field cache (and therefore never appear in facet results).
    pub minimum_global_count: u64,

    /// Optional policy that trades memory for CPU by evicting low-value
    /// cached bitsets after cache builds. `None` keeps everything.
    pub memory_optimizer: Option<Arc<dyn MemoryOptimizer>>,
}

impl FacetSearcherConfig {
    pub fn with_minimum_global_count(mut self, minimum_global_count: u64) -> FacetSearcherConfig {
        self.minimum_global_count = minimum_global_count;
        self
    }

    pub fn with_memory_optimizer(
        mut self,
        optimizer: Arc<dyn MemoryOptimizer>,
    ) -> FacetSearcherConfig {
        self.memory_optimizer = Some(optimizer);
        self
    }
}

impl Default for FacetSearcherConfig {
    fn default() -> FacetSearcherConfig {
        FacetSearcherConfig {
            minimum_global_count: 1,
            memory_optimizer: None,
        }
    }
}
