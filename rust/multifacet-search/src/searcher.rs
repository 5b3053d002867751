//! Top-level faceted-search orchestration.

use std::sync::Arc;

use multifacet_common::Result;
use multifacet_index_core::{DocAddress, IndexReader, Query};

use crate::cache::FieldValueCache;
use crate::config::FacetSearcherConfig;
use crate::counter::FacetCounter;
use crate::drilldown::build_drilldown_query;
use crate::field_spec::{FacetFieldSpec, FacetMatch};

/// The document hits of a faceted search: the total number of matching
/// documents and the addresses of the first `top_results` of them, in
/// (segment, document) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHits {
    pub total: u64,
    pub docs: Vec<DocAddress>,
}

/// The combined outcome of [`FacetSearcher::search_with_facets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSearchResult {
    pub hits: SearchHits,
    pub facets: Vec<FacetMatch>,
}

/// Computes faceted counts with drill-down over one open index view.
///
/// A searcher owns the per-field value caches, so its lifetime is the cache
/// lifetime: construct one searcher per index view and share it across
/// request threads (`search_with_facets` takes `&self`). Reopening the index
/// means constructing a new searcher; nothing is invalidated in place.
pub struct FacetSearcher {
    reader: Arc<dyn IndexReader>,
    cache: FieldValueCache,
    config: FacetSearcherConfig,
}

impl FacetSearcher {
    /// Creates a searcher with the default configuration.
    pub fn new(reader: Arc<dyn IndexReader>) -> FacetSearcher {
        Self::with_config(reader, FacetSearcherConfig::default())
    }

    pub fn with_config(reader: Arc<dyn IndexReader>, config: FacetSearcherConfig) -> FacetSearcher {
        FacetSearcher {
            reader,
            cache: FieldValueCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &FacetSearcherConfig {
        &self.config
    }

    pub fn reader(&self) -> &Arc<dyn IndexReader> {
        &self.reader
    }

    /// Evaluates `base` restricted by every field selection for the document
    /// hit list, and computes each requested field's facet counts under the
    /// drill-down context that excludes the field's own selection.
    ///
    /// Returns the top `top_results` document addresses plus a flat list of
    /// `(field, value, count)` matches; zero-count matches are never
    /// included. The request runs to completion synchronously; timeout and
    /// cancellation belong to higher layers.
    pub fn search_with_facets(
        &self,
        base: &Query,
        top_results: usize,
        specs: &[FacetFieldSpec],
    ) -> Result<FacetSearchResult> {
        let hit_query = build_drilldown_query(base, specs, None);
        let hit_set = self.reader.evaluate(&hit_query)?;
        let hits = SearchHits {
            total: hit_set.cardinality(),
            docs: hit_set
                .iter_doc_ids()
                .take(top_results)
                .map(|(segment, doc_id)| DocAddress::new(segment as u32, doc_id as u32))
                .collect(),
        };

        let counter = FacetCounter::new(self.reader.as_ref(), &self.cache, &self.config);
        let mut facets = Vec::new();
        for spec in specs {
            facets.extend(counter.count(base, specs, spec)?);
        }
        facets.retain(|m| m.count > 0);

        Ok(FacetSearchResult { hits, facets })
    }
}
