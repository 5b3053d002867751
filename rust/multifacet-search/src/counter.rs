//! Per-field facet counting over the cached value lists.

use multifacet_common::Result;
use multifacet_index_core::{IndexReader, Query};

use crate::accumulator::ResultAccumulator;
use crate::cache::FieldValueCache;
use crate::config::FacetSearcherConfig;
use crate::drilldown::build_drilldown_query;
use crate::field_spec::{FacetFieldSpec, FacetMatch};

/// Counts one field's facet values against the current drill-down context.
///
/// The scan walks the field's cached value list in its fixed
/// cardinality-descending order and intersects each value's bitset with the
/// drill-down document set. Because a value's drill-down count can never
/// exceed its global cardinality, the scan stops as soon as every remaining
/// value's cardinality is below the accumulator's admission threshold and
/// enough results are held — an exact short-circuit, not an approximation.
pub(crate) struct FacetCounter<'a> {
    reader: &'a dyn IndexReader,
    cache: &'a FieldValueCache,
    config: &'a FacetSearcherConfig,
}

impl<'a> FacetCounter<'a> {
    pub fn new(
        reader: &'a dyn IndexReader,
        cache: &'a FieldValueCache,
        config: &'a FacetSearcherConfig,
    ) -> FacetCounter<'a> {
        FacetCounter {
            reader,
            cache,
            config,
        }
    }

    /// Produces the matches for `target`, with early termination enabled.
    pub fn count(
        &self,
        base: &Query,
        specs: &[FacetFieldSpec],
        target: &FacetFieldSpec,
    ) -> Result<Vec<FacetMatch>> {
        self.count_with_scan_mode(base, specs, target, false)
    }

    /// `scan_all` disables the early exit and walks the entire value list;
    /// both modes must produce identical results.
    pub fn count_with_scan_mode(
        &self,
        base: &Query,
        specs: &[FacetFieldSpec],
        target: &FacetFieldSpec,
        scan_all: bool,
    ) -> Result<Vec<FacetMatch>> {
        let drilldown_query = build_drilldown_query(base, specs, Some(&target.field_name));
        let drilldown = self.reader.evaluate(&drilldown_query)?;
        let cache = self
            .cache
            .get_or_build(&target.field_name, self.reader, self.config)?;

        let mut accumulator = ResultAccumulator::new(target);
        for value in cache.values() {
            let is_selected = accumulator.is_selected(value.value());

            // No later value can beat the threshold: the list's cardinality
            // ordering bounds every remaining intersection count.
            if !scan_all
                && !is_selected
                && value.cardinality() < accumulator.min_count_for_non_selected()
                && accumulator.has_enough_results()
            {
                break;
            }

            let count = match value.bitset() {
                Some(bits) => drilldown.and_cardinality(&bits),
                None => {
                    // Evicted: recompute on demand, use once, drop.
                    let bits = self
                        .reader
                        .recompute_bitset(&target.field_name, value.value())?;
                    drilldown.and_cardinality(&bits)
                }
            };
            if count == 0 {
                continue;
            }

            let m = FacetMatch {
                field_name: target.field_name.clone(),
                value: value.value().to_string(),
                count,
            };
            if is_selected {
                accumulator.add_selected(m);
            } else {
                accumulator.add_non_selected(m);
            }
        }
        Ok(accumulator.into_matches())
    }
}
