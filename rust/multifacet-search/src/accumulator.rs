//! Bounded top-K collection of facet matches for one field.

use crate::field_spec::{FacetFieldSpec, FacetMatch};

/// Collects matches for one field's counting scan: selected values are kept
/// unconditionally, non-selected values compete for `max_non_selected` slots
/// under an exact minimum-count threshold.
///
/// The capacity is a soft bound. A match tied with the current minimum is
/// admitted even at capacity (transient overshoot); the tied tail is evicted
/// when a later, strictly better match needs the room. A strictly better
/// match whose tied-tail eviction would leave the list underfull is dropped
/// instead: ties break in favor of entries already admitted.
pub(crate) struct ResultAccumulator<'a> {
    spec: &'a FacetFieldSpec,
    selected: Vec<FacetMatch>,
    non_selected: Vec<FacetMatch>,
    min_count_for_non_selected: u64,
    unresolved_selections: usize,
}

impl<'a> ResultAccumulator<'a> {
    pub fn new(spec: &'a FacetFieldSpec) -> ResultAccumulator<'a> {
        ResultAccumulator {
            spec,
            selected: Vec::new(),
            non_selected: Vec::new(),
            min_count_for_non_selected: 0,
            unresolved_selections: spec.selected_values.len(),
        }
    }

    /// True while `value` is one of the field's selections that has not been
    /// resolved yet. Once every selection has been seen, the membership test
    /// is skipped entirely.
    pub fn is_selected(&self, value: &str) -> bool {
        self.unresolved_selections > 0
            && self.spec.selected_values.iter().any(|selected| selected == value)
    }

    /// The count a non-selected match has to reach to be worth admitting.
    pub fn min_count_for_non_selected(&self) -> u64 {
        self.min_count_for_non_selected
    }

    /// True once every selection is resolved and the non-selected list is
    /// full: no later value of lower global cardinality can change the
    /// result.
    pub fn has_enough_results(&self) -> bool {
        self.unresolved_selections == 0 && self.non_selected.len() >= self.spec.max_non_selected
    }

    pub fn add_selected(&mut self, m: FacetMatch) {
        self.selected.push(m);
        self.unresolved_selections -= 1;
    }

    pub fn add_non_selected(&mut self, m: FacetMatch) {
        if self.non_selected.len() >= self.spec.max_non_selected {
            if m.count < self.min_count_for_non_selected {
                return;
            }
            if m.count > self.min_count_for_non_selected {
                let tied = self
                    .non_selected
                    .iter()
                    .filter(|held| held.count == self.min_count_for_non_selected)
                    .count();
                if self.non_selected.len() - tied + 1 >= self.spec.max_non_selected {
                    let min = self.min_count_for_non_selected;
                    self.non_selected.retain(|held| held.count != min);
                    self.min_count_for_non_selected = self
                        .non_selected
                        .iter()
                        .map(|held| held.count)
                        .min()
                        .unwrap_or(0);
                } else {
                    // Evicting the tied tail would underfill the list; the
                    // already-admitted entries win.
                    return;
                }
            }
            // A match tied with the minimum falls through and is appended.
        }

        self.min_count_for_non_selected = if self.min_count_for_non_selected == 0 {
            m.count
        } else {
            self.min_count_for_non_selected.min(m.count)
        };
        self.non_selected.push(m);
    }

    /// Selected then non-selected matches, ordered by count descending
    /// (stable within equal counts).
    pub fn into_matches(self) -> Vec<FacetMatch> {
        let mut matches = self.selected;
        matches.extend(self.non_selected);
        matches.sort_by(|a, b| b.count.cmp(&a.count));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(max_non_selected: usize, selections: &[&str]) -> FacetFieldSpec {
        FacetFieldSpec::new("type")
            .with_selections(selections.iter().copied())
            .with_max_non_selected(max_non_selected)
    }

    fn m(value: &str, count: u64) -> FacetMatch {
        FacetMatch {
            field_name: "type".to_string(),
            value: value.to_string(),
            count,
        }
    }

    fn counts(acc: ResultAccumulator<'_>) -> Vec<u64> {
        acc.into_matches().into_iter().map(|m| m.count).collect()
    }

    #[test]
    fn test_fills_up_to_capacity_and_tracks_minimum() {
        let spec = spec(3, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 7));
        assert_eq!(acc.min_count_for_non_selected(), 7);
        acc.add_non_selected(m("b", 3));
        acc.add_non_selected(m("c", 5));
        assert_eq!(acc.min_count_for_non_selected(), 3);
        assert!(acc.has_enough_results());
        assert_eq!(counts(acc), vec![7, 5, 3]);
    }

    #[test]
    fn test_below_minimum_is_discarded_at_capacity() {
        let spec = spec(2, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 7));
        acc.add_non_selected(m("b", 5));
        acc.add_non_selected(m("c", 4));
        assert_eq!(counts(acc), vec![7, 5]);
    }

    #[test]
    fn test_better_match_evicts_the_tied_tail() {
        let spec = spec(2, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 3));
        acc.add_non_selected(m("b", 5));
        acc.add_non_selected(m("c", 3)); // tied with the minimum: overshoot to 3
        acc.add_non_selected(m("d", 6)); // evicts both 3s, admits 6
        assert_eq!(acc.min_count_for_non_selected(), 5);
        assert_eq!(counts(acc), vec![6, 5]);
    }

    #[test]
    fn test_tied_match_overshoots_capacity() {
        // The documented bound: ties with the minimum are admitted beyond
        // capacity and only trimmed by the next strictly better insert.
        let spec = spec(2, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 4));
        acc.add_non_selected(m("b", 4));
        acc.add_non_selected(m("c", 4));
        acc.add_non_selected(m("d", 4));
        assert_eq!(counts(acc), vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_underfilling_eviction_keeps_admitted_entries() {
        let spec = spec(3, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 9));
        acc.add_non_selected(m("b", 2));
        acc.add_non_selected(m("c", 2));
        // Evicting the two 2s would leave 2 entries < capacity 3: the tied
        // tail survives and the 5 is dropped.
        acc.add_non_selected(m("d", 5));
        assert_eq!(counts(acc), vec![9, 2, 2]);
    }

    #[test]
    fn test_eviction_of_the_whole_list_resets_the_minimum() {
        let spec = spec(1, &[]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("a", 2));
        acc.add_non_selected(m("b", 6));
        assert_eq!(acc.min_count_for_non_selected(), 6);
        assert_eq!(counts(acc), vec![6]);
    }

    #[test]
    fn test_selected_matches_bypass_the_capacity_bound() {
        let spec = spec(1, &["fruit", "meat"]);
        let mut acc = ResultAccumulator::new(&spec);
        assert!(acc.is_selected("fruit"));
        assert!(!acc.is_selected("drink"));

        acc.add_selected(m("fruit", 1));
        acc.add_non_selected(m("drink", 8));
        assert!(!acc.has_enough_results());

        acc.add_selected(m("meat", 1));
        assert!(acc.has_enough_results());
        // Once every selection is resolved the membership test short-circuits.
        assert!(!acc.is_selected("fruit"));

        assert_eq!(counts(acc), vec![8, 1, 1]);
    }

    #[test]
    fn test_final_order_is_count_descending_and_stable() {
        let spec = spec(5, &["meat"]);
        let mut acc = ResultAccumulator::new(&spec);
        acc.add_non_selected(m("food", 3));
        acc.add_selected(m("meat", 2));
        acc.add_non_selected(m("fruit", 2));
        acc.add_non_selected(m("drink", 4));
        let matches = acc.into_matches();
        let values: Vec<&str> = matches.iter().map(|m| m.value.as_str()).collect();
        // Selected entries precede non-selected ones within an equal count.
        assert_eq!(values, vec!["drink", "food", "meat", "fruit"]);
    }
}
