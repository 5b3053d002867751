//! Per-request facet field descriptions and match results.

/// Describes one field to facet on within a search request: which values the
/// caller has already selected (drill-down), and how many non-selected values
/// to return at most.
///
/// One instance per field per request; immutable once constructed. The order
/// of `selected_values` is preserved into the drill-down query but has no
/// effect on counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetFieldSpec {
    pub field_name: String,
    pub selected_values: Vec<String>,
    pub max_non_selected: usize,
}

impl FacetFieldSpec {
    /// Default cap on returned non-selected values per field.
    pub const DEFAULT_MAX_NON_SELECTED: usize = 20;

    /// Creates a spec for `field_name` with no selections and the default
    /// non-selected cap.
    pub fn new(field_name: impl Into<String>) -> FacetFieldSpec {
        FacetFieldSpec {
            field_name: field_name.into(),
            selected_values: Vec::new(),
            max_non_selected: Self::DEFAULT_MAX_NON_SELECTED,
        }
    }

    /// Sets the drilled-down (selected) values of this field.
    pub fn with_selections<S: Into<String>>(
        mut self,
        values: impl IntoIterator<Item = S>,
    ) -> FacetFieldSpec {
        self.selected_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the cap on returned non-selected values.
    pub fn with_max_non_selected(mut self, max_non_selected: usize) -> FacetFieldSpec {
        self.max_non_selected = max_non_selected;
        self
    }
}

/// One facet count: how many documents of the current drill-down context
/// carry `value` in `field_name`. Counts are always derived from a concrete
/// bitset intersection and are never zero in engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetMatch {
    pub field_name: String,
    pub value: String,
    pub count: u64,
}
