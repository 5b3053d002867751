//! Drill-down query construction.

use multifacet_index_core::Query;

use crate::field_spec::FacetFieldSpec;

/// Combines the base query with every field selection except
/// `exclude_field`'s own.
///
/// A field's facet counts must answer "what would match if this field's
/// selection changed", so the field's own selection never participates in the
/// query used to count its values. Passing `exclude_field = None` applies all
/// selections: that query produces the request's final document hit list.
///
/// Each selected field contributes one required clause: an exact-match term
/// for a single selected value, or a disjunction of exact matches for
/// several. When no other field has selections the base query is returned
/// unchanged, avoiding needless wrapping.
pub fn build_drilldown_query(
    base: &Query,
    specs: &[FacetFieldSpec],
    exclude_field: Option<&str>,
) -> Query {
    let selected: Vec<&FacetFieldSpec> = specs
        .iter()
        .filter(|spec| {
            Some(spec.field_name.as_str()) != exclude_field && !spec.selected_values.is_empty()
        })
        .collect();
    if selected.is_empty() {
        return base.clone();
    }

    let mut clauses = Vec::with_capacity(selected.len() + 1);
    clauses.push(base.clone());
    for spec in selected {
        if spec.selected_values.len() == 1 {
            clauses.push(Query::term(&spec.field_name, &spec.selected_values[0]));
        } else {
            clauses.push(Query::or(
                spec.selected_values
                    .iter()
                    .map(|value| Query::term(&spec.field_name, value)),
            ));
        }
    }
    Query::And(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<FacetFieldSpec> {
        vec![
            FacetFieldSpec::new("color").with_selections(["yellow"]),
            FacetFieldSpec::new("type").with_selections(["fruit", "food"]),
            FacetFieldSpec::new("origin"),
        ]
    }

    #[test]
    fn test_no_selections_returns_base_unchanged() {
        let base = Query::term("keywords", "apa");
        let specs = vec![FacetFieldSpec::new("color"), FacetFieldSpec::new("type")];
        assert_eq!(build_drilldown_query(&base, &specs, None), base);
    }

    #[test]
    fn test_all_selections_applied_for_hit_list() {
        let base = Query::All;
        let query = build_drilldown_query(&base, &specs(), None);
        assert_eq!(
            query,
            Query::And(vec![
                Query::All,
                Query::term("color", "yellow"),
                Query::or([Query::term("type", "fruit"), Query::term("type", "food")]),
            ])
        );
    }

    #[test]
    fn test_target_field_selection_is_excluded() {
        let base = Query::All;
        let query = build_drilldown_query(&base, &specs(), Some("color"));
        assert_eq!(
            query,
            Query::And(vec![
                Query::All,
                Query::or([Query::term("type", "fruit"), Query::term("type", "food")]),
            ])
        );
    }

    #[test]
    fn test_excluding_the_only_selected_field_returns_base() {
        let base = Query::term("keywords", "apa");
        let specs = vec![
            FacetFieldSpec::new("color").with_selections(["yellow"]),
            FacetFieldSpec::new("type"),
        ];
        assert_eq!(build_drilldown_query(&base, &specs, Some("color")), base);
    }

    #[test]
    fn test_single_selection_uses_plain_term_clause() {
        let base = Query::All;
        let query = build_drilldown_query(&base, &specs(), Some("type"));
        assert_eq!(
            query,
            Query::And(vec![Query::All, Query::term("color", "yellow")])
        );
    }
}
