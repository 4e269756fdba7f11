//! Domain-specific assertion macros for miru harnesses.
//!
//! These add context-rich failure messages that make it clear *what*
//! pipeline invariant was violated and *which* records were involved.

// ---------------------------------------------------------------------------
// Result-sequence assertions
// ---------------------------------------------------------------------------

/// Assert that a result sequence contains exactly the given ids, in order.
///
/// ```rust
/// let results = filter::apply(&catalog, &map, &state);
/// assert_result_ids!(results, ["2", "1"]);
/// ```
#[macro_export]
macro_rules! assert_result_ids {
    ($results:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        if actual != expected {
            panic!(
                "assert_result_ids! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that every record in a result sequence is present in the
/// catalog — the engine must never fabricate records.
#[macro_export]
macro_rules! assert_subset_of_catalog {
    ($catalog:expr, $results:expr) => {{
        for result in $results.iter() {
            if $catalog.get(&result.id).is_none() {
                panic!(
                    "assert_subset_of_catalog! failed: result id {:?} not present in catalog.\n  Catalog ids: {:?}",
                    result.id,
                    $catalog.records().iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Expansion assertions
// ---------------------------------------------------------------------------

/// Assert that an expansion contains every expected term (superset check —
/// duplicates and extra terms from other matching keys are allowed).
#[macro_export]
macro_rules! assert_expands_over {
    ($map:expr, $query:expr, [$($term:expr),* $(,)?]) => {{
        let terms = $map.expand($query);
        $(
            if !terms.iter().any(|t| t == $term) {
                panic!(
                    "assert_expands_over! failed: expanding {:?} is missing {:?}.\n  Expansion: {:?}",
                    $query, $term, terms
                );
            }
        )*
    }};
}
