//! Filter-sort engine — the pure pipeline from catalog + filter state to
//! the ordered result sequence.
//!
//! [`apply`] is a pure function of its inputs: no mutation of the catalog,
//! no hidden state, identical inputs give identical output sequences. The
//! predicate short-circuits on the model facet before doing any string
//! work, and the query is trimmed and lower-cased exactly once per call.

use crate::catalog::Catalog;
use crate::expand::KeywordMap;
use crate::types::{FilterState, ImageRecord, SortKey};

/// Apply the filter state to the catalog, returning record references in
/// result order.
pub fn apply<'a>(
    catalog: &'a Catalog,
    map: &KeywordMap,
    state: &FilterState,
) -> Vec<&'a ImageRecord> {
    let records = catalog.records();
    apply_indices(catalog, map, state)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// [`apply`], but returning indices into `catalog.records()`. The UI keeps
/// indices so the result sequence never borrows the catalog it lives next
/// to.
pub fn apply_indices(catalog: &Catalog, map: &KeywordMap, state: &FilterState) -> Vec<usize> {
    let records = catalog.records();

    let needle = state.query.trim().to_lowercase();
    let terms = if needle.is_empty() {
        Vec::new()
    } else {
        map.expand(&needle)
    };

    let mut result: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, state.model.as_deref(), &needle, &terms))
        .map(|(i, _)| i)
        .collect();

    if let Some(key) = state.sort {
        sort_indices(records, &mut result, key);
    }

    result
}

/// The per-record predicate: facet AND query, with the query clause an OR
/// over tags, expanded prompt terms, and title.
fn matches(record: &ImageRecord, model: Option<&str>, needle: &str, terms: &[String]) -> bool {
    if let Some(model) = model {
        if record.model_name != model {
            return false;
        }
    }

    if needle.is_empty() {
        return true;
    }

    // (a) Japanese tags, matched against the raw lowered query
    if record
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(needle))
    {
        return true;
    }

    // (b) expanded English terms against prompt / negative prompt
    let prompt = record.prompt.to_lowercase();
    let negative = record.negative_prompt.to_lowercase();
    if terms.iter().any(|term| {
        let term = term.to_lowercase();
        prompt.contains(&term) || negative.contains(&term)
    }) {
        return true;
    }

    // (c) title
    record.title.to_lowercase().contains(needle)
}

/// Sort filtered indices in place. `sort_by_cached_key` is stable, so
/// records with equal keys keep their original catalog order.
fn sort_indices(records: &[ImageRecord], indices: &mut [usize], key: SortKey) {
    match key {
        SortKey::Newest => {
            indices.sort_by_cached_key(|&i| std::cmp::Reverse(records[i].created_at));
        }
        SortKey::Oldest => {
            indices.sort_by_cached_key(|&i| records[i].created_at);
        }
        SortKey::Title => {
            indices.sort_by_cached_key(|&i| records[i].title.to_lowercase());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenParams;
    use chrono::TimeZone;

    fn record(id: &str, title: &str, model: &str, tags: &[&str], prompt: &str, day: u32) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            filename: format!("{id}.png"),
            title: title.to_string(),
            prompt: prompt.to_string(),
            negative_prompt: String::new(),
            model_name: model.to_string(),
            architecture: None,
            specialty: None,
            base_resolution: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            parameters: GenParams {
                steps: 28,
                cfg_scale: 7.0,
                seed: 1,
                sampler: "Euler a".to_string(),
            },
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record("1", "Sunset", "ModelA", &["猫"], "a cat on beach", 1),
            record("2", "Forest", "ModelB", &["犬"], "a dog in woods", 2),
            record("3", "Moonrise", "ModelA", &["夜"], "city skyline at night", 3),
        ])
    }

    fn ids(result: &[&ImageRecord]) -> Vec<String> {
        result.iter().map(|r| r.id.clone()).collect()
    }

    fn state(query: &str, model: Option<&str>, sort: Option<SortKey>) -> FilterState {
        FilterState {
            query: query.to_string(),
            model: model.map(str::to_string),
            sort,
        }
    }

    #[test]
    fn empty_query_and_facet_passes_everything() {
        let c = catalog();
        let result = apply(&c, &KeywordMap::default(), &state("", None, None));
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn facet_is_exact_and_case_sensitive() {
        let c = catalog();
        let map = KeywordMap::default();
        assert_eq!(
            ids(&apply(&c, &map, &state("", Some("ModelA"), None))),
            vec!["1", "3"]
        );
        assert!(apply(&c, &map, &state("", Some("modela"), None)).is_empty());
    }

    #[test]
    fn query_matches_tag_substring() {
        let c = catalog();
        let result = apply(&c, &KeywordMap::default(), &state("猫", None, None));
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn query_matches_prompt_via_expansion() {
        let c = catalog();
        let map = KeywordMap::from_entries(vec![(
            "犬".to_string(),
            vec!["dog".to_string()],
        )]);
        // Record 2 has tag 犬 *and* "dog" in the prompt; drop the tag match
        // by querying a key that only the map knows.
        let c2 = Catalog::from_records(vec![record(
            "4",
            "Pup",
            "ModelB",
            &[],
            "a dog in woods",
            4,
        )]);
        assert_eq!(ids(&apply(&c2, &map, &state("犬", None, None))), vec!["4"]);
        assert_eq!(ids(&apply(&c, &map, &state("犬", None, None))), vec!["2"]);
    }

    #[test]
    fn query_matches_negative_prompt() {
        let mut r = record("5", "Plain", "ModelA", &[], "a field", 5);
        r.negative_prompt = "blurry, low quality".to_string();
        let c = Catalog::from_records(vec![r]);
        let result = apply(&c, &KeywordMap::default(), &state("blurry", None, None));
        assert_eq!(ids(&result), vec!["5"]);
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let c = catalog();
        let result = apply(&c, &KeywordMap::default(), &state("  SUNSET ", None, None));
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn facet_and_query_are_anded() {
        let c = catalog();
        let map = KeywordMap::default();
        // "moonrise" matches record 3 by title; facet ModelB excludes it.
        assert!(apply(&c, &map, &state("moonrise", Some("ModelB"), None)).is_empty());
        assert_eq!(
            ids(&apply(&c, &map, &state("moonrise", Some("ModelA"), None))),
            vec!["3"]
        );
    }

    #[test]
    fn sort_orders() {
        let c = catalog();
        let map = KeywordMap::default();
        assert_eq!(
            ids(&apply(&c, &map, &state("", None, Some(SortKey::Newest)))),
            vec!["3", "2", "1"]
        );
        assert_eq!(
            ids(&apply(&c, &map, &state("", None, Some(SortKey::Oldest)))),
            vec!["1", "2", "3"]
        );
        assert_eq!(
            ids(&apply(&c, &map, &state("", None, Some(SortKey::Title)))),
            vec!["2", "3", "1"]
        );
    }

    #[test]
    fn equal_timestamps_keep_catalog_order() {
        let c = Catalog::from_records(vec![
            record("a", "A", "M", &[], "p", 1),
            record("b", "B", "M", &[], "p", 1),
            record("c", "C", "M", &[], "p", 1),
        ]);
        let map = KeywordMap::default();
        assert_eq!(
            ids(&apply(&c, &map, &state("", None, Some(SortKey::Newest)))),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            ids(&apply(&c, &map, &state("", None, Some(SortKey::Oldest)))),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn apply_is_idempotent() {
        let c = catalog();
        let map = KeywordMap::from_entries(vec![(
            "猫".to_string(),
            vec!["cat".to_string()],
        )]);
        let s = state("猫", None, Some(SortKey::Newest));
        let first = ids(&apply(&c, &map, &s));
        let second = ids(&apply(&c, &map, &s));
        assert_eq!(first, second);
    }
}
