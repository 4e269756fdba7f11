//! Keyword expansion — the bilingual bridge between Japanese search text
//! and English prompt vocabulary.
//!
//! The mapping table is a flat list of (Japanese key, English terms)
//! entries loaded once at startup. [`KeywordMap::expand`] does a linear
//! scan over every key per call — O(keys × avg key length) — which is fine
//! for a table of this size as long as the caller debounces keystrokes.

use crate::catalog::ParseError;

/// The loaded keyword-mapping table. Keys are substrings to be matched
/// against a query, not exact tokens. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct KeywordMap {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordMap {
    /// Parse a keywords document.
    ///
    /// The root must be a JSON object. A missing `keywords` key is an
    /// empty map, not an error. Entries whose value is not an array of
    /// strings are skipped.
    pub fn parse(doc: &str) -> Result<KeywordMap, ParseError> {
        let root: serde_json::Value = serde_json::from_str(doc)?;
        let obj = root.as_object().ok_or(ParseError::NotAnObject)?;

        let raw = match obj.get("keywords") {
            None => return Ok(KeywordMap::default()),
            Some(v) => v.as_object().ok_or(ParseError::WrongShape {
                key: "keywords",
                expected: "object",
            })?,
        };

        let entries = raw
            .iter()
            .filter_map(|(key, value)| {
                let terms: Vec<String> = value
                    .as_array()?
                    .iter()
                    .map(|t| t.as_str().map(str::to_string))
                    .collect::<Option<_>>()?;
                Some((key.clone(), terms))
            })
            .collect();

        Ok(KeywordMap { entries })
    }

    /// Build a map directly from entries (tests, demos).
    pub fn from_entries(entries: Vec<(String, Vec<String>)>) -> KeywordMap {
        KeywordMap { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand a query into the English terms to match against prompts.
    ///
    /// Every entry whose key occurs in `query` as a case-sensitive
    /// substring contributes all of its terms; multiple matching keys are
    /// unioned and duplicates are kept (harmless for the OR-match that
    /// follows). When nothing matches, the raw query itself is the single
    /// term, so plain English substring search works without a mapping
    /// entry.
    pub fn expand(&self, query: &str) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for (key, english) in &self.entries {
            if query.contains(key.as_str()) {
                terms.extend(english.iter().cloned());
            }
        }
        if terms.is_empty() {
            terms.push(query.to_string());
        }
        terms
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> KeywordMap {
        KeywordMap::from_entries(vec![
            ("猫".to_string(), vec!["cat".to_string(), "kitten".to_string()]),
            ("犬".to_string(), vec!["dog".to_string()]),
            ("黒猫".to_string(), vec!["black cat".to_string()]),
        ])
    }

    #[test]
    fn unmatched_query_falls_back_to_itself() {
        assert_eq!(KeywordMap::default().expand("xyz123"), vec!["xyz123"]);
        assert_eq!(map().expand("sunset"), vec!["sunset"]);
    }

    #[test]
    fn matching_key_contributes_all_terms() {
        assert_eq!(map().expand("猫"), vec!["cat", "kitten"]);
    }

    #[test]
    fn multiple_keys_union() {
        let terms = map().expand("猫と犬");
        for expected in ["cat", "kitten", "dog"] {
            assert!(terms.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn overlapping_keys_both_match_and_duplicates_survive() {
        // "黒猫" contains both the "猫" key and the "黒猫" key.
        let terms = map().expand("黒猫");
        assert_eq!(terms, vec!["cat", "kitten", "black cat"]);

        let dup = KeywordMap::from_entries(vec![
            ("猫".to_string(), vec!["cat".to_string()]),
            ("子猫".to_string(), vec!["cat".to_string()]),
        ]);
        assert_eq!(dup.expand("子猫"), vec!["cat", "cat"]);
    }

    #[test]
    fn key_matching_is_case_sensitive() {
        let map = KeywordMap::from_entries(vec![(
            "Cat".to_string(),
            vec!["feline".to_string()],
        )]);
        // The caller lower-cases queries; an upper-cased key can then never
        // match, and the query falls through as its own term.
        assert_eq!(map.expand("cat"), vec!["cat"]);
        assert_eq!(map.expand("Cat"), vec!["feline"]);
    }

    #[test]
    fn parse_missing_key_is_empty() {
        assert!(KeywordMap::parse("{}").unwrap().is_empty());
    }

    #[test]
    fn parse_skips_wrong_shaped_entries() {
        let map = KeywordMap::parse(
            r#"{"keywords": {"猫": ["cat"], "bad": "not-an-array", "worse": [1, 2]}}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.expand("猫"), vec!["cat"]);
    }

    #[test]
    fn parse_non_object_root_is_an_error() {
        assert!(KeywordMap::parse("[]").is_err());
    }
}
