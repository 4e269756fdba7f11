//! Test builders — ergonomic constructors for `ImageRecord`, `Catalog`,
//! and `KeywordMap` fixtures.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning
//! `Result`.

use miru_core::{Catalog, FilterState, GenParams, ImageRecord, KeywordMap, SortKey};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ImageRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("1", "Sunset")
///     .model("ModelA")
///     .tag("猫")
///     .prompt("a cat on beach")
///     .created("2024-01-01")
///     .build();
/// ```
pub struct RecordBuilder {
    record: ImageRecord,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            record: ImageRecord {
                filename: format!("{id}.png"),
                id,
                title: title.into(),
                prompt: String::new(),
                negative_prompt: String::new(),
                model_name: "TestModel".to_string(),
                architecture: None,
                specialty: None,
                base_resolution: None,
                tags: Vec::new(),
                created_at: parse_date("2024-01-01"),
                parameters: GenParams {
                    steps: 28,
                    cfg_scale: 7.0,
                    seed: 1,
                    sampler: "Euler a".to_string(),
                },
            },
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.record.model_name = model.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.record.prompt = prompt.into();
        self
    }

    pub fn negative(mut self, negative: impl Into<String>) -> Self {
        self.record.negative_prompt = negative.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.record.tags.push(tag.into());
        self
    }

    /// Set `created_at` from a date string (`%Y-%m-%d` or RFC 3339).
    /// Panics on an unparseable date — fixtures must be valid.
    pub fn created(mut self, date: &str) -> Self {
        self.record.created_at = parse_date(date);
        self
    }

    pub fn build(self) -> ImageRecord {
        self.record
    }
}

fn parse_date(s: &str) -> chrono::DateTime<chrono::Utc> {
    miru_core::types::parse_created_at(s)
        .unwrap_or_else(|| panic!("test fixture date must parse: {s:?}"))
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build a record with the fields the filter predicate cares about.
pub fn record(id: &str, title: &str, model: &str, tags: &[&str], prompt: &str, date: &str) -> ImageRecord {
    let mut builder = RecordBuilder::new(id, title)
        .model(model)
        .prompt(prompt)
        .created(date);
    for tag in tags {
        builder = builder.tag(*tag);
    }
    builder.build()
}

/// Wrap records into a catalog.
pub fn catalog_of(records: Vec<ImageRecord>) -> Catalog {
    Catalog::from_records(records)
}

/// Build a keyword map from borrowed entries.
pub fn keyword_map(entries: &[(&str, &[&str])]) -> KeywordMap {
    KeywordMap::from_entries(
        entries
            .iter()
            .map(|(key, terms)| {
                (
                    key.to_string(),
                    terms.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect(),
    )
}

/// Build a filter state without the `Default` sort getting in the way.
pub fn filter_state(query: &str, model: Option<&str>, sort: Option<SortKey>) -> FilterState {
    FilterState {
        query: query.to_string(),
        model: model.map(str::to_string),
        sort,
    }
}
