//! Core types for miru-core.
//!
//! This module defines the fundamental data structures shared across all
//! architectural layers: the immutable [`ImageRecord`], its generation
//! [`GenParams`], and the transient [`FilterState`] with its [`SortKey`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog entry describing one generated image.
///
/// Records are parsed once at startup and never mutated afterwards. All
/// but a handful of descriptive fields are required; records that fail to
/// deserialize are rejected at load (see [`Catalog::parse`](crate::catalog::Catalog::parse)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Relative path to the asset under the images directory.
    pub filename: String,
    pub title: String,
    /// English generation prompt.
    pub prompt: String,
    /// Negative prompt; absent in the source document means empty.
    #[serde(default)]
    pub negative_prompt: String,
    pub model_name: String,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub base_resolution: Option<String>,
    /// Short Japanese labels; insertion order is display order, duplicates
    /// allowed.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Parsed from a date string: RFC 3339, `%Y-%m-%d %H:%M:%S`, or a bare
    /// `%Y-%m-%d` (midnight UTC).
    #[serde(deserialize_with = "de_created_at")]
    pub created_at: DateTime<Utc>,
    /// Generation metadata, required for the detail view.
    pub parameters: GenParams,
}

/// Fixed-shape generation parameters attached to every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    pub steps: u32,
    pub cfg_scale: f32,
    pub seed: i64,
    pub sampler: String,
}

/// Sort order for the result sequence.
///
/// A missing/unknown key sorts nothing (catalog order), which is why the
/// engine takes `Option<SortKey>` rather than a fourth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Descending by `created_at` (most recent first).
    Newest,
    /// Ascending by `created_at`.
    Oldest,
    /// Ascending by case-folded title.
    Title,
}

impl SortKey {
    /// Parse a sort key from its wire/config spelling. Unknown spellings
    /// yield `None` — catalog order, not an error.
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            "title" => Some(SortKey::Title),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Newest => write!(f, "newest"),
            SortKey::Oldest => write!(f, "oldest"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

/// The transient filter state owned by the presentation adapter.
///
/// One instance, single writer; the engine treats it as an immutable
/// snapshot per call.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Raw search text as typed. Trimming and lower-casing happen inside
    /// the engine, once per application.
    pub query: String,
    /// Exact-match model-name facet; `None` means all models.
    pub model: Option<String>,
    /// `None` leaves the filtered sequence in catalog order.
    pub sort: Option<SortKey>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            model: None,
            sort: Some(SortKey::Newest),
        }
    }
}

// ---------------------------------------------------------------------------
// created_at parsing
// ---------------------------------------------------------------------------

/// Parse a catalog date string. Accepts RFC 3339, a space-separated
/// datetime, or a bare date (midnight UTC).
pub fn parse_created_at(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

fn de_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_created_at(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unparseable created_at: {s:?}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_accepts_bare_date() {
        let dt = parse_created_at("2024-01-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn created_at_accepts_rfc3339() {
        assert!(parse_created_at("2024-03-15T09:30:00Z").is_some());
        assert!(parse_created_at("2024-03-15T09:30:00+09:00").is_some());
    }

    #[test]
    fn created_at_accepts_space_separated() {
        assert!(parse_created_at("2024-03-15 09:30:00").is_some());
    }

    #[test]
    fn created_at_rejects_garbage() {
        assert_eq!(parse_created_at("not a date"), None);
        assert_eq!(parse_created_at(""), None);
    }

    #[test]
    fn sort_key_parse_round_trips() {
        for key in [SortKey::Newest, SortKey::Oldest, SortKey::Title] {
            assert_eq!(SortKey::parse(&key.to_string()), Some(key));
        }
        assert_eq!(SortKey::parse("relevance"), None);
    }

    #[test]
    fn record_deserializes_with_optional_fields_missing() {
        let record: ImageRecord = serde_json::from_str(
            r#"{
                "id": "1",
                "filename": "a.png",
                "title": "Sunset",
                "prompt": "a cat on beach",
                "model_name": "ModelA",
                "created_at": "2024-01-01",
                "parameters": {"steps": 28, "cfg_scale": 7.0, "seed": 42, "sampler": "Euler a"}
            }"#,
        )
        .unwrap();
        assert_eq!(record.negative_prompt, "");
        assert!(record.tags.is_empty());
        assert_eq!(record.architecture, None);
    }
}
