//! Catalog — the full, immutable set of image records for the session.
//!
//! The catalog is the single source of truth; the UI reads from it, never
//! from the data source directly. [`Catalog::parse`] is deliberately
//! lenient at the record level: a malformed record is skipped and counted
//! rather than poisoning the whole document, so one bad entry never blanks
//! the gallery. The document root, however, must be a JSON object.

use crate::types::ImageRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document-level parse failure. Record-level failures are not errors;
/// they are skipped and reported via [`Catalog::skipped`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root is not an object")]
    NotAnObject,
    #[error("top-level {key:?} has the wrong shape (expected {expected})")]
    WrongShape {
        key: &'static str,
        expected: &'static str,
    },
}

/// The loaded catalog: an ordered, immutable sequence of [`ImageRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ImageRecord>,
    skipped: usize,
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// The root must be a JSON object. A missing `images` key is an empty
    /// catalog, not an error. Records that fail to deserialize (missing
    /// required field, unparseable `created_at`) are skipped individually;
    /// the count is available via [`skipped`](Self::skipped) so the UI can
    /// surface it.
    pub fn parse(doc: &str) -> Result<Catalog, ParseError> {
        let root: serde_json::Value = serde_json::from_str(doc)?;
        let obj = root.as_object().ok_or(ParseError::NotAnObject)?;

        let raw = match obj.get("images") {
            None => return Ok(Catalog::default()),
            Some(v) => v.as_array().ok_or(ParseError::WrongShape {
                key: "images",
                expected: "array",
            })?,
        };

        let mut records = Vec::with_capacity(raw.len());
        let mut skipped = 0;
        for value in raw {
            match serde_json::from_value::<ImageRecord>(value.clone()) {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }

        Ok(Catalog { records, skipped })
    }

    /// Build a catalog directly from records (tests, demos).
    pub fn from_records(records: Vec<ImageRecord>) -> Catalog {
        Catalog { records, skipped: 0 }
    }

    /// Records in document order.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Number of records rejected during [`parse`](Self::parse).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id. A miss is not an error — the detail view
    /// simply does not open.
    pub fn get(&self, id: &str) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Distinct model names in first-seen order — the option list for the
    /// model facet.
    pub fn model_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter_map(|r| seen.insert(r.model_name.as_str()).then_some(r.model_name.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Asset resolution
// ---------------------------------------------------------------------------

/// Where a record's image asset resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    /// The asset exists on disk at this path.
    File(PathBuf),
    /// The asset is missing or unreadable; render a placeholder instead.
    Placeholder,
}

/// Resolve a record's `filename` under the images directory. A missing
/// asset degrades to [`AssetRef::Placeholder`]; it never fails the render.
pub fn resolve_asset(images_dir: &Path, record: &ImageRecord) -> AssetRef {
    let path = images_dir.join(&record.filename);
    if path.is_file() {
        AssetRef::File(path)
    } else {
        AssetRef::Placeholder
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
