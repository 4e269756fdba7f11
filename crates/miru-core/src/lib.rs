//! miru-core — catalog, keyword expansion, and the filter-sort pipeline.
//!
//! This crate owns everything with actual semantics; the data and TUI
//! crates are adapters around it.
//!
//! # Architecture
//!
//! ```text
//! DataSource ──► Catalog + KeywordMap ──► Filter-Sort Engine ──► UI
//! ```
//!
//! The catalog and keyword map are loaded once at startup and immutable
//! afterwards. Every user input re-invokes [`filter::apply`] synchronously
//! against the full catalog; there is no incremental filtering.

pub mod catalog;
pub mod config;
pub mod expand;
pub mod filter;
pub mod types;

pub use catalog::{resolve_asset, AssetRef, Catalog, ParseError};
pub use expand::KeywordMap;
pub use types::{FilterState, GenParams, ImageRecord, SortKey};
