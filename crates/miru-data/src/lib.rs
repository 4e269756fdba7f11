//! miru-data — data source adapters for miru.
//!
//! A [`DataSource`] yields the two raw documents (catalog + keyword map);
//! [`load`] fetches both concurrently and hands them to miru-core for
//! parsing. This is the one asynchronous operation in the system: it runs
//! once at startup, settles before the UI starts, and is never retried.

use miru_core::{Catalog, KeywordMap, ParseError};
use std::future::Future;
use std::io;
use thiserror::Error;

pub mod dir;

pub use dir::DirSource;

/// Why the startup load failed. Recovered by starting with an empty
/// catalog and map plus a transient notification — never fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source unreachable: {0}")]
    Io(#[from] io::Error),
    #[error("malformed document: {0}")]
    Parse(#[from] ParseError),
}

/// A source of the two raw documents.
///
/// Implementations do IO only; all parsing stays in miru-core.
pub trait DataSource {
    fn read_images(&self) -> impl Future<Output = io::Result<String>> + Send;
    fn read_keywords(&self) -> impl Future<Output = io::Result<String>> + Send;
}

/// Fetch and parse both documents. The reads run concurrently; either
/// failing fails the whole load (no partial application state).
pub async fn load<S: DataSource>(source: &S) -> Result<(Catalog, KeywordMap), LoadError> {
    let (images_doc, keywords_doc) =
        tokio::try_join!(source.read_images(), source.read_keywords())?;

    let catalog = Catalog::parse(&images_doc)?;
    let keywords = KeywordMap::parse(&keywords_doc)?;

    tracing::info!(
        records = catalog.len(),
        skipped = catalog.skipped(),
        keywords = keywords.len(),
        "catalog loaded"
    );

    Ok((catalog, keywords))
}
