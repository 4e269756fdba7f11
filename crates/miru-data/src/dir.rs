//! Directory-backed data source — `images.json` and `keywords.json` under
//! a single data directory, the layout the repository ships in `data/`.

use crate::DataSource;
use std::io;
use std::path::{Path, PathBuf};

/// Reads the catalog and keyword documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    async fn read_images(&self) -> io::Result<String> {
        tokio::fs::read_to_string(self.root.join("images.json")).await
    }

    async fn read_keywords(&self) -> io::Result<String> {
        tokio::fs::read_to_string(self.root.join("keywords.json")).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
