//! File-based content store: Markdown documents with YAML frontmatter
//!
//! Stands in for the host system's entity storage so the pipeline has real
//! items to run against.

mod frontmatter;

pub use frontmatter::Frontmatter;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{BallastError, Result};

/// One parsed content document.
#[derive(Debug, Clone)]
pub struct ContentDoc {
    pub path: PathBuf,
    pub front: Frontmatter,
    pub body: String,
}

/// Directory of Markdown content documents.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Open an existing content directory.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(BallastError::not_found("content directory", root.display()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All parseable documents, ordered by path. Files that fail to parse
    /// are logged and skipped; a duplicated id keeps the first document.
    pub fn documents(&self) -> Result<Vec<ContentDoc>> {
        let start = std::time::Instant::now();
        let mut docs: Vec<ContentDoc> = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "md") {
                continue;
            }
            let content = fs::read_to_string(path)?;
            match frontmatter::parse_document(path, &content) {
                Ok((front, body)) => {
                    if docs.iter().any(|d| d.front.id == front.id) {
                        warn!(
                            path = %path.display(),
                            id = %front.id,
                            "duplicate document id, skipping"
                        );
                        continue;
                    }
                    docs.push(ContentDoc {
                        path: path.to_path_buf(),
                        front,
                        body,
                    });
                }
                Err(e) => {
                    // Log but continue - don't fail the scan on one bad file
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to parse document, skipping"
                    );
                }
            }
        }

        crate::trace_time!(start, "scan_content_store", docs = docs.len());
        Ok(docs)
    }
}
