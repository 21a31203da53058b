use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RagError, Result};

/// File extensions picked up by directory ingestion.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "pdf"];

/// Find indexable documents under `root`, sorted by path.
///
/// A missing root yields an empty list.
pub fn discover_documents(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.exists() {
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        return Err(RagError::InvalidRoot(root.to_path_buf()));
    }

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.path().extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
                DOCUMENT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
            })
        })
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();

    files.sort();
    Ok(files)
}
