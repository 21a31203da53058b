//! Document ingestion: content kinds, upload classification, and text normalization.
//!
//! Binary formats are never parsed. They are replaced with a labelled
//! placeholder so that callers can see the document was received but its
//! text is not searchable.

use std::path::Path;

use tracing::warn;

use crate::error::{RagError, Result};

/// MIME types that are indexed when uploaded.
pub const INDEXABLE_MIME_TYPES: &[&str] = &["text/plain", "text/markdown", "application/pdf"];

/// Raw content handed to the engine for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    /// Plain text, indexed after normalization.
    Text(String),
    /// A binary format without text extraction support.
    Binary {
        /// Human-readable format label, e.g. `"PDF"`.
        format: String,
        /// The raw bytes as received.
        bytes: Vec<u8>,
    },
}

impl DocumentContent {
    /// Wrap plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Wrap PDF bytes.
    pub fn pdf(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Binary { format: "PDF".to_string(), bytes: bytes.into() }
    }

    /// Classify an uploaded file.
    ///
    /// Returns `Ok(None)` for uploads that should not be indexed. A file is
    /// indexable when its MIME type is in [`INDEXABLE_MIME_TYPES`] or its
    /// lower-cased name mentions `"eop"`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::UnreadableContent`] if an indexable non-PDF upload
    /// is not valid UTF-8.
    pub fn from_upload(name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<Option<Self>> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        let indexable = INDEXABLE_MIME_TYPES.contains(&mime_type.as_str())
            || name.to_lowercase().contains("eop");
        if !indexable {
            return Ok(None);
        }

        if mime_type == "application/pdf" || has_extension(name, "pdf") {
            return Ok(Some(Self::pdf(bytes)));
        }

        String::from_utf8(bytes).map(|text| Some(Self::Text(text))).map_err(|e| {
            RagError::UnreadableContent { name: name.to_string(), message: e.to_string() }
        })
    }

    /// Produce the text that will be normalized and chunked.
    pub fn into_text(self, name: &str) -> String {
        match self {
            Self::Text(text) => text,
            Self::Binary { format, bytes } => {
                warn!(document.name = name, format = %format, bytes = bytes.len(), "text extraction unsupported, indexing placeholder");
                binary_placeholder(&format, bytes.len())
            }
        }
    }
}

/// Guess a MIME type from a file extension, for file-based ingestion.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("md" | "markdown") => "text/markdown",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name).extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// The fixed placeholder indexed in place of unsupported binary content.
pub fn binary_placeholder(format: &str, byte_len: usize) -> String {
    format!(
        "[{format} Content - {byte_len} bytes]\n\n\
         This is a placeholder for {format} text extraction. Text extraction for this format \
         is not supported, so the document's actual content has not been indexed.\n\n\
         To make this document searchable:\n\
         - Convert the {format} to text manually and upload it as a .txt file\n\
         - Use the file upload feature with text content\n\
         - Provide key excerpts from the document directly in chat"
    )
}

/// Collapse every whitespace run to one space and trim the ends.
///
/// Newlines count as whitespace, so runs of blank lines collapse as well.
/// The output is a fixed point: normalizing it again returns it unchanged.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
