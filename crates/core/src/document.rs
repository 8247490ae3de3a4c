use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stable document identifier, `{module}_{file_stem}`.
pub type DocId = String;

/// A normalized document ready for chunking.
///
/// `text` must already be normalized (whitespace collapsed, control
/// characters stripped); chunk offsets refer to this exact string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
    pub metadata: FileMetadata,
}

/// File-level facts carried into every chunk record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileMetadata {
    /// File name including extension, e.g. `lecture-01.vtt`.
    pub filename: String,
    /// Lowercased extension with its leading dot, e.g. `.vtt`. Empty if none.
    pub extension: String,
    /// Size on disk in bytes.
    pub size: u64,
}

impl FileMetadata {
    /// Read name, extension and size for `path` from the file system.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let size = std::fs::metadata(path)?.len();
        Self::from_parts(path, size)
    }

    /// Build metadata from a path and an already known size.
    pub fn from_parts(path: &Path, size: u64) -> Result<Self, CoreError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::InvalidPath(path.display().to_string()))?
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        Ok(Self {
            filename,
            extension,
            size,
        })
    }
}

/// Build the document id for a file: `{module}_{file_stem}`.
pub fn document_id(module: &str, path: &Path) -> DocId {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{module}_{stem}")
}
