//! Text extraction for the supported file formats.
//!
//! Every extractor returns raw text; [`normalize_text`] then produces the
//! single-line form the chunker expects.

mod md;
mod normalize;
mod pdf;
mod txt;
mod vtt;

use std::path::Path;

use chunkwise_core::{document_id, Document, FileMetadata};
use thiserror::Error;

pub use normalize::normalize_text;

/// Extensions accepted by [`extract_file`], lowercased with the leading dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".txt", ".md", ".vtt"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF support not available: {0}")]
    Unsupported(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("No text content extracted")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Metadata(#[from] chunkwise_core::CoreError),
}

/// Whether `path` has one of the [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let dotted = format!(".{}", e.to_lowercase());
            SUPPORTED_EXTENSIONS.contains(&dotted.as_str())
        })
        .unwrap_or(false)
}

/// Extract raw (un-normalized) text from file bytes.
///
/// `extension` is lowercased with its leading dot, as in [`FileMetadata`].
pub fn extract_text(bytes: &[u8], extension: &str) -> Result<String, ExtractionError> {
    match extension {
        ".pdf" => pdf::extract_pdf(bytes),
        ".txt" => Ok(txt::extract_txt(bytes)),
        ".md" => Ok(md::extract_md(bytes)),
        ".vtt" => Ok(vtt::extract_vtt(bytes)),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

/// Read, extract and normalize a file into a [`Document`].
///
/// Fails with [`ExtractionError::Empty`] when nothing but whitespace remains.
pub fn extract_file(path: &Path, module: &str) -> Result<Document, ExtractionError> {
    let metadata = FileMetadata::from_path(path)?;
    let bytes = std::fs::read(path)?;
    let raw = extract_text(&bytes, &metadata.extension)?;
    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }

    tracing::debug!(
        file = %metadata.filename,
        raw_chars = raw.chars().count(),
        normalized_chars = text.chars().count(),
        "extracted text"
    );

    Ok(Document {
        id: document_id(module, path),
        text,
        metadata,
    })
}

/// Decode bytes as UTF-8, dropping invalid sequences.
pub(crate) fn decode_utf8(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("a/b/Lecture.VTT")));
        assert!(is_supported(Path::new("notes.md")));
        assert!(!is_supported(Path::new("image.png")));
        assert!(!is_supported(Path::new("Makefile")));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = extract_text(b"data", ".docx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref e) if e == ".docx"));
    }

    #[test]
    fn invalid_utf8_bytes_are_dropped() {
        assert_eq!(decode_utf8(b"ab\xffcd"), "abcd");
    }

    #[test]
    fn extract_file_builds_normalized_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"  Hello\n\n  world.\tBye \x07").unwrap();

        let doc = extract_file(&path, "course").unwrap();
        assert_eq!(doc.id, "course_intro");
        assert_eq!(doc.text, "Hello world. Bye");
        assert_eq!(doc.metadata.filename, "intro.txt");
        assert_eq!(doc.metadata.extension, ".txt");
        assert_eq!(doc.metadata.size, 23);
    }

    #[test]
    fn whitespace_only_file_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.md");
        std::fs::write(&path, " \n\t \n").unwrap();

        let err = extract_file(&path, "default").unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }
}
