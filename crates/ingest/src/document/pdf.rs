use super::ExtractionError;

/// Extract the text layer of a PDF.
///
/// Scanned PDFs without a text layer come back empty and are rejected later
/// as [`ExtractionError::Empty`].
#[cfg(feature = "pdf")]
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // Page breaks arrive as form feeds; normalization turns them into spaces.
    let pages = text.split('\x0C').filter(|p| !p.trim().is_empty()).count();
    tracing::debug!(pages, chars = text.chars().count(), "extracted PDF text layer");

    Ok(text)
}

#[cfg(not(feature = "pdf"))]
pub fn extract_pdf(_bytes: &[u8]) -> Result<String, ExtractionError> {
    Err(ExtractionError::Unsupported(
        "built without the `pdf` feature".to_string(),
    ))
}
