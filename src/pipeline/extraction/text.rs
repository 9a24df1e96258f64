use super::ExtractionError;

/// Converts an uploaded document into plain contract text.
///
/// The analysis pipeline consumes the output and treats failures as the
/// extractor's own; PDF and OCR extraction are for callers to supply.
pub trait TextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String, ExtractionError>;
}

/// UTF-8 passthrough extractor for plain-text contracts.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let text = String::from_utf8(document.to_vec())
            .map_err(|e| ExtractionError::EncodingError(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        tracing::info!(text_length = text.len(), "plain text extraction complete");
        Ok(text)
    }
}
