use crate::error::ReportError;
use crate::parser;

/// Turns an uploaded document into plain text. A PDF backend implements this;
/// the parser only ever sees the returned text.
pub trait TextExtractor {
    fn extract_text(&self, document: &[u8]) -> Result<String, ReportError>;
}

/// Treats the document as UTF-8 text that has already been extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, document: &[u8]) -> Result<String, ReportError> {
        let text = parser::decode_text(document)?;
        if text.is_empty() {
            return Err(ReportError::Extract("document is empty".to_string()));
        }
        Ok(text.to_string())
    }
}
