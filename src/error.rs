use thiserror::Error;

/// Reasons a `TradingItem` refuses to be constructed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemError {
    #[error("item name cannot be empty")]
    EmptyName,
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Document-level failures. Zero parsed rows is never one of these.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("document is not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("text extraction failed: {0}")]
    Extract(String),
}
