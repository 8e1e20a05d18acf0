//! Structured error types for the casework engine.
//!
//! The engines themselves never fail. Errors only come from the boundaries
//! where a specification or settings record enters the crate: JSON parsing,
//! share-link decoding, and structural checks on decoded input.

use thiserror::Error;

/// The unified error type returned by all fallible public casework functions.
#[derive(Debug, Error)]
pub enum CaseworkError {
    /// JSON input failed to parse as a specification or settings record.
    #[error("Failed to parse input: {source}{}", format_hint(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// A share-link payload was not valid base64.
    #[error("Share link is not valid base64: {0}")]
    ShareLinkEncoding(#[from] base64::DecodeError),
    /// A share-link payload decoded to bytes that are not UTF-8.
    #[error("Share link payload is not UTF-8: {0}")]
    ShareLinkText(#[from] std::string::FromUtf8Error),
    /// A board thickness tag was not of the form `t<digits>`.
    #[error("Invalid board thickness {0:?}: expected a tag like \"t18\"")]
    InvalidThickness(String),
    /// The cell grid does not match the ratio sequences.
    #[error("Cell grid mismatch: {0}")]
    GridMismatch(String),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for CaseworkError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names, enum values and the thickness tag.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        CaseworkError::ParseError { source: e, hint }
    }
}
