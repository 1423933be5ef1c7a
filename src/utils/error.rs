//! Error handling for Cantolex

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Library error
///
/// The lexer itself never fails; these errors come from symbol-table
/// construction and strict checking of a token stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Symbol Table Errors ====================

    #[error("Invalid symbol table: {message}")]
    SymbolTable { message: String },

    #[error("Malformed symbol table JSON: {0}")]
    Json(String),

    // ==================== Lexical Errors ====================

    #[error("Invalid character '{ch}' at {span}")]
    InvalidCharacter { ch: char, span: Span },
}

impl Error {
    /// Shorthand for a symbol table contract violation
    pub fn symbol_table(message: impl Into<String>) -> Self {
        Self::SymbolTable { message: message.into() }
    }

    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidCharacter { span, .. } => Some(*span),
            Self::SymbolTable { .. } | Self::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_only_on_lexical_errors() {
        let span = Span::new(2, 3, 1, 3);
        assert_eq!(Error::InvalidCharacter { ch: '$', span }.span(), Some(span));
        assert_eq!(Error::symbol_table("bad").span(), None);
    }

    #[test]
    fn test_conversions() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(Error::from(json), Error::Json(_)));
    }
}
