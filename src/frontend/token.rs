//! Token definitions for Cantolex

use serde::{Deserialize, Serialize};

use crate::utils::{Error, Result, Span};

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text the token was scanned from
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self { kind, literal: literal.into(), span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::EndOfInput, literal: String::new(), span }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// Turn an `Invalid` token into an error, pass every other token through
    pub fn into_result(self) -> Result<Token> {
        if self.kind != TokenKind::Invalid {
            return Ok(self);
        }
        let ch = self.literal.chars().next().unwrap_or('\u{FFFD}');
        Err(Error::InvalidCharacter { ch, span: self.span })
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.literal)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // ============ Punctuation ============
    /// （
    OpenParen,
    /// ）
    CloseParen,
    /// 「
    OpenBrace,
    /// 」
    CloseBrace,
    /// 。
    FullStop,
    /// ，
    Comma,

    // ============ Keywords ============
    /// 叫佢 (declare a variable)
    Initialize,
    /// 塞
    Assign,
    /// 入
    To,
    /// 係
    EqualTo,
    /// 細過
    LessThan,
    /// 大過
    GreaterThan,
    /// 同埋
    And,
    /// 或者
    Or,
    /// 唔係
    Not,
    /// 如果
    If,
    /// 嘅話 (closes an if condition)
    ConditionalMarker,
    /// 就
    Then,
    /// 當
    While,
    /// 時 (closes a while condition)
    Si,

    // ============ Operators ============
    Add,
    Minus,
    Multiply,
    Divide,
    /// 大D
    Increment,
    /// 細D
    Decrement,

    // ============ Scanned ============
    Identifier,
    Number,
    Comment,
    /// Unrecognized character
    Invalid,
    EndOfInput,
}

impl TokenKind {
    /// Kinds that the lexer produces by scanning rather than by table lookup.
    /// A symbol table may never map a literal to one of these.
    pub fn is_scanned(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::Comment
                | TokenKind::Invalid
                | TokenKind::EndOfInput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_into_result() {
        let token = Token::new(TokenKind::Invalid, "$", Span::new(3, 4, 1, 4));
        let err = token.into_result().unwrap_err();

        assert_eq!(err, Error::InvalidCharacter { ch: '$', span: Span::new(3, 4, 1, 4) });
        assert_eq!(err.to_string(), "Invalid character '$' at 1:4");
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::GreaterThan, "大過", Span::default());
        assert_eq!(token.to_string(), "GreaterThan(\"大過\")");
        assert_eq!(Token::eof(Span::default()).to_string(), "EndOfInput(\"\")");
    }

    #[test]
    fn test_kind_classes() {
        assert!(TokenKind::Comment.is_scanned());
        assert!(!TokenKind::Assign.is_scanned());
    }
}
