//! Lexer for Cantolex
//!
//! Converts source code into a stream of tokens. Keywords are one or two
//! logical characters long, so the source is decoded into `char`s up front
//! and every lookahead is at most one character past the cursor.

use crate::frontend::symbols::SymbolTable;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::Span;

/// The lexer state
pub struct Lexer<'t> {
    /// Source code as logical characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
    /// Line and column at `pos`
    line: usize,
    column: usize,
    /// Line and column at `start`
    start_line: usize,
    start_column: usize,
    /// Literal table consulted during dispatch
    symbols: &'t SymbolTable,
    /// Set once the iterator has yielded `EndOfInput`
    finished: bool,
}

impl<'t> Lexer<'t> {
    /// Create a new lexer for the given source code
    pub fn new(source: &str, symbols: &'t SymbolTable) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            symbols,
            finished: false,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character. A no-op at end of input.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Check if we've reached the end of input
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos, self.start_line, self.start_column)
    }

    /// Create a token whose literal is everything consumed since `start`
    fn make_token(&self, kind: TokenKind) -> Token {
        let literal: String = self.source[self.start..self.pos].iter().collect();
        Token::new(kind, literal, self.make_span())
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Read a comment up to, not including, the end of the line
    fn read_comment(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        self.make_token(TokenKind::Comment)
    }

    /// Read a run of ASCII digits
    fn read_number(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.advance();
        }
        self.make_token(TokenKind::Number)
    }

    /// Read a run of alphabetic characters and underscores. Keywords are
    /// only split off at the start of a token, so `i係j` is one identifier.
    fn read_identifier(&mut self) -> Option<Token> {
        while let Some(c) = self.peek() {
            if !(c.is_alphabetic() || c == '_') {
                break;
            }
            self.advance();
        }
        if self.pos == self.start {
            return None;
        }
        Some(self.make_token(TokenKind::Identifier))
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::eof(self.make_span()),
        };
        let next = self.peek_next();

        let token = if next.map_or(false, |n| self.symbols.is_comment_start(c, n)) {
            self.read_comment()
        } else if let Some(kind) = self.match_double(c, next) {
            self.advance();
            self.advance();
            self.make_token(kind)
        } else if let Some(kind) = self.symbols.single(c) {
            self.advance();
            self.make_token(kind)
        } else if c.is_ascii_digit() {
            self.read_number()
        } else if let Some(ident) = self.read_identifier() {
            ident
        } else {
            self.advance();
            log::debug!("invalid character {:?} at {}:{}", c, self.start_line, self.start_column);
            self.make_token(TokenKind::Invalid)
        };

        log::trace!("{} at {}", token, token.span);
        token
    }

    /// Two-character dispatch, gated on the first character
    fn match_double(&self, first: char, second: Option<char>) -> Option<TokenKind> {
        if !self.symbols.starts_double(first) {
            return None;
        }
        self.symbols.double(first, second?)
    }

    /// Tokenize the entire source and return all tokens, `EndOfInput` last
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Yields every token up to and including `EndOfInput`, then stops
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

/// Tokenize `source` with `symbols`
pub fn tokenize(source: &str, symbols: &SymbolTable) -> Vec<Token> {
    Lexer::new(source, symbols).tokenize()
}
