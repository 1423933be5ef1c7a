//! Symbol table for the lexer
//!
//! Maps literal source text to token kinds. Literals are either one or two
//! logical characters long; the lexer consults the table during dispatch and
//! never modifies it.

use serde::Deserialize;

use crate::frontend::token::TokenKind;
use crate::utils::{Error, Result};

/// The comment marker used by the built-in tables
pub const DEFAULT_COMMENT: [char; 2] = ['/', '/'];

/// Ordered literal-to-kind mapping consulted by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    singles: Vec<(char, TokenKind)>,
    doubles: Vec<([char; 2], TokenKind)>,
    comment: [char; 2],
}

/// On-disk form of a symbol table
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default = "default_comment")]
    comment: String,
    symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Deserialize)]
struct SymbolEntry {
    literal: String,
    kind: TokenKind,
}

fn default_comment() -> String {
    DEFAULT_COMMENT.iter().collect()
}

impl SymbolTable {
    /// An empty table with the given comment marker
    pub fn empty(comment: &str) -> Result<Self> {
        let chars: Vec<char> = comment.chars().collect();
        let comment = match chars.as_slice() {
            [a, b] if !a.is_whitespace() && !b.is_whitespace() => [*a, *b],
            _ => {
                return Err(Error::symbol_table(format!(
                    "comment marker must be two non-space characters, got {:?}",
                    comment
                )))
            }
        };
        Ok(Self { singles: Vec::new(), doubles: Vec::new(), comment })
    }

    /// The built-in Cantonese table
    pub fn cantonese() -> Self {
        let singles = vec![
            ('（', TokenKind::OpenParen),
            ('）', TokenKind::CloseParen),
            ('「', TokenKind::OpenBrace),
            ('」', TokenKind::CloseBrace),
            ('。', TokenKind::FullStop),
            ('，', TokenKind::Comma),
            ('塞', TokenKind::Assign),
            ('入', TokenKind::To),
            ('係', TokenKind::EqualTo),
            ('就', TokenKind::Then),
            ('當', TokenKind::While),
            ('時', TokenKind::Si),
            ('+', TokenKind::Add),
            ('-', TokenKind::Minus),
            ('*', TokenKind::Multiply),
            ('/', TokenKind::Divide),
        ];
        let doubles = vec![
            (['叫', '佢'], TokenKind::Initialize),
            (['細', '過'], TokenKind::LessThan),
            (['大', '過'], TokenKind::GreaterThan),
            (['同', '埋'], TokenKind::And),
            (['或', '者'], TokenKind::Or),
            (['唔', '係'], TokenKind::Not),
            (['如', '果'], TokenKind::If),
            (['嘅', '話'], TokenKind::ConditionalMarker),
            (['大', 'D'], TokenKind::Increment),
            (['細', 'D'], TokenKind::Decrement),
        ];
        Self { singles, doubles, comment: DEFAULT_COMMENT }
    }

    /// Add the ASCII spellings of the punctuation: `( ) { } ; ,`
    pub fn with_ascii_aliases(self) -> Self {
        self.with_builtin_singles(&[
            ('(', TokenKind::OpenParen),
            (')', TokenKind::CloseParen),
            ('{', TokenKind::OpenBrace),
            ('}', TokenKind::CloseBrace),
            (';', TokenKind::FullStop),
            (',', TokenKind::Comma),
        ])
    }

    /// Add the word spellings of the arithmetic operators: `加 減 乘 除`
    pub fn with_word_operators(self) -> Self {
        self.with_builtin_singles(&[
            ('加', TokenKind::Add),
            ('減', TokenKind::Minus),
            ('乘', TokenKind::Multiply),
            ('除', TokenKind::Divide),
        ])
    }

    fn with_builtin_singles(mut self, entries: &[(char, TokenKind)]) -> Self {
        for &(ch, kind) in entries {
            match self.single(ch) {
                None => self.singles.push((ch, kind)),
                Some(existing) => log::warn!(
                    "skipping alias {:?} for {:?}: already bound to {:?}",
                    ch,
                    kind,
                    existing
                ),
            }
        }
        self
    }

    /// Load a table from JSON of the form
    /// `{"comment": "//", "symbols": [{"literal": "（", "kind": "OpenParen"}]}`
    pub fn from_json(text: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(text)?;
        let mut table = Self::empty(&file.comment)?;
        for entry in file.symbols {
            table.insert(&entry.literal, entry.kind)?;
        }
        log::debug!(
            "loaded symbol table: {} single, {} double",
            table.singles.len(),
            table.doubles.len()
        );
        Ok(table)
    }

    /// Register a literal, checking it against the table's contract
    pub fn insert(&mut self, literal: &str, kind: TokenKind) -> Result<()> {
        if kind.is_scanned() {
            return Err(Error::symbol_table(format!(
                "{:?} cannot be bound to a literal ({:?})",
                kind, literal
            )));
        }
        let chars: Vec<char> = literal.chars().collect();
        if let Some(bad) = chars.iter().find(|c| c.is_ascii_digit() || c.is_whitespace()) {
            return Err(Error::symbol_table(format!(
                "literal {:?} contains {:?}, which is reserved for numbers or whitespace",
                literal, bad
            )));
        }
        match chars.as_slice() {
            [ch] => {
                if self.single(*ch).is_some() {
                    return Err(Error::symbol_table(format!("duplicate literal {:?}", literal)));
                }
                self.singles.push((*ch, kind));
            }
            [a, b] => {
                if [*a, *b] == self.comment {
                    return Err(Error::symbol_table(format!(
                        "literal {:?} collides with the comment marker",
                        literal
                    )));
                }
                if self.double(*a, *b).is_some() {
                    return Err(Error::symbol_table(format!("duplicate literal {:?}", literal)));
                }
                self.doubles.push(([*a, *b], kind));
            }
            _ => {
                return Err(Error::symbol_table(format!(
                    "literal {:?} must be one or two characters long",
                    literal
                )))
            }
        }
        Ok(())
    }

    /// Kind of a one-character literal
    pub fn single(&self, ch: char) -> Option<TokenKind> {
        self.singles.iter().find(|(c, _)| *c == ch).map(|(_, kind)| *kind)
    }

    /// Kind of a two-character literal
    pub fn double(&self, first: char, second: char) -> Option<TokenKind> {
        self.doubles
            .iter()
            .find(|(pair, _)| *pair == [first, second])
            .map(|(_, kind)| *kind)
    }

    /// Does any two-character literal start with `ch`?
    pub fn starts_double(&self, ch: char) -> bool {
        self.doubles.iter().any(|(pair, _)| pair[0] == ch)
    }

    pub fn is_comment_start(&self, first: char, second: char) -> bool {
        self.comment == [first, second]
    }

    pub fn comment_marker(&self) -> String {
        self.comment.iter().collect()
    }

    /// First registered spelling of a kind
    pub fn literal_of(&self, kind: TokenKind) -> Option<String> {
        self.singles
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(c, _)| c.to_string())
            .or_else(|| {
                self.doubles
                    .iter()
                    .find(|(_, k)| *k == kind)
                    .map(|(pair, _)| pair.iter().collect())
            })
    }

    /// Re-check every literal against the table contract
    pub fn validate(&self) -> Result<()> {
        let mut rebuilt = Self::empty(&self.comment_marker())?;
        for (ch, kind) in &self.singles {
            rebuilt.insert(&ch.to_string(), *kind)?;
        }
        for (pair, kind) in &self.doubles {
            rebuilt.insert(&pair.iter().collect::<String>(), *kind)?;
        }
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::cantonese()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_are_valid() {
        SymbolTable::cantonese().validate().unwrap();
        SymbolTable::cantonese()
            .with_ascii_aliases()
            .with_word_operators()
            .validate()
            .unwrap();
    }

    #[test]
    fn test_lookups() {
        let table = SymbolTable::cantonese();

        assert_eq!(table.single('。'), Some(TokenKind::FullStop));
        assert_eq!(table.single('叫'), None);
        assert_eq!(table.double('叫', '佢'), Some(TokenKind::Initialize));
        assert_eq!(table.double('大', 'D'), Some(TokenKind::Increment));
        assert!(table.starts_double('大'));
        assert!(!table.starts_double('塞'));
        assert!(table.is_comment_start('/', '/'));
        assert_eq!(table.literal_of(TokenKind::GreaterThan), Some("大過".to_string()));
        assert_eq!(table.literal_of(TokenKind::Identifier), None);
    }

    #[test]
    fn test_ascii_aliases() {
        let table = SymbolTable::cantonese().with_ascii_aliases();

        assert_eq!(table.single('('), Some(TokenKind::OpenParen));
        assert_eq!(table.single(';'), Some(TokenKind::FullStop));
        assert_eq!(table.literal_of(TokenKind::OpenParen), Some("（".to_string()));
    }

    #[test]
    fn test_insert_rejects_contract_violations() {
        let mut table = SymbolTable::cantonese();

        assert!(table.insert("1", TokenKind::Add).is_err());
        assert!(table.insert("塞", TokenKind::Assign).is_err());
        assert!(table.insert("//", TokenKind::Divide).is_err());
        assert!(table.insert("俾我", TokenKind::Identifier).is_err());
        assert!(table.insert("唔係就", TokenKind::Not).is_err());
        assert!(table.insert("", TokenKind::Not).is_err());

        table.insert("啱", TokenKind::EqualTo).unwrap();
        assert_eq!(table.single('啱'), Some(TokenKind::EqualTo));

        // a one-character literal may share its character with the start
        // of a two-character literal
        table.insert("大", TokenKind::Add).unwrap();
        table.insert("塞D", TokenKind::Increment).unwrap();
        assert_eq!(table.single('大'), Some(TokenKind::Add));
        assert_eq!(table.double('塞', 'D'), Some(TokenKind::Increment));
        table.validate().unwrap();
    }

    #[test]
    fn test_alias_conflicting_with_loaded_table_is_skipped() {
        let table = SymbolTable::from_json(
            r#"{"symbols": [{"literal": ";", "kind": "Comma"}]}"#,
        )
        .unwrap()
        .with_ascii_aliases();

        assert_eq!(table.single(';'), Some(TokenKind::Comma));
        assert_eq!(table.single('('), Some(TokenKind::OpenParen));
    }

    #[test]
    fn test_from_json_allows_prefix_collisions() {
        let table = SymbolTable::from_json(
            r#"{"symbols": [{"literal": "大過", "kind": "GreaterThan"}, {"literal": "大", "kind": "Add"}]}"#,
        )
        .unwrap();

        assert_eq!(table.single('大'), Some(TokenKind::Add));
        assert!(table.starts_double('大'));
    }

    #[test]
    fn test_from_json() {
        let text = r###"{
            "comment": "##",
            "symbols": [
                {"literal": "(", "kind": "OpenParen"},
                {"literal": ")", "kind": "CloseParen"},
                {"literal": "le", "kind": "LessThan"}
            ]
        }"###;
        let table = SymbolTable::from_json(text).unwrap();

        assert_eq!(table.comment_marker(), "##");
        assert_eq!(table.single(')'), Some(TokenKind::CloseParen));
        assert_eq!(table.double('l', 'e'), Some(TokenKind::LessThan));
        assert!(!table.is_comment_start('/', '/'));
    }

    #[test]
    fn test_from_json_errors() {
        let err = SymbolTable::from_json("{\"symbols\": [").unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = SymbolTable::from_json(r##"{"comment": "#", "symbols": []}"##).unwrap_err();
        assert!(matches!(err, Error::SymbolTable { .. }));

        let err = SymbolTable::from_json(
            r#"{"symbols": [{"literal": "+", "kind": "Add"}, {"literal": "+", "kind": "Minus"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, Error::symbol_table("duplicate literal \"+\""));
    }
}
