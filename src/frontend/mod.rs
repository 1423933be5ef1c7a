//! Frontend module - Tokens, Symbol Table, Lexer

pub mod token;
pub mod symbols;
pub mod lexer;

pub use lexer::{tokenize, Lexer};
pub use symbols::SymbolTable;
pub use token::{Token, TokenKind};
