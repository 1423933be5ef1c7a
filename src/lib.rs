//! Cantolex
//!
//! A lexical scanner for a small programming language whose keywords are
//! Cantonese words: `叫佢` declares a variable, `大過` compares, `如果 ... 嘅話`
//! opens a conditional.
//!
//! ```
//! use cantolex::frontend::{tokenize, SymbolTable, TokenKind};
//!
//! let tokens = tokenize("叫佢 i。", &SymbolTable::cantonese());
//! assert_eq!(tokens[0].kind, TokenKind::Initialize);
//! assert_eq!(tokens[0].literal, "叫佢");
//! ```

pub mod frontend;
pub mod utils;
