//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of tokens.

mod loc;
mod token;
mod tokenizer;

pub use loc::{Loc, Pos};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
