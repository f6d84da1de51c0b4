//! # sqlfront-core
//!
//! Lexer, parser and AST for a SQL query subset.
//!
//! This crate provides:
//! - A hand-written lexer with 1-based row/column tracking
//! - A recursive descent parser with precedence climbing for expressions
//!   and JOIN chains
//! - An owned AST whose every node carries its source location
//!
//! Parsing never stops at the first problem. Malformed input is reported to
//! a [`Driver`] and replaced by error nodes, so one pass yields both a tree
//! and every diagnostic:
//!
//! ```rust
//! use sqlfront_core::{Driver, Parser};
//!
//! let mut driver = Driver::new();
//! let program = Parser::new(
//!     &mut driver,
//!     "query.sql",
//!     "SELECT a.id, count(*) AS n FROM a LEFT JOIN b ON a.id = b.a_id GROUP BY a.id;",
//! )
//! .parse_program();
//!
//! assert!(!driver.has_errors());
//! assert_eq!(
//!     program.to_string(),
//!     "SELECT a.id, COUNT(*) AS n FROM a LEFT JOIN b ON (a.id = b.a_id) GROUP BY a.id;\n"
//! );
//! ```
//!
//! ## Error recovery
//!
//! ```rust
//! use sqlfront_core::{ast::Expr, Driver, Parser};
//!
//! let mut driver = Driver::new();
//! let program = Parser::new(&mut driver, "bad.sql", "SELECT FROM t;").parse_program();
//!
//! assert_eq!(driver.num_errors(), 1);
//! let Expr::Select(select) = &program.stmts[0] else { unreachable!() };
//! assert!(select.elems[0].expr.is_err());
//! ```

pub mod ast;
pub mod diagnostic;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol;

pub use ast::{Expr, Program, Select, Table};
pub use diagnostic::{Diagnostic, Driver, Severity};
pub use dialect::{AnsiDialect, Dialect, GenericDialect, LiteralOverflow};
pub use error::SourceError;
pub use lexer::{Keyword, Lexer, Loc, Pos, Token, TokenKind};
pub use parser::{Parser, Prec};
pub use symbol::{Symbol, SymbolTable};
