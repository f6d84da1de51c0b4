//! SQL dialect support.
//!
//! A dialect configures the lexer: which comment styles it accepts and how
//! it treats integer literals that do not fit into 64 bits.

mod ansi;
mod generic;

pub use ansi::AnsiDialect;
pub use generic::GenericDialect;

/// What to do with an integer literal larger than `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralOverflow {
    /// Report an error and use `u64::MAX`.
    #[default]
    Reject,
    /// Silently use `u64::MAX`.
    Saturate,
    /// Silently keep the value modulo 2^64.
    Wrap,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns whether `-- ...` starts a line comment.
    ///
    /// `// ...` and `/* ... */` comments are always accepted.
    fn line_comment_dashes(&self) -> bool {
        false
    }

    /// Returns the policy for oversized integer literals.
    fn literal_overflow(&self) -> LiteralOverflow {
        LiteralOverflow::Reject
    }
}
