//! ANSI flavored dialect.

use super::{Dialect, LiteralOverflow};

/// Accepts `-- ...` line comments in addition to the C-style ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl AnsiDialect {
    /// Creates a new ANSI dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn line_comment_dashes(&self) -> bool {
        true
    }

    fn literal_overflow(&self) -> LiteralOverflow {
        LiteralOverflow::Reject
    }
}
