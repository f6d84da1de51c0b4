//! Generic SQL dialect.

use super::{Dialect, LiteralOverflow};

/// The default dialect: C-style comments only, oversized literals rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect {
    overflow: LiteralOverflow,
}

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overflow: LiteralOverflow::Reject,
        }
    }

    /// Returns a copy using the given literal overflow policy.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: LiteralOverflow) -> Self {
        self.overflow = overflow;
        self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn literal_overflow(&self) -> LiteralOverflow {
        self.overflow
    }
}
