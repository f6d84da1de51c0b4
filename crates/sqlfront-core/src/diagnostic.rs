//! Diagnostics and the per-parse session object.

use std::fmt;
use std::sync::Arc;

use crate::lexer::Loc;
use crate::symbol::{Symbol, SymbolTable};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Additional information.
    Note,
    /// Suspicious but accepted input.
    Warning,
    /// Malformed input.
    Error,
}

impl Severity {
    /// Returns the label used when rendering a diagnostic.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message attached to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem was found.
    pub loc: Loc,
    /// How serious it is.
    pub severity: Severity,
    /// Human readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.loc, self.severity, self.message)
    }
}

/// Session state shared by a lexer and the parser driving it.
///
/// The driver hands out symbols and collects diagnostics. Lexer and parser
/// borrow it mutably for the duration of a parse; afterwards the caller
/// inspects the counters to decide what to do.
#[derive(Debug)]
pub struct Driver {
    symbols: Arc<SymbolTable>,
    diagnostics: Vec<Diagnostic>,
    num_notes: usize,
    num_warnings: usize,
    num_errors: usize,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    /// Creates a driver with its own symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_symbols(Arc::new(SymbolTable::new()))
    }

    /// Creates a driver that interns into a shared symbol table.
    #[must_use]
    pub const fn with_symbols(symbols: Arc<SymbolTable>) -> Self {
        Self {
            symbols,
            diagnostics: Vec::new(),
            num_notes: 0,
            num_warnings: 0,
            num_errors: 0,
        }
    }

    /// Interns `text`.
    pub fn sym(&self, text: &str) -> Symbol {
        self.symbols.intern(text)
    }

    /// Returns the symbol table this driver interns into.
    #[must_use]
    pub const fn symbols(&self) -> &Arc<SymbolTable> {
        &self.symbols
    }

    /// Records a diagnostic and bumps the counter of its severity.
    pub fn report(&mut self, loc: Loc, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Note => {
                self.num_notes += 1;
                tracing::info!(target: "sqlfront::diag", %loc, "{message}");
            }
            Severity::Warning => {
                self.num_warnings += 1;
                tracing::warn!(target: "sqlfront::diag", %loc, "{message}");
            }
            Severity::Error => {
                self.num_errors += 1;
                tracing::error!(target: "sqlfront::diag", %loc, "{message}");
            }
        }
        self.diagnostics.push(Diagnostic {
            loc,
            severity,
            message,
        });
    }

    /// Reports a note.
    pub fn note(&mut self, loc: Loc, message: impl Into<String>) {
        self.report(loc, Severity::Note, message);
    }

    /// Reports a warning.
    pub fn warn(&mut self, loc: Loc, message: impl Into<String>) {
        self.report(loc, Severity::Warning, message);
    }

    /// Reports an error.
    pub fn err(&mut self, loc: Loc, message: impl Into<String>) {
        self.report(loc, Severity::Error, message);
    }

    /// All diagnostics reported so far, in order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Removes and returns the collected diagnostics. Counters are kept.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Number of notes reported.
    #[must_use]
    pub const fn num_notes(&self) -> usize {
        self.num_notes
    }

    /// Number of warnings reported.
    #[must_use]
    pub const fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    /// Number of errors reported.
    #[must_use]
    pub const fn num_errors(&self) -> usize {
        self.num_errors
    }

    /// Returns true if at least one error was reported.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.num_errors != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Pos;

    fn loc(driver: &Driver) -> Loc {
        Loc::new(driver.sym("t.sql"), Pos::new(1, 1), Pos::new(1, 3))
    }

    #[test]
    fn test_counters_per_severity() {
        let mut driver = Driver::new();
        let l = loc(&driver);
        driver.note(l.clone(), "n");
        driver.warn(l.clone(), "w1");
        driver.warn(l.clone(), "w2");
        driver.err(l, "e");
        assert_eq!(driver.num_notes(), 1);
        assert_eq!(driver.num_warnings(), 2);
        assert_eq!(driver.num_errors(), 1);
        assert!(driver.has_errors());
        assert_eq!(driver.diagnostics().len(), 4);
    }

    #[test]
    fn test_diagnostic_display() {
        let mut driver = Driver::new();
        let l = loc(&driver);
        driver.err(l, "invalid input character: '$'");
        assert_eq!(
            driver.diagnostics()[0].to_string(),
            "t.sql:1:1-1:3: error: invalid input character: '$'"
        );
    }

    #[test]
    fn test_take_keeps_counters() {
        let mut driver = Driver::new();
        let l = loc(&driver);
        driver.err(l, "e");
        assert_eq!(driver.take_diagnostics().len(), 1);
        assert!(driver.diagnostics().is_empty());
        assert_eq!(driver.num_errors(), 1);
    }

    #[test]
    fn test_shared_symbols() {
        let table = Arc::new(SymbolTable::new());
        let d1 = Driver::with_symbols(Arc::clone(&table));
        let d2 = Driver::with_symbols(table);
        assert_eq!(d1.sym("x"), d2.sym("x"));
    }
}
