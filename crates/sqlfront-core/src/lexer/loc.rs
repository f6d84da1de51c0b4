//! Source location tracking for tokens and AST nodes.

use core::fmt;

use crate::symbol::Symbol;

/// A position in the source: 1-based row and column, zero meaning unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    /// Line number, starting at 1.
    pub row: u32,
    /// Column in characters, starting at 1.
    pub col: u32,
}

impl Pos {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Returns true if this position has been set.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.row != 0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A span in a named source.
///
/// `finis` is the position of the last character covered, so a one-character
/// token has `begin == finis`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loc {
    /// The file (or other label) the span belongs to.
    pub file: Symbol,
    /// First covered position.
    pub begin: Pos,
    /// Last covered position.
    pub finis: Pos,
}

impl Loc {
    /// Creates a new span.
    #[must_use]
    pub const fn new(file: Symbol, begin: Pos, finis: Pos) -> Self {
        Self { file, begin, finis }
    }

    /// Creates a zero-width span at `pos`.
    #[must_use]
    pub const fn at(file: Symbol, pos: Pos) -> Self {
        Self {
            file,
            begin: pos,
            finis: pos,
        }
    }

    /// Returns the span from the start of `self` to the end of `other`.
    #[must_use]
    pub fn to(&self, other: &Self) -> Self {
        Self {
            file: self.file.clone(),
            begin: self.begin,
            finis: other.finis,
        }
    }

    /// Returns a zero-width span at the end of this one.
    #[must_use]
    pub fn finis_only(&self) -> Self {
        Self::at(self.file.clone(), self.finis)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.finis {
            write!(f, "{}:{}", self.file, self.begin)
        } else {
            write!(f, "{}:{}-{}", self.file, self.begin, self.finis)
        }
    }
}
