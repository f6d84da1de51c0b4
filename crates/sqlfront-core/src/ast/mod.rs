//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node owns its children and carries the [`Loc`](crate::lexer::Loc)
//! of the tokens it was built from. Nodes are immutable once the parser has
//! returned them; per-node facts that are not part of the tree itself live
//! in side tables such as [`Annotations`].

mod expression;
mod statement;
mod types;

use core::fmt;

use rustc_hash::FxHashSet;

use crate::lexer::Keyword;

pub use expression::{BinaryOp, Expr, SimpleValue, UnaryOp};
pub use statement::{JoinSpec, JoinType, Program, Select, SelectElem, Table, UnTableOp};
pub use types::ColumnDef;

/// Identifies an identifier node within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Out-of-band facts the parser records about nodes.
///
/// Currently this is the set of identifier nodes that appear where a
/// trailing `.*` is meaningful: directly in a select list or as an
/// aggregate argument.
#[derive(Debug, Default, Clone)]
pub struct Annotations {
    asterisk_allowed: FxHashSet<NodeId>,
}

impl Annotations {
    /// Creates an empty annotation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as a node where an asterisk is allowed.
    pub fn allow_asterisk(&mut self, id: NodeId) {
        self.asterisk_allowed.insert(id);
    }

    /// Returns true if `id` was marked with [`allow_asterisk`](Self::allow_asterisk).
    #[must_use]
    pub fn asterisk_allowed(&self, id: NodeId) -> bool {
        self.asterisk_allowed.contains(&id)
    }

    /// Returns the number of marked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.asterisk_allowed.len()
    }

    /// Returns true if no node is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asterisk_allowed.is_empty()
    }
}

/// Writes `text` between `quote` characters, escaping what the lexer unescapes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    use fmt::Write;

    f.write_char(quote)?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\0' => f.write_str("\\0")?,
            '\x07' => f.write_str("\\a")?,
            '\x08' => f.write_str("\\b")?,
            '\x0c' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x0b' => f.write_str("\\v")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

fn is_plain_ident(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_lowercase())
        && chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
        && Keyword::from_str(text).is_none()
}

/// Writes an identifier, quoting it unless it would lex back unchanged.
pub(crate) fn write_ident(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if is_plain_ident(text) {
        f.write_str(text)
    } else {
        write_quoted(f, text, '"')
    }
}

/// Writes `items` separated by `", "`.
pub(crate) fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write(f, item)?;
    }
    Ok(())
}
