//! Column definitions for CREATE TABLE.

use core::fmt;

use super::{write_ident, write_list};
use crate::lexer::Loc;
use crate::symbol::Symbol;

/// A column definition for CREATE TABLE.
///
/// The type is kept as written; `VARCHAR(20)` is `ty = varchar`,
/// `args = [20]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Source location, from the column name to the type.
    pub loc: Loc,
    /// Column name.
    pub name: Symbol,
    /// Type name.
    pub ty: Symbol,
    /// Integer type arguments.
    pub args: Vec<u64>,
}

impl ColumnDef {
    /// Returns the source location of the definition.
    #[must_use]
    pub const fn loc(&self) -> &Loc {
        &self.loc
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        f.write_str(" ")?;
        write_ident(f, &self.ty)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            write_list(f, &self.args, |f, n| write!(f, "{n}"))?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
