//! SQL statement AST types.

use core::fmt;

use super::expression::Expr;
use super::{write_ident, write_list};
use crate::lexer::Loc;
use crate::symbol::Symbol;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// `JOIN` or `INNER JOIN`.
    Inner,
    /// `LEFT [OUTER] JOIN`.
    Left,
    /// `RIGHT [OUTER] JOIN`.
    Right,
    /// `FULL [OUTER] JOIN`.
    Full,
    /// `NATURAL [INNER] JOIN`.
    NaturalInner,
    /// `NATURAL LEFT [OUTER] JOIN`.
    NaturalLeft,
    /// `NATURAL RIGHT [OUTER] JOIN`.
    NaturalRight,
    /// `NATURAL FULL [OUTER] JOIN`.
    NaturalFull,
    /// `CROSS JOIN`.
    Cross,
}

impl JoinType {
    pub(crate) const LEFT: u8 = 0x1;
    pub(crate) const RIGHT: u8 = 0x2;
    pub(crate) const FULL: u8 = Self::LEFT | Self::RIGHT;
    pub(crate) const NATURAL: u8 = 0x4;

    /// Builds a join type from the qualifier flags collected by the parser.
    #[must_use]
    pub(crate) const fn from_flags(flags: u8) -> Self {
        match flags & (Self::FULL | Self::NATURAL) {
            0 => Self::Inner,
            Self::LEFT => Self::Left,
            Self::RIGHT => Self::Right,
            Self::FULL => Self::Full,
            Self::NATURAL => Self::NaturalInner,
            0x5 => Self::NaturalLeft,
            0x6 => Self::NaturalRight,
            _ => Self::NaturalFull,
        }
    }

    /// Returns true for the NATURAL variants.
    #[must_use]
    pub const fn is_natural(&self) -> bool {
        matches!(
            self,
            Self::NaturalInner | Self::NaturalLeft | Self::NaturalRight | Self::NaturalFull
        )
    }

    /// Returns true if the join may carry an ON or USING specification.
    #[must_use]
    pub const fn takes_spec(&self) -> bool {
        !self.is_natural() && !matches!(self, Self::Cross)
    }

    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::NaturalInner => "NATURAL JOIN",
            Self::NaturalLeft => "NATURAL LEFT JOIN",
            Self::NaturalRight => "NATURAL RIGHT JOIN",
            Self::NaturalFull => "NATURAL FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSpec {
    /// `ON <expr>`
    On(Expr),
    /// `USING (<col>, ...)`
    Using(Vec<Symbol>),
}

impl fmt::Display for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(expr) => write!(f, "ON {expr}"),
            Self::Using(columns) => {
                f.write_str("USING (")?;
                write_list(f, columns, |f, sym| write_ident(f, sym))?;
                f.write_str(")")
            }
        }
    }
}

/// Prefix operators on table references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnTableOp {
    /// `( table )`
    Paren,
    /// `LATERAL table`
    Lateral,
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    /// A possibly qualified table name with an optional alias.
    Id {
        loc: Loc,
        syms: Vec<Symbol>,
        alias: Option<Symbol>,
    },

    /// A parenthesized or LATERAL table.
    Un {
        loc: Loc,
        op: UnTableOp,
        rhs: Box<Table>,
    },

    /// A derived table: `(SELECT ...) [AS alias]`.
    Select {
        loc: Loc,
        select: Box<Select>,
        alias: Option<Symbol>,
    },

    /// Two tables combined by a join.
    Join {
        loc: Loc,
        lhs: Box<Table>,
        kind: JoinType,
        rhs: Box<Table>,
        spec: Option<JoinSpec>,
    },

    /// Placeholder for input that could not be parsed.
    Err { loc: Loc },
}

impl Table {
    /// Returns the source location of the table reference.
    #[must_use]
    pub const fn loc(&self) -> &Loc {
        match self {
            Self::Id { loc, .. }
            | Self::Un { loc, .. }
            | Self::Select { loc, .. }
            | Self::Join { loc, .. }
            | Self::Err { loc } => loc,
        }
    }

    /// Returns true for error placeholders.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err { .. })
    }
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: Option<&Symbol>) -> fmt::Result {
    match alias {
        Some(alias) => {
            f.write_str(" AS ")?;
            write_ident(f, alias)
        }
        None => Ok(()),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { syms, alias, .. } => {
                for (i, sym) in syms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write_ident(f, sym)?;
                }
                write_alias(f, alias.as_ref())
            }
            Self::Un {
                op: UnTableOp::Paren,
                rhs,
                ..
            } => write!(f, "({rhs})"),
            Self::Un {
                op: UnTableOp::Lateral,
                rhs,
                ..
            } => write!(f, "LATERAL {rhs}"),
            Self::Select { select, alias, .. } => {
                write!(f, "({select})")?;
                write_alias(f, alias.as_ref())
            }
            Self::Join {
                lhs,
                kind,
                rhs,
                spec,
                ..
            } => {
                write!(f, "{lhs} {kind} {rhs}")?;
                match spec {
                    Some(spec) => write!(f, " {spec}"),
                    None => Ok(()),
                }
            }
            Self::Err { .. } => f.write_str("<error>"),
        }
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectElem {
    /// Source location.
    pub loc: Loc,
    /// The selected expression.
    pub expr: Expr,
    /// `AS x` gives one alias, `AS (x, y)` several, no AS none.
    pub aliases: Vec<Symbol>,
}

impl fmt::Display for SelectElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.aliases.as_slice() {
            [] => Ok(()),
            [alias] => {
                f.write_str(" AS ")?;
                write_ident(f, alias)
            }
            aliases => {
                f.write_str(" AS (")?;
                write_list(f, aliases, |f, sym| write_ident(f, sym))?;
                f.write_str(")")
            }
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    /// Source location, from `SELECT` to the end of the last clause.
    pub loc: Loc,
    /// True for `SELECT DISTINCT`; `SELECT ALL` and plain `SELECT` are false.
    pub distinct: bool,
    /// The select list; empty for `SELECT *`.
    pub elems: Vec<SelectElem>,
    /// FROM clause.
    pub from: Vec<Table>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Option<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
}

impl Select {
    /// Returns the source location of the statement.
    #[must_use]
    pub const fn loc(&self) -> &Loc {
        &self.loc
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if self.elems.is_empty() {
            f.write_str("*")?;
        } else {
            write_list(f, &self.elems, |f, elem| write!(f, "{elem}"))?;
        }
        f.write_str(" FROM ")?;
        write_list(f, &self.from, |f, table| write!(f, "{table}"))?;
        if let Some(expr) = &self.where_clause {
            write!(f, " WHERE {expr}")?;
        }
        if let Some(expr) = &self.group_by {
            write!(f, " GROUP BY {expr}")?;
        }
        if let Some(expr) = &self.having {
            write!(f, " HAVING {expr}")?;
        }
        Ok(())
    }
}

/// A parsed source file: statements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Source location of the whole program.
    pub loc: Loc,
    /// The statements.
    pub stmts: Vec<Expr>,
}

impl Program {
    /// Returns the source location of the program.
    #[must_use]
    pub const fn loc(&self) -> &Loc {
        &self.loc
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.stmts {
            match stmt {
                Expr::Select(select) => writeln!(f, "{select};")?,
                other => writeln!(f, "{other};")?,
            }
        }
        Ok(())
    }
}
