//! Expression AST types.

use core::fmt;

use super::{write_ident, write_list, write_quoted, ColumnDef, NodeId, Select};
use crate::lexer::{Keyword, Loc};
use crate::symbol::Symbol;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Like,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical NOT
    Not,
    /// Identity (+)
    Plus,
    /// Negation (-)
    Minus,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleValue {
    True,
    False,
    Unknown,
    Null,
}

impl SimpleValue {
    /// Returns the SQL representation of the value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
            Self::Null => "NULL",
        }
    }
}

/// An SQL expression.
///
/// Statements are expressions too: a program is a list of `Expr`s, most of
/// which are [`Expr::Select`] or [`Expr::Create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A dotted identifier chain such as `a.b.c`, or `a.b.*` when
    /// `asterisk` is set. `COUNT(*)` is represented with an empty chain.
    Id {
        loc: Loc,
        id: NodeId,
        syms: Vec<Symbol>,
        asterisk: bool,
    },

    /// An unsigned integer literal.
    Int { loc: Loc, value: u64 },

    /// A string literal.
    Str { loc: Loc, sym: Symbol },

    /// TRUE, FALSE, UNKNOWN or NULL.
    Simple { loc: Loc, value: SimpleValue },

    /// A unary expression.
    Un {
        loc: Loc,
        op: UnaryOp,
        rhs: Box<Expr>,
    },

    /// A binary expression.
    Bin {
        loc: Loc,
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    /// `expr BETWEEN low AND high`.
    Between {
        loc: Loc,
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },

    /// A function or aggregate call.
    Func {
        loc: Loc,
        name: Symbol,
        distinct: bool,
        args: Vec<Expr>,
    },

    /// `CREATE TABLE name (columns)`.
    Create {
        loc: Loc,
        name: Symbol,
        columns: Vec<ColumnDef>,
    },

    /// A SELECT statement or subquery.
    Select(Box<Select>),

    /// Placeholder for input that could not be parsed.
    Err { loc: Loc },
}

impl Expr {
    /// Returns the source location of the expression.
    #[must_use]
    pub fn loc(&self) -> &Loc {
        match self {
            Self::Id { loc, .. }
            | Self::Int { loc, .. }
            | Self::Str { loc, .. }
            | Self::Simple { loc, .. }
            | Self::Un { loc, .. }
            | Self::Bin { loc, .. }
            | Self::Between { loc, .. }
            | Self::Func { loc, .. }
            | Self::Create { loc, .. }
            | Self::Err { loc } => loc,
            Self::Select(select) => &select.loc,
        }
    }

    /// Returns true for error placeholders.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err { .. })
    }

    /// Returns the node id of an identifier expression.
    #[must_use]
    pub const fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Id { id, .. } => Some(*id),
            _ => None,
        }
    }
}

fn write_func_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    match Keyword::from_str(name) {
        Some(kw) if kw.is_aggregate() => f.write_str(kw.as_str()),
        _ => write_ident(f, name),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { syms, asterisk, .. } => {
                for (i, sym) in syms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write_ident(f, sym)?;
                }
                match (*asterisk, syms.is_empty()) {
                    (true, true) => f.write_str("*"),
                    (true, false) => f.write_str(".*"),
                    (false, _) => Ok(()),
                }
            }
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Str { sym, .. } => write_quoted(f, sym, '\''),
            Self::Simple { value, .. } => f.write_str(value.as_str()),
            Self::Un { op: UnaryOp::Not, rhs, .. } => write!(f, "(NOT {rhs})"),
            Self::Un { op, rhs, .. } => write!(f, "({op}{rhs})"),
            Self::Bin { lhs, op, rhs, .. } => write!(f, "({lhs} {op} {rhs})"),
            Self::Between {
                expr, low, high, ..
            } => write!(f, "({expr} BETWEEN {low} AND {high})"),
            Self::Func {
                name,
                distinct,
                args,
                ..
            } => {
                write_func_name(f, name)?;
                f.write_str("(")?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_list(f, args, |f, arg| write!(f, "{arg}"))?;
                f.write_str(")")
            }
            Self::Create { name, columns, .. } => {
                f.write_str("CREATE TABLE ")?;
                write_ident(f, name)?;
                f.write_str(" (")?;
                write_list(f, columns, |f, column| write!(f, "{column}"))?;
                f.write_str(")")
            }
            Self::Select(select) => write!(f, "({select})"),
            Self::Err { .. } => f.write_str("<error>"),
        }
    }
}
