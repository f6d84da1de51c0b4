//! Token types for the SQL lexer.

use core::fmt;

use super::Loc;
use crate::symbol::Symbol;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQL keywords.
        ///
        /// Keywords are matched case-insensitively; the lexer folds every
        /// word to lower case before looking it up.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Returns the upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Add => "ADD",
    All => "ALL",
    Alter => "ALTER",
    And => "AND",
    Any => "ANY",
    As => "AS",
    Asc => "ASC",
    Avg => "AVG",
    Backup => "BACKUP",
    Between => "BETWEEN",
    By => "BY",
    Case => "CASE",
    Check => "CHECK",
    Column => "COLUMN",
    Constraint => "CONSTRAINT",
    Count => "COUNT",
    Create => "CREATE",
    Cross => "CROSS",
    Database => "DATABASE",
    Default => "DEFAULT",
    Delete => "DELETE",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Drop => "DROP",
    Exec => "EXEC",
    Exists => "EXISTS",
    False => "FALSE",
    Foreign => "FOREIGN",
    From => "FROM",
    Full => "FULL",
    Group => "GROUP",
    Having => "HAVING",
    In => "IN",
    Index => "INDEX",
    Inner => "INNER",
    Insert => "INSERT",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Lateral => "LATERAL",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Max => "MAX",
    Min => "MIN",
    Natural => "NATURAL",
    Not => "NOT",
    Null => "NULL",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Primary => "PRIMARY",
    Procedure => "PROCEDURE",
    Replace => "REPLACE",
    Right => "RIGHT",
    Rownum => "ROWNUM",
    Select => "SELECT",
    Set => "SET",
    Sum => "SUM",
    Table => "TABLE",
    Top => "TOP",
    True => "TRUE",
    Truncate => "TRUNCATE",
    Union => "UNION",
    Unique => "UNIQUE",
    Unknown => "UNKNOWN",
    Update => "UPDATE",
    Using => "USING",
    Values => "VALUES",
    View => "VIEW",
    Where => "WHERE",
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns true for the aggregate function names.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Self::Count | Self::Sum | Self::Avg | Self::Min | Self::Max
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag of a token.
///
/// Identifier, string and integer tokens carry a payload on the [`Token`];
/// every other kind is a pure tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved word.
    Keyword(Keyword),
    /// An identifier; the token carries its symbol.
    Identifier,
    /// An unsigned integer literal; the token carries its value.
    Integer,
    /// A string literal; the token carries its symbol.
    String,

    // Delimiters
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    // Operators and punctuation
    /// `:=`
    Assign,
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns the spelling of the tag, or a placeholder for payload kinds.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword(kw) => kw.as_str(),
            Self::Identifier => "<identifier>",
            Self::Integer => "<integer literal>",
            Self::String => "<string literal>",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Assign => ":=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Eof => "<end of file>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenValue {
    None,
    Sym(Symbol),
    Int(u64),
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The tag.
    pub kind: TokenKind,
    /// Where the token was found.
    pub loc: Loc,
    value: TokenValue,
}

impl Token {
    /// Creates a payload-free token.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is one of the payload kinds.
    #[must_use]
    pub fn new(kind: TokenKind, loc: Loc) -> Self {
        assert!(
            !matches!(
                kind,
                TokenKind::Identifier | TokenKind::Integer | TokenKind::String
            ),
            "{kind:?} tokens carry a payload"
        );
        Self {
            kind,
            loc,
            value: TokenValue::None,
        }
    }

    /// Creates an identifier token.
    #[must_use]
    pub const fn identifier(sym: Symbol, loc: Loc) -> Self {
        Self {
            kind: TokenKind::Identifier,
            loc,
            value: TokenValue::Sym(sym),
        }
    }

    /// Creates a string literal token.
    #[must_use]
    pub const fn string(sym: Symbol, loc: Loc) -> Self {
        Self {
            kind: TokenKind::String,
            loc,
            value: TokenValue::Sym(sym),
        }
    }

    /// Creates an integer literal token.
    #[must_use]
    pub const fn integer(value: u64, loc: Loc) -> Self {
        Self {
            kind: TokenKind::Integer,
            loc,
            value: TokenValue::Int(value),
        }
    }

    /// Returns true if the token has the given tag.
    #[must_use]
    pub fn isa(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns the symbol of an identifier or string token.
    ///
    /// # Panics
    ///
    /// Panics if the token carries no symbol.
    #[must_use]
    pub fn sym(&self) -> &Symbol {
        match &self.value {
            TokenValue::Sym(sym) => sym,
            _ => panic!("sym() called on a {} token", self.kind),
        }
    }

    /// Returns the value of an integer token.
    ///
    /// # Panics
    ///
    /// Panics if the token is not an integer literal.
    #[must_use]
    pub fn u64(&self) -> u64 {
        match self.value {
            TokenValue::Int(value) => value,
            _ => panic!("u64() called on a {} token", self.kind),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Sym(sym) if self.kind == TokenKind::String => write!(f, "'{sym}'"),
            TokenValue::Sym(sym) => write!(f, "{sym}"),
            TokenValue::Int(value) => write!(f, "{value}"),
            TokenValue::None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Pos;
    use crate::symbol::SymbolTable;

    fn loc(syms: &SymbolTable) -> Loc {
        Loc::at(syms.intern("t"), Pos::new(1, 1))
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("NaTuRaL"), Some(Keyword::Natural));
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_keyword_table_is_consistent() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw));
            assert_eq!(kw.as_str(), kw.as_str().to_ascii_uppercase());
        }
    }

    #[test]
    fn test_aggregates() {
        assert!(Keyword::Count.is_aggregate());
        assert!(Keyword::Max.is_aggregate());
        assert!(!Keyword::Select.is_aggregate());
    }

    #[test]
    fn test_payload_accessors() {
        let syms = SymbolTable::new();
        let id = Token::identifier(syms.intern("foo"), loc(&syms));
        assert_eq!(&**id.sym(), "foo");
        let int = Token::integer(42, loc(&syms));
        assert_eq!(int.u64(), 42);
    }

    #[test]
    #[should_panic(expected = "u64() called on a <identifier> token")]
    fn test_wrong_accessor_panics() {
        let syms = SymbolTable::new();
        let id = Token::identifier(syms.intern("foo"), loc(&syms));
        let _ = id.u64();
    }

    #[test]
    #[should_panic(expected = "sym() called on a ; token")]
    fn test_sym_on_tag_panics() {
        let syms = SymbolTable::new();
        let semi = Token::new(TokenKind::Semicolon, loc(&syms));
        let _ = semi.sym();
    }

    #[test]
    fn test_token_display() {
        let syms = SymbolTable::new();
        assert_eq!(
            Token::new(TokenKind::Keyword(Keyword::From), loc(&syms)).to_string(),
            "FROM"
        );
        assert_eq!(Token::new(TokenKind::NotEq, loc(&syms)).to_string(), "<>");
        assert_eq!(Token::integer(7, loc(&syms)).to_string(), "7");
        assert_eq!(
            Token::string(syms.intern("hi"), loc(&syms)).to_string(),
            "'hi'"
        );
        assert_eq!(
            Token::new(TokenKind::Eof, loc(&syms)).to_string(),
            "<end of file>"
        );
    }
}
