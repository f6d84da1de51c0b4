//! SQL Tokenizer implementation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::{Keyword, Loc, Pos, Token, TokenKind};
use crate::diagnostic::Driver;
use crate::dialect::{Dialect, GenericDialect, LiteralOverflow};
use crate::error::{Result, SourceError};
use crate::symbol::Symbol;

/// One decoded unit of input: a character or a malformed UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Invalid,
}

fn decode(bytes: &[u8]) -> Vec<Unit> {
    let mut units = Vec::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        units.extend(chunk.valid().chars().map(Unit::Char));
        if !chunk.invalid().is_empty() {
            units.push(Unit::Invalid);
        }
    }
    units
}

/// A lexer that tokenizes SQL input.
///
/// Problems in the input are reported to the [`Driver`] and skipped; [`lex`]
/// always produces a token. Once the input is exhausted every call returns
/// [`TokenKind::Eof`].
///
/// [`lex`]: Lexer::lex
pub struct Lexer<'d> {
    driver: &'d mut Driver,
    file: Symbol,
    units: Vec<Unit>,
    /// Index of the next unit.
    idx: usize,
    /// Position of the next unit.
    peek: Pos,
    /// Position of the last consumed unit.
    last: Pos,
    /// Position of the first unit of the current token.
    begin: Pos,
    /// Text of the current word or literal.
    text: String,
    keywords: FxHashMap<Symbol, Keyword>,
    dash_comments: bool,
    overflow: LiteralOverflow,
}

impl<'d> Lexer<'d> {
    /// Creates a lexer over `source` using the generic dialect.
    pub fn new(driver: &'d mut Driver, file: &str, source: &str) -> Self {
        Self::with_dialect(driver, file, source.as_bytes(), &GenericDialect::new())
    }

    /// Creates a lexer over raw bytes using `dialect`.
    ///
    /// Malformed UTF-8 is reported when the lexer reaches it, not here.
    pub fn with_dialect(
        driver: &'d mut Driver,
        file: &str,
        source: &[u8],
        dialect: &dyn Dialect,
    ) -> Self {
        let file = driver.sym(file);
        let keywords = Keyword::ALL
            .iter()
            .map(|kw| (driver.sym(&kw.as_str().to_ascii_lowercase()), *kw))
            .collect();
        let start = Pos::new(1, 1);
        trace!(file = %file, dialect = dialect.name(), "lexer created");
        Self {
            driver,
            file,
            units: decode(source),
            idx: 0,
            peek: start,
            last: start,
            begin: start,
            text: String::new(),
            keywords,
            dash_comments: dialect.line_comment_dashes(),
            overflow: dialect.literal_overflow(),
        }
    }

    /// Reads all of `reader` and creates a lexer over it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] if the stream cannot be read.
    pub fn from_reader(
        driver: &'d mut Driver,
        file: &str,
        mut reader: impl Read,
        dialect: &dyn Dialect,
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| SourceError::Read {
                name: file.to_owned(),
                source,
            })?;
        Ok(Self::with_dialect(driver, file, &bytes, dialect))
    }

    /// Opens `path` and creates a lexer over its contents.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] or [`SourceError::Read`] if the file
    /// cannot be opened or read.
    pub fn from_path(
        driver: &'d mut Driver,
        path: impl AsRef<Path>,
        dialect: &dyn Dialect,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(driver, &path.display().to_string(), file, dialect)
    }

    /// Returns the driver this lexer reports to.
    pub fn driver(&mut self) -> &mut Driver {
        self.driver
    }

    /// Returns the symbol of the file being lexed.
    #[must_use]
    pub const fn file(&self) -> &Symbol {
        &self.file
    }

    /// Returns a zero-width location at the current read position.
    #[must_use]
    pub fn loc(&self) -> Loc {
        Loc::at(self.file.clone(), self.peek)
    }

    /// Scans the next token.
    pub fn lex(&mut self) -> Token {
        let token = self.scan();
        trace!(kind = %token.kind, loc = %token.loc, "token");
        token
    }

    /// Tokenizes the rest of the input, including the final EOF token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.lex();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn ahead(&self) -> Option<Unit> {
        self.units.get(self.idx).copied()
    }

    fn ahead_char(&self) -> Option<char> {
        match self.ahead() {
            Some(Unit::Char(c)) => Some(c),
            _ => None,
        }
    }

    /// Consumes one unit and updates the positions.
    fn next(&mut self) {
        let Some(unit) = self.ahead() else { return };
        self.idx += 1;
        self.last = self.peek;
        if unit == Unit::Char('\n') {
            self.peek.row += 1;
            self.peek.col = 1;
        } else {
            self.peek.col += 1;
        }
    }

    fn accept(&mut self, c: char) -> bool {
        if self.ahead_char() == Some(c) {
            self.next();
            true
        } else {
            false
        }
    }

    fn accept_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        let c = self.ahead_char().filter(|&c| pred(c))?;
        self.next();
        Some(c)
    }

    /// Location of the current token: its first through last consumed unit.
    fn token_loc(&self) -> Loc {
        Loc::new(self.file.clone(), self.begin, self.last)
    }

    /// Location of the unit consumed last.
    fn last_loc(&self) -> Loc {
        Loc::at(self.file.clone(), self.last)
    }

    fn scan(&mut self) -> Token {
        loop {
            self.begin = self.peek;
            self.text.clear();

            let c = match self.ahead() {
                None => return Token::new(TokenKind::Eof, self.loc()),
                Some(Unit::Invalid) => {
                    self.next();
                    let loc = self.token_loc();
                    self.driver.err(loc, "invalid UTF-8 character");
                    continue;
                }
                Some(Unit::Char(c)) => c,
            };
            self.next();

            let kind = match c {
                c if c.is_whitespace() => continue,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                '[' => TokenKind::LeftBracket,
                ']' => TokenKind::RightBracket,
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '<' => {
                    if self.accept('>') {
                        TokenKind::NotEq
                    } else if self.accept('=') {
                        TokenKind::LtEq
                    } else {
                        TokenKind::Lt
                    }
                }
                '>' => {
                    if self.accept('=') {
                        TokenKind::GtEq
                    } else {
                        TokenKind::Gt
                    }
                }
                ':' => {
                    if self.accept('=') {
                        TokenKind::Assign
                    } else {
                        TokenKind::Colon
                    }
                }
                '=' => TokenKind::Eq,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                ';' => TokenKind::Semicolon,
                '+' => TokenKind::Plus,
                '*' => TokenKind::Star,
                '-' => {
                    if self.dash_comments && self.accept('-') {
                        self.eat_line_comment();
                        continue;
                    }
                    TokenKind::Minus
                }
                '/' => {
                    if self.accept('*') {
                        self.eat_block_comment();
                        continue;
                    }
                    if self.accept('/') {
                        self.eat_line_comment();
                        continue;
                    }
                    TokenKind::Slash
                }
                '\'' => {
                    self.lex_quoted('\'');
                    let sym = self.driver.sym(&self.text);
                    return Token::string(sym, self.token_loc());
                }
                '"' => {
                    self.lex_quoted('"');
                    let sym = self.driver.sym(&self.text);
                    return Token::identifier(sym, self.token_loc());
                }
                c if c.is_ascii_digit() => return self.lex_integer(c),
                c if c == '_' || c.is_ascii_alphabetic() => return self.lex_word(c),
                c => {
                    let loc = self.token_loc();
                    self.driver.err(loc, format!("invalid input character: '{c}'"));
                    continue;
                }
            };

            return Token::new(kind, self.token_loc());
        }
    }

    fn eat_line_comment(&mut self) {
        while self.ahead().is_some() && self.ahead_char() != Some('\n') {
            self.next();
        }
    }

    fn eat_block_comment(&mut self) {
        loop {
            match self.ahead() {
                None => {
                    let loc = self.token_loc();
                    self.driver.err(loc, "non-terminated multiline comment");
                    return;
                }
                Some(Unit::Char('*')) => {
                    self.next();
                    if self.accept('/') {
                        return;
                    }
                }
                Some(_) => self.next(),
            }
        }
    }

    /// Lexes an unsigned integer literal whose first digit is consumed.
    fn lex_integer(&mut self, first: char) -> Token {
        self.text.push(first);
        while let Some(d) = self.accept_if(|c| c.is_ascii_digit()) {
            self.text.push(d);
        }

        let value = match self.text.parse::<u64>() {
            Ok(value) => value,
            Err(_) => match self.overflow {
                LiteralOverflow::Reject => {
                    let loc = self.token_loc();
                    let msg = format!("integer literal '{}' does not fit into 64 bits", self.text);
                    self.driver.err(loc, msg);
                    u64::MAX
                }
                LiteralOverflow::Saturate => u64::MAX,
                LiteralOverflow::Wrap => self.text.bytes().fold(0_u64, |acc, d| {
                    acc.wrapping_mul(10).wrapping_add(u64::from(d - b'0'))
                }),
            },
        };
        Token::integer(value, self.token_loc())
    }

    /// Lexes an identifier or keyword whose first character is consumed.
    fn lex_word(&mut self, first: char) -> Token {
        self.text.push(first.to_ascii_lowercase());
        while let Some(c) = self.accept_if(|c| c == '_' || c.is_ascii_alphanumeric()) {
            self.text.push(c.to_ascii_lowercase());
        }

        let sym = self.driver.sym(&self.text);
        match self.keywords.get(&sym) {
            Some(kw) => Token::new(TokenKind::Keyword(*kw), self.token_loc()),
            None => Token::identifier(sym, self.token_loc()),
        }
    }

    /// Lexes the body of a quoted literal into `self.text`; the opening
    /// quote is consumed.
    fn lex_quoted(&mut self, quote: char) {
        loop {
            match self.ahead() {
                None => {
                    let loc = self.token_loc();
                    self.driver.err(loc, "unterminated string literal");
                    return;
                }
                Some(Unit::Char(c)) if c == quote => {
                    self.next();
                    return;
                }
                Some(Unit::Char('\\')) => {
                    self.next();
                    self.lex_escape();
                }
                Some(Unit::Char(c)) => {
                    self.next();
                    self.text.push(c);
                }
                Some(Unit::Invalid) => {
                    self.next();
                    let loc = self.last_loc();
                    self.driver.err(loc, "invalid UTF-8 character");
                }
            }
        }
    }

    /// Lexes the character after a backslash.
    fn lex_escape(&mut self) {
        // EOF and malformed input are left to the enclosing literal loop.
        let Some(c) = self.ahead_char() else { return };
        self.next();
        let value = match c {
            '\'' => '\'',
            '\\' => '\\',
            '"' => '"',
            '0' => '\0',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            other => {
                let loc = self.last_loc();
                self.driver
                    .err(loc, format!("invalid escape character '\\{other}'"));
                other
            }
        };
        self.text.push(value);
    }
}
