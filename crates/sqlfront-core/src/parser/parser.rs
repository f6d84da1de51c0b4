//! SQL Parser implementation.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::precedence::{binary_prec, token_to_binary_op, token_to_unary_op, unary_prec, Prec};
use crate::ast::{
    Annotations, ColumnDef, Expr, JoinSpec, JoinType, NodeId, Program, Select, SelectElem,
    SimpleValue, Table, UnTableOp,
};
use crate::diagnostic::Driver;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::lexer::{Keyword, Lexer, Loc, Pos, Token, TokenKind};
use crate::symbol::Symbol;

const fn kw(keyword: Keyword) -> TokenKind {
    TokenKind::Keyword(keyword)
}

/// Remembers where a production started.
#[derive(Debug, Clone, Copy)]
struct Tracker {
    begin: Pos,
}

/// SQL Parser.
///
/// The parser never fails: input it cannot make sense of is reported to the
/// [`Driver`] and replaced by [`Expr::Err`] or [`Table::Err`] nodes. Callers
/// inspect the driver's counters to decide whether the result is usable.
pub struct Parser<'d> {
    lexer: Lexer<'d>,
    ahead: Token,
    prev: Loc,
    node_count: u32,
    annotations: Annotations,
}

impl<'d> Parser<'d> {
    /// Creates a new parser for `source` using the generic dialect.
    pub fn new(driver: &'d mut Driver, file: &str, source: &str) -> Self {
        Self::from_lexer(Lexer::new(driver, file, source))
    }

    /// Creates a new parser for raw bytes using `dialect`.
    pub fn with_dialect(
        driver: &'d mut Driver,
        file: &str,
        source: &[u8],
        dialect: &dyn Dialect,
    ) -> Self {
        Self::from_lexer(Lexer::with_dialect(driver, file, source, dialect))
    }

    /// Creates a new parser reading all of `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`](crate::SourceError::Read) if the stream
    /// cannot be read.
    pub fn from_reader(
        driver: &'d mut Driver,
        file: &str,
        reader: impl Read,
        dialect: &dyn Dialect,
    ) -> Result<Self> {
        Ok(Self::from_lexer(Lexer::from_reader(
            driver, file, reader, dialect,
        )?))
    }

    /// Creates a new parser for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`](crate::SourceError) if the file cannot be
    /// opened or read.
    pub fn from_path(
        driver: &'d mut Driver,
        path: impl AsRef<Path>,
        dialect: &dyn Dialect,
    ) -> Result<Self> {
        Ok(Self::from_lexer(Lexer::from_path(driver, path, dialect)?))
    }

    /// Creates a parser over an existing lexer and primes the lookahead.
    pub fn from_lexer(mut lexer: Lexer<'d>) -> Self {
        let prev = lexer.loc();
        let ahead = lexer.lex();
        Self {
            lexer,
            ahead,
            prev,
            node_count: 0,
            annotations: Annotations::new(),
        }
    }

    /// Returns the driver diagnostics are reported to.
    pub fn driver(&mut self) -> &mut Driver {
        self.lexer.driver()
    }

    /// Returns the annotations recorded so far.
    #[must_use]
    pub const fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Consumes the parser and returns its annotations.
    #[must_use]
    pub fn into_annotations(self) -> Annotations {
        self.annotations
    }

    /// Parses statements separated by `;` until the end of the input.
    pub fn parse_program(&mut self) -> Program {
        let track = self.tracker();
        let mut stmts = Vec::new();

        while !self.ahead.is_eof() {
            let stmt = self.parse_expr(Some("statement"), Prec::Bottom);
            if stmt.is_err() && !self.ahead.is_eof() {
                self.lex();
            }
            self.expect(TokenKind::Semicolon, "end of statement");
            stmts.push(stmt);
        }

        let program = Program {
            loc: self.loc(track),
            stmts,
        };
        let errors = self.driver().num_errors();
        debug!(
            file = %program.loc.file,
            statements = program.stmts.len(),
            errors,
            "parsed program"
        );
        program
    }

    /// Parses a single expression that must span the whole input.
    pub fn parse(&mut self) -> Expr {
        let expr = self.parse_expr(Some("expression"), Prec::Bottom);
        self.expect(TokenKind::Eof, "end of input");
        expr
    }

    /// Parses an expression whose operators bind tighter than `cur`.
    ///
    /// With `ctxt == None` the caller guarantees that an expression starts
    /// here; failing to find one is an internal parser error.
    ///
    /// # Panics
    ///
    /// Panics if `ctxt` is `None` and the lookahead cannot start an
    /// expression.
    pub fn parse_expr(&mut self, ctxt: Option<&str>, cur: Prec) -> Expr {
        let track = self.tracker();
        let mut lhs = self.parse_primary_or_unary_expr(ctxt);

        loop {
            if self.ahead.isa(kw(Keyword::Between)) {
                if Prec::Between <= cur {
                    break;
                }
                self.lex();
                let low = self.parse_expr(Some("lower bound of BETWEEN"), Prec::Between);
                self.expect(kw(Keyword::And), "BETWEEN expression");
                let high = self.parse_expr(Some("upper bound of BETWEEN"), Prec::Between);
                lhs = Expr::Between {
                    loc: self.loc(track),
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                };
                continue;
            }

            let Some(op) = token_to_binary_op(self.ahead.kind) else {
                break;
            };
            let prec = binary_prec(op);
            if prec <= cur {
                break;
            }

            self.lex();
            let ctxt = format!("right-hand side of operator '{op}'");
            let rhs = self.parse_expr(Some(&ctxt), prec);
            lhs = Expr::Bin {
                loc: self.loc(track),
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        lhs
    }

    // ==================== Expressions ====================

    fn parse_primary_or_unary_expr(&mut self, ctxt: Option<&str>) -> Expr {
        let track = self.tracker();

        if let Some(op) = token_to_unary_op(self.ahead.kind) {
            self.lex();
            let rhs = self.parse_expr(Some("unary expression"), unary_prec(op));
            return Expr::Un {
                loc: self.loc(track),
                op,
                rhs: Box::new(rhs),
            };
        }

        match self.ahead.kind {
            TokenKind::Identifier => self.parse_id_or_call(),
            TokenKind::Integer => {
                let tok = self.lex();
                Expr::Int {
                    value: tok.u64(),
                    loc: tok.loc,
                }
            }
            TokenKind::String => {
                let tok = self.lex();
                Expr::Str {
                    sym: tok.sym().clone(),
                    loc: tok.loc,
                }
            }
            TokenKind::Keyword(Keyword::True) => self.parse_simple(SimpleValue::True),
            TokenKind::Keyword(Keyword::False) => self.parse_simple(SimpleValue::False),
            TokenKind::Keyword(Keyword::Unknown) => self.parse_simple(SimpleValue::Unknown),
            TokenKind::Keyword(Keyword::Null) => self.parse_simple(SimpleValue::Null),
            TokenKind::Keyword(keyword) if keyword.is_aggregate() => {
                self.parse_aggregate(keyword)
            }
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Select) => Expr::Select(Box::new(self.parse_select())),
            TokenKind::LeftParen => {
                self.eat(TokenKind::LeftParen);
                let expr = self.parse_expr(Some("parenthesized expression"), Prec::Bottom);
                self.expect(TokenKind::RightParen, "parenthesized expression");
                expr
            }
            _ => self.error_expr("primary or unary expression", ctxt),
        }
    }

    fn parse_simple(&mut self, value: SimpleValue) -> Expr {
        let tok = self.lex();
        Expr::Simple {
            loc: tok.loc,
            value,
        }
    }

    /// Parses `a`, `a.b.c`, `a.b.*` or a call `f(...)`.
    fn parse_id_or_call(&mut self) -> Expr {
        let track = self.tracker();
        let first = self.eat(TokenKind::Identifier);

        if self.ahead.isa(TokenKind::LeftParen) {
            return self.parse_call(track, first.sym().clone(), false);
        }

        let mut syms = vec![first.sym().clone()];
        let mut asterisk = false;
        while self.accept(TokenKind::Dot).is_some() {
            if self.accept(TokenKind::Star).is_some() {
                asterisk = true;
                break;
            }
            syms.push(self.parse_sym("identifier chain"));
        }

        let id = self.fresh_id();
        Expr::Id {
            loc: self.loc(track),
            id,
            syms,
            asterisk,
        }
    }

    fn parse_aggregate(&mut self, keyword: Keyword) -> Expr {
        let track = self.tracker();
        self.eat(kw(keyword));
        if !self.ahead.isa(TokenKind::LeftParen) {
            return self.error_expr("(", Some("aggregate function"));
        }
        let name = self.driver().sym(&keyword.as_str().to_ascii_lowercase());
        self.parse_call(track, name, true)
    }

    /// Parses the parenthesized part of a call; the name is consumed.
    fn parse_call(&mut self, track: Tracker, name: Symbol, aggregate: bool) -> Expr {
        self.eat(TokenKind::LeftParen);
        let distinct = self.accept(kw(Keyword::Distinct)).is_some();
        let mut args = Vec::new();

        if aggregate && !distinct && self.ahead.isa(TokenKind::Star) {
            let star = self.lex();
            let id = self.fresh_id();
            self.annotations.allow_asterisk(id);
            args.push(Expr::Id {
                loc: star.loc,
                id,
                syms: Vec::new(),
                asterisk: true,
            });
        } else if !self.ahead.isa(TokenKind::RightParen) {
            loop {
                let arg = self.parse_expr(Some("argument list"), Prec::Bottom);
                if aggregate {
                    self.allow_asterisk(&arg);
                }
                args.push(arg);
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "argument list");
        Expr::Func {
            loc: self.loc(track),
            name,
            distinct,
            args,
        }
    }

    // ==================== CREATE TABLE ====================

    fn parse_create(&mut self) -> Expr {
        let track = self.tracker();
        self.eat(kw(Keyword::Create));
        self.expect(kw(Keyword::Table), "CREATE TABLE statement");
        let name = self.parse_sym("CREATE TABLE statement");

        let mut columns = Vec::new();
        if self.expect(TokenKind::LeftParen, "column list") {
            if !self.ahead.isa(TokenKind::RightParen) {
                loop {
                    columns.push(self.parse_column_def());
                    if self.accept(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RightParen, "column list");
        }

        Expr::Create {
            loc: self.loc(track),
            name,
            columns,
        }
    }

    fn parse_column_def(&mut self) -> ColumnDef {
        let track = self.tracker();
        let name = self.parse_sym("column definition");
        let ty = self.parse_sym("column type");

        let mut args = Vec::new();
        if self.accept(TokenKind::LeftParen).is_some() {
            loop {
                match self.accept(TokenKind::Integer) {
                    Some(tok) => args.push(tok.u64()),
                    None => {
                        self.err("integer literal", "type arguments");
                        break;
                    }
                }
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::RightParen, "type arguments");
        }

        ColumnDef {
            loc: self.loc(track),
            name,
            ty,
            args,
        }
    }

    // ==================== SELECT ====================

    fn parse_select(&mut self) -> Select {
        let track = self.tracker();
        self.eat(kw(Keyword::Select));

        let distinct = if self.accept(kw(Keyword::Distinct)).is_some() {
            true
        } else {
            self.accept(kw(Keyword::All));
            false
        };

        let mut elems = Vec::new();
        if self.accept(TokenKind::Star).is_none() {
            loop {
                elems.push(self.parse_select_elem());
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let mut from = Vec::new();
        if self.expect(kw(Keyword::From), "SELECT statement") {
            loop {
                from.push(self.parse_table(Some("FROM clause"), Prec::Bottom));
                if self.accept(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let where_clause = self
            .accept(kw(Keyword::Where))
            .map(|_| self.parse_expr(Some("WHERE clause"), Prec::Bottom));

        let group_by = self.accept(kw(Keyword::Group)).map(|_| {
            self.expect(kw(Keyword::By), "GROUP BY clause");
            self.parse_expr(Some("GROUP BY clause"), Prec::Bottom)
        });

        let having = self
            .accept(kw(Keyword::Having))
            .map(|_| self.parse_expr(Some("HAVING clause"), Prec::Bottom));

        Select {
            loc: self.loc(track),
            distinct,
            elems,
            from,
            where_clause,
            group_by,
            having,
        }
    }

    fn parse_select_elem(&mut self) -> SelectElem {
        let track = self.tracker();
        let expr = self.parse_expr(Some("select list"), Prec::Bottom);
        self.allow_asterisk(&expr);

        let mut aliases = Vec::new();
        if self.accept(kw(Keyword::As)).is_some() {
            if self.accept(TokenKind::LeftParen).is_some() {
                aliases = self.parse_sym_list("alias list");
                self.expect(TokenKind::RightParen, "alias list");
            } else {
                aliases.push(self.parse_sym("alias"));
            }
        }

        SelectElem {
            loc: self.loc(track),
            expr,
            aliases,
        }
    }

    // ==================== Tables ====================

    /// Parses a table reference and the joins that follow it while they
    /// bind tighter than `cur`.
    fn parse_table(&mut self, ctxt: Option<&str>, cur: Prec) -> Table {
        let track = self.tracker();
        let mut lhs = self.parse_primary_table(ctxt);

        while Prec::Join > cur {
            let Some(kind) = self.parse_join_op() else {
                break;
            };
            let rhs = self.parse_table(Some("right-hand side of join"), Prec::Join);

            let spec_track = self.tracker();
            let spec = self.parse_join_spec();
            if spec.is_some() && !kind.takes_spec() {
                let loc = self.loc(spec_track);
                self.driver()
                    .err(loc, format!("{kind} does not take an ON or USING clause"));
            }

            lhs = Table::Join {
                loc: self.loc(track),
                lhs: Box::new(lhs),
                kind,
                rhs: Box::new(rhs),
                spec,
            };
        }

        lhs
    }

    fn parse_primary_table(&mut self, ctxt: Option<&str>) -> Table {
        let track = self.tracker();

        match self.ahead.kind {
            TokenKind::Identifier => {
                let mut syms = vec![self.lex().sym().clone()];
                while self.accept(TokenKind::Dot).is_some() {
                    syms.push(self.parse_sym("table name"));
                }
                let alias = self.parse_alias();
                Table::Id {
                    loc: self.loc(track),
                    syms,
                    alias,
                }
            }
            TokenKind::Keyword(Keyword::Lateral) => {
                self.lex();
                let rhs = self.parse_primary_table(Some("LATERAL table"));
                Table::Un {
                    loc: self.loc(track),
                    op: UnTableOp::Lateral,
                    rhs: Box::new(rhs),
                }
            }
            TokenKind::LeftParen => {
                self.lex();
                if self.ahead.isa(kw(Keyword::Select)) {
                    let select = self.parse_select();
                    self.expect(TokenKind::RightParen, "derived table");
                    let alias = self.parse_alias();
                    Table::Select {
                        loc: self.loc(track),
                        select: Box::new(select),
                        alias,
                    }
                } else {
                    let rhs = self.parse_table(Some("parenthesized table"), Prec::Bottom);
                    self.expect(TokenKind::RightParen, "parenthesized table");
                    Table::Un {
                        loc: self.loc(track),
                        op: UnTableOp::Paren,
                        rhs: Box::new(rhs),
                    }
                }
            }
            _ => {
                let Some(ctxt) = ctxt else {
                    self.internal_error("table")
                };
                self.err("table", ctxt);
                Table::Err {
                    loc: self.prev.clone(),
                }
            }
        }
    }

    fn parse_alias(&mut self) -> Option<Symbol> {
        self.accept(kw(Keyword::As))
            .map(|_| self.parse_sym("alias"))
    }

    /// Parses a join operator, or returns `None` if no join starts here.
    fn parse_join_op(&mut self) -> Option<JoinType> {
        if self.accept(kw(Keyword::Cross)).is_some() {
            self.expect(kw(Keyword::Join), "CROSS JOIN");
            return Some(JoinType::Cross);
        }

        let mut flags = 0;
        let mut qualified = false;
        if self.accept(kw(Keyword::Natural)).is_some() {
            flags |= JoinType::NATURAL;
            qualified = true;
        }

        let outer = match self.ahead.kind {
            TokenKind::Keyword(Keyword::Inner) => Some(0),
            TokenKind::Keyword(Keyword::Left) => Some(JoinType::LEFT),
            TokenKind::Keyword(Keyword::Right) => Some(JoinType::RIGHT),
            TokenKind::Keyword(Keyword::Full) => Some(JoinType::FULL),
            _ => None,
        };
        if let Some(side) = outer {
            self.lex();
            if side != 0 {
                self.accept(kw(Keyword::Outer));
            }
            flags |= side;
            qualified = true;
        }

        if !qualified && !self.ahead.isa(kw(Keyword::Join)) {
            return None;
        }
        self.expect(kw(Keyword::Join), "join operator");
        Some(JoinType::from_flags(flags))
    }

    fn parse_join_spec(&mut self) -> Option<JoinSpec> {
        if self.accept(kw(Keyword::On)).is_some() {
            let expr = self.parse_expr(Some("ON clause"), Prec::Bottom);
            return Some(JoinSpec::On(expr));
        }
        if self.accept(kw(Keyword::Using)).is_some() {
            self.expect(TokenKind::LeftParen, "USING clause");
            let columns = self.parse_sym_list("USING clause");
            self.expect(TokenKind::RightParen, "USING clause");
            return Some(JoinSpec::Using(columns));
        }
        None
    }

    // ==================== Helpers ====================

    fn parse_sym(&mut self, ctxt: &str) -> Symbol {
        if self.ahead.isa(TokenKind::Identifier) {
            return self.lex().sym().clone();
        }
        self.err("identifier", ctxt);
        self.driver().sym("<error>")
    }

    fn parse_sym_list(&mut self, ctxt: &str) -> Vec<Symbol> {
        let mut syms = Vec::new();
        loop {
            syms.push(self.parse_sym(ctxt));
            if self.accept(TokenKind::Comma).is_none() {
                break;
            }
        }
        syms
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId::new(self.node_count);
        self.node_count += 1;
        id
    }

    fn allow_asterisk(&mut self, expr: &Expr) {
        if let Some(id) = expr.node_id() {
            self.annotations.allow_asterisk(id);
        }
    }

    fn tracker(&self) -> Tracker {
        Tracker {
            begin: self.ahead.loc.begin,
        }
    }

    /// Span from the tracked start to the last consumed token.
    fn loc(&self, track: Tracker) -> Loc {
        Loc::new(
            self.prev.file.clone(),
            track.begin,
            self.prev.finis.max(track.begin),
        )
    }

    fn lex(&mut self) -> Token {
        let next = self.lexer.lex();
        let tok = std::mem::replace(&mut self.ahead, next);
        self.prev = tok.loc.clone();
        tok
    }

    fn accept(&mut self, kind: TokenKind) -> Option<Token> {
        if self.ahead.isa(kind) {
            Some(self.lex())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, ctxt: &str) -> bool {
        if self.accept(kind).is_some() {
            return true;
        }
        self.err(kind.as_str(), ctxt);
        false
    }

    /// Consumes a token the grammar has already checked.
    fn eat(&mut self, kind: TokenKind) -> Token {
        if !self.ahead.isa(kind) {
            self.internal_error(kind.as_str());
        }
        self.lex()
    }

    fn err(&mut self, what: &str, ctxt: &str) {
        let msg = format!(
            "expected '{what}', got '{}' while parsing {ctxt}",
            self.ahead
        );
        let loc = self.ahead.loc.clone();
        self.driver().err(loc, msg);
    }

    fn error_expr(&mut self, what: &str, ctxt: Option<&str>) -> Expr {
        let Some(ctxt) = ctxt else {
            self.internal_error(what)
        };
        self.err(what, ctxt);
        Expr::Err {
            loc: self.prev.clone(),
        }
    }

    fn internal_error(&self, what: &str) -> ! {
        panic!(
            "internal parser error: expected '{what}', got '{}' at {}",
            self.ahead, self.ahead.loc
        )
    }
}
