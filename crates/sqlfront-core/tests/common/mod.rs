#![allow(dead_code)]

use sqlfront_core::ast::{Annotations, Expr, Program, Select, Table};
use sqlfront_core::{Diagnostic, Driver, Parser};

/// Routes log events to the test harness; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Everything one parse produces.
pub struct Parsed {
    pub program: Program,
    pub annotations: Annotations,
    pub diagnostics: Vec<Diagnostic>,
    pub num_errors: usize,
}

impl Parsed {
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

pub fn parse_with_diagnostics(sql: &str) -> Parsed {
    init_tracing();
    let mut driver = Driver::new();
    let mut parser = Parser::new(&mut driver, "test.sql", sql);
    let program = parser.parse_program();
    let annotations = parser.into_annotations();
    Parsed {
        program,
        annotations,
        num_errors: driver.num_errors(),
        diagnostics: driver.take_diagnostics(),
    }
}

pub fn parse(sql: &str) -> Program {
    let parsed = parse_with_diagnostics(sql);
    assert!(
        parsed.diagnostics.is_empty(),
        "Failed to parse: {sql}\nDiagnostics: {:#?}",
        parsed.diagnostics
    );
    parsed.program
}

pub fn parse_err(sql: &str) -> Parsed {
    let parsed = parse_with_diagnostics(sql);
    assert!(parsed.num_errors > 0, "Expected parse error for: {sql}");
    parsed
}

pub fn parse_stmt(sql: &str) -> Expr {
    let mut program = parse(sql);
    assert_eq!(program.stmts.len(), 1, "Expected one statement in: {sql}");
    program.stmts.remove(0)
}

pub fn parse_select(sql: &str) -> Select {
    match parse_stmt(sql) {
        Expr::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Returns the single FROM item of a SELECT.
pub fn parse_from(sql: &str) -> Table {
    let mut select = parse_select(sql);
    assert_eq!(select.from.len(), 1, "Expected one FROM item in: {sql}");
    select.from.remove(0)
}

/// Parses a standalone expression.
pub fn parse_expr(sql: &str) -> Expr {
    init_tracing();
    let mut driver = Driver::new();
    let expr = Parser::new(&mut driver, "test.sql", sql).parse();
    assert!(
        !driver.has_errors(),
        "Failed to parse: {sql}\nDiagnostics: {:#?}",
        driver.diagnostics()
    );
    expr
}

pub fn render_expr(sql: &str) -> String {
    parse_expr(sql).to_string()
}

/// Text of an identifier chain.
pub fn chain(expr: &Expr) -> Vec<&str> {
    match expr {
        Expr::Id { syms, .. } => syms.iter().map(|s| s.as_str()).collect(),
        other => panic!("Expected identifier, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
