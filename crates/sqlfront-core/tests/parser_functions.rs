//! Tests for aggregate and function calls.

mod common;
use common::*;

use sqlfront_core::ast::Expr;

#[test]
fn count_star() {
    let Expr::Func {
        name,
        distinct,
        args,
        ..
    } = parse_expr("COUNT(*)")
    else {
        panic!("expected call");
    };
    assert_eq!(name.as_str(), "count");
    assert!(!distinct);
    assert_eq!(args.len(), 1);
    assert!(matches!(
        &args[0],
        Expr::Id { syms, asterisk: true, .. } if syms.is_empty()
    ));
}

#[test]
fn aggregate_with_distinct() {
    let Expr::Func {
        name,
        distinct,
        args,
        ..
    } = parse_expr("sum(DISTINCT price)")
    else {
        panic!("expected call");
    };
    assert_eq!(name.as_str(), "sum");
    assert!(distinct);
    assert_eq!(chain(&args[0]), ["price"]);
}

#[test]
fn every_aggregate() {
    for name in ["count", "sum", "avg", "min", "max"] {
        let sql = format!("{name}(x)");
        assert_eq!(
            render_expr(&sql),
            format!("{}(x)", name.to_ascii_uppercase())
        );
    }
}

#[test]
fn aggregate_of_expression() {
    assert_eq!(render_expr("AVG(a + b * 2)"), "AVG((a + (b * 2)))");
}

#[test]
fn identifier_calls() {
    let Expr::Func { name, args, .. } = parse_expr("coalesce(a, b, 0)") else {
        panic!("expected call");
    };
    assert_eq!(name.as_str(), "coalesce");
    assert_eq!(args.len(), 3);
    assert_eq!(render_expr("now()"), "now()");
    assert_eq!(render_expr("f(g(x), 1)"), "f(g(x), 1)");
}

#[test]
fn qualified_name_is_not_a_call() {
    // Only a bare identifier followed by `(` starts a call.
    let parsed = parse_with_diagnostics("SELECT a.f(x) FROM t;");
    assert!(parsed.num_errors > 0);
}

#[test]
fn aggregate_without_parentheses() {
    let parsed = parse_err("SELECT count FROM t;");
    assert_eq!(
        parsed.messages()[0],
        "expected '(', got 'FROM' while parsing aggregate function"
    );
}

#[test]
fn unclosed_argument_list() {
    let parsed = parse_err("SELECT max(a FROM t;");
    assert_eq!(
        parsed.messages()[0],
        "expected ')', got 'FROM' while parsing argument list"
    );
}

#[test]
fn functions_round_trip() {
    round_trip("SELECT count(*), COUNT(DISTINCT a), lower(name) FROM t GROUP BY a;");
}
