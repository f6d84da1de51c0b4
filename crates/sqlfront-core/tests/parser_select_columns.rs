//! Tests for the SELECT list: `*`, expressions, aliases and DISTINCT.

mod common;
use common::*;

#[test]
fn select_star() {
    let s = parse_select("SELECT * FROM t;");
    assert!(s.elems.is_empty());
    assert!(!s.distinct);
    assert_eq!(parse("SELECT * FROM t;").to_string(), "SELECT * FROM t;\n");
}

#[test]
fn select_aliases() {
    let s = parse_select("SELECT a AS x, b FROM t;");
    assert_eq!(s.elems.len(), 2);
    let aliases: Vec<_> = s.elems[0].aliases.iter().map(|a| a.as_str()).collect();
    assert_eq!(aliases, ["x"]);
    assert!(s.elems[1].aliases.is_empty());
}

#[test]
fn select_alias_list() {
    let s = parse_select("SELECT a AS (x, y) FROM t;");
    assert_eq!(s.elems.len(), 1);
    let aliases: Vec<_> = s.elems[0].aliases.iter().map(|a| a.as_str()).collect();
    assert_eq!(aliases, ["x", "y"]);
    assert_eq!(
        parse("SELECT a AS (x, y) FROM t;").to_string(),
        "SELECT a AS (x, y) FROM t;\n"
    );
}

#[test]
fn select_distinct_and_all() {
    assert!(parse_select("SELECT DISTINCT a FROM t;").distinct);
    assert!(!parse_select("SELECT ALL a FROM t;").distinct);
    assert!(parse_select("SELECT DISTINCT * FROM t;").elems.is_empty());
}

#[test]
fn select_expressions() {
    let s = parse_select("SELECT a + 1, 'x', count(*) AS n FROM t;");
    assert_eq!(s.elems.len(), 3);
    assert_eq!(s.elems[0].expr.to_string(), "(a + 1)");
    assert_eq!(s.elems[2].to_string(), "COUNT(*) AS n");
}

#[test]
fn missing_alias_name() {
    let parsed = parse_err("SELECT a AS FROM t;");
    assert_eq!(
        parsed.messages()[0],
        "expected 'identifier', got 'FROM' while parsing alias"
    );
}

#[test]
fn select_columns_round_trip() {
    round_trip("SELECT DISTINCT a AS x, b.c AS (p, q), t.* FROM t;");
    round_trip("SELECT ALL * FROM t;");
}
