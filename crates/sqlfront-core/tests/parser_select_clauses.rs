//! Tests for WHERE, GROUP BY and HAVING.

mod common;
use common::*;

#[test]
fn where_clause() {
    let s = parse_select("SELECT * FROM t WHERE a = 1 AND b <> 'x';");
    let where_clause = s.where_clause.expect("WHERE");
    assert_eq!(where_clause.to_string(), "((a = 1) AND (b <> 'x'))");
    assert!(s.group_by.is_none());
    assert!(s.having.is_none());
}

#[test]
fn group_by_and_having() {
    let s = parse_select("SELECT a, count(*) FROM t GROUP BY a HAVING count(*) > 1;");
    assert_eq!(s.group_by.expect("GROUP BY").to_string(), "a");
    assert_eq!(s.having.expect("HAVING").to_string(), "(COUNT(*) > 1)");
}

#[test]
fn all_clauses() {
    let sql = "SELECT DISTINCT a.x AS k, sum(b.y) FROM a JOIN b ON a.id = b.aid \
               WHERE b.y > 0 GROUP BY a.x HAVING sum(b.y) < 100;";
    let s = parse_select(sql);
    assert!(s.distinct);
    assert_eq!(s.elems.len(), 2);
    assert_eq!(s.from.len(), 1);
    assert!(s.where_clause.is_some());
    assert!(s.group_by.is_some());
    assert!(s.having.is_some());
    round_trip(sql);
}

#[test]
fn group_without_by() {
    let parsed = parse_err("SELECT a FROM t GROUP a;");
    assert_eq!(
        parsed.messages(),
        ["expected 'BY', got 'a' while parsing GROUP BY clause"]
    );
}

#[test]
fn empty_where() {
    let parsed = parse_err("SELECT a FROM t WHERE;");
    assert_eq!(
        parsed.messages(),
        ["expected 'primary or unary expression', got ';' while parsing WHERE clause"]
    );
}

#[test]
fn several_statements() {
    let program = parse("SELECT a FROM t; SELECT b FROM u WHERE b; CREATE TABLE v (x int);");
    assert_eq!(program.stmts.len(), 3);
    assert_eq!(
        program.to_string(),
        "SELECT a FROM t;\nSELECT b FROM u WHERE b;\nCREATE TABLE v (x int);\n"
    );
}

#[test]
fn clauses_round_trip() {
    round_trip("SELECT a FROM t WHERE NOT a GROUP BY a + 1 HAVING a BETWEEN 1 AND 2;");
}
