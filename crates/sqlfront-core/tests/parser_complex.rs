//! Larger programs mixing every supported construct.

mod common;
use common::*;

use sqlfront_core::ast::{Expr, JoinType, Table};

const REPORT: &str = "
// monthly revenue per customer
CREATE TABLE customer (id int, name varchar(80), region char(2));
CREATE TABLE invoice (id int, customer_id int, total decimal(12, 2));

/* customers with more than ten invoices */
SELECT DISTINCT c.name AS customer, count(*) AS n, sum(i.total) AS revenue
FROM customer AS c
    LEFT OUTER JOIN invoice AS i ON i.customer_id = c.id
WHERE c.region = 'EU' AND NOT i.total < 0
GROUP BY c.name
HAVING count(*) > 10;

SELECT r.*, x.best
FROM region AS r NATURAL JOIN (SELECT max(total) AS best FROM invoice) AS x
    CROSS JOIN settings;
";

#[test]
fn report_program() {
    let program = parse(REPORT);
    assert_eq!(program.stmts.len(), 4);
    assert!(matches!(program.stmts[0], Expr::Create { .. }));
    assert!(matches!(program.stmts[1], Expr::Create { .. }));

    let Expr::Select(report) = &program.stmts[2] else {
        panic!("expected SELECT");
    };
    assert!(report.distinct);
    assert_eq!(report.elems.len(), 3);
    assert!(matches!(
        &report.from[0],
        Table::Join {
            kind: JoinType::Left,
            spec: Some(_),
            ..
        }
    ));
    assert!(report.having.is_some());

    let Expr::Select(last) = &program.stmts[3] else {
        panic!("expected SELECT");
    };
    let Table::Join { lhs, kind, .. } = &last.from[0] else {
        panic!("expected join");
    };
    assert_eq!(*kind, JoinType::Cross);
    assert!(matches!(
        **lhs,
        Table::Join {
            kind: JoinType::NaturalInner,
            ..
        }
    ));
}

#[test]
fn report_rendering() {
    let rendered = parse(REPORT).to_string();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[2],
        "SELECT DISTINCT c.name AS customer, COUNT(*) AS n, SUM(i.total) AS revenue \
         FROM customer AS c LEFT JOIN invoice AS i ON (i.customer_id = c.id) \
         WHERE ((c.region = 'EU') AND (NOT (i.total < 0))) GROUP BY c.name \
         HAVING (COUNT(*) > 10);"
    );
}

#[test]
fn report_round_trip() {
    round_trip(REPORT);
}

#[test]
fn nested_subqueries() {
    let sql = "SELECT * FROM (SELECT a FROM (SELECT a FROM t) AS u WHERE a IN_RANGE) AS v;";
    // `IN_RANGE` is an identifier, so the inner WHERE is missing its operator.
    let parsed = parse_with_diagnostics(sql);
    assert!(parsed.num_errors > 0);

    round_trip("SELECT * FROM (SELECT a FROM (SELECT a FROM t) AS u WHERE a > (SELECT min(b) FROM w)) AS v;");
}
