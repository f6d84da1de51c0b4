//! Tests for symbol identity across drivers and threads.

mod common;
use common::*;

use std::sync::Arc;
use std::thread;

use sqlfront_core::ast::Expr;
use sqlfront_core::{Driver, Parser, SymbolTable};

#[test]
fn same_text_same_symbol() {
    let parsed = parse_with_diagnostics("SELECT users.id FROM users;");
    let Expr::Select(select) = &parsed.program.stmts[0] else {
        panic!("expected SELECT");
    };
    let Expr::Id { syms, .. } = &select.elems[0].expr else {
        panic!("expected identifier");
    };
    let sqlfront_core::Table::Id { syms: table, .. } = &select.from[0] else {
        panic!("expected table name");
    };
    assert_eq!(syms[0], table[0]);
    assert_ne!(syms[0], syms[1]);
}

#[test]
fn parsers_on_threads_share_a_table() {
    let symbols = Arc::new(SymbolTable::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let symbols = Arc::clone(&symbols);
            thread::spawn(move || {
                let mut driver = Driver::with_symbols(symbols);
                let sql = format!("SELECT users.c{i} FROM users;");
                let program = Parser::new(&mut driver, "thread.sql", &sql).parse_program();
                assert!(!driver.has_errors());
                program
            })
        })
        .collect();

    let users = symbols.intern("users");
    for handle in handles {
        let program = handle.join().expect("parser thread");
        let Expr::Select(select) = &program.stmts[0] else {
            panic!("expected SELECT");
        };
        let Expr::Id { syms, .. } = &select.elems[0].expr else {
            panic!("expected identifier");
        };
        assert_eq!(syms[0], users);
    }
    assert!(symbols.len() >= 4 + 1);
}

#[test]
fn separate_tables_do_not_share_identity() {
    let a = SymbolTable::new();
    let b = SymbolTable::new();
    assert_ne!(a.intern("x"), b.intern("x"));
    assert_eq!(a.intern("x"), a.intern("x"));
}
