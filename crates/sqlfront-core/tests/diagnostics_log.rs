//! Tests that diagnostics and parse summaries reach `tracing`.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use sqlfront_core::{Driver, Parser};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn errors_are_logged() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();

    let mut driver = Driver::new();
    tracing::subscriber::with_default(subscriber, || {
        Parser::new(&mut driver, "log.sql", "SELECT FROM t;").parse_program();
    });

    let output = captured.contents();
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("sqlfront::diag"), "{output}");
    assert!(
        output.contains("expected 'primary or unary expression'"),
        "{output}"
    );
    assert!(output.contains("log.sql:1:8"), "{output}");
    assert!(output.contains("parsed program"), "{output}");
    assert_eq!(driver.num_errors(), 1);
}

#[test]
fn clean_parse_logs_no_errors() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let mut driver = Driver::new();
    tracing::subscriber::with_default(subscriber, || {
        Parser::new(&mut driver, "ok.sql", "SELECT a FROM t;").parse_program();
    });

    assert!(captured.contents().is_empty());
}
