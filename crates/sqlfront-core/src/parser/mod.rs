//! SQL Parser
//!
//! A hand-written recursive descent parser with precedence climbing for
//! expressions and join chains.

mod parser;
mod precedence;

pub use parser::Parser;
pub use precedence::Prec;
