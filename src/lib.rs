// src/lib.rs

//! Lexical analysis and statement signatures for raw SQL text.
//!
//! Given an arbitrary, possibly malformed SQL statement captured from a
//! live database call, this crate produces a short, low-cardinality label
//! (e.g. `SELECT FROM orders`) for grouping similar queries in monitoring
//! output without echoing query text. The lexer tolerates ANSI, MySQL,
//! Postgres, SQL Server, and Oracle quoting conventions and never fails on
//! malformed input; statements with no recognizable shape yield `None` so
//! callers can fall back to a default label.
//!
//! ```
//! use sql_signature::parse;
//!
//! let signature = parse("SELECT o.* FROM orders o WHERE o.id = 42");
//! assert_eq!(signature.map(|s| s.to_string()).as_deref(), Some("SELECT FROM orders"));
//! ```

mod keywords;
mod lexer;
mod signature;
mod token;

pub use keywords::Keyword;
pub use lexer::Tokenizer;
pub use signature::{parse, Signature, StatementKind};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;
