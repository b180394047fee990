// src/signature.rs

//! Statement-signature extraction.
//!
//! Drives the lexer over one captured SQL statement and reduces it to a
//! short, low-cardinality label such as `SELECT FROM orders` — enough to
//! group similar queries in monitoring output without echoing query text.
//! Anything without a recognizable shape is reported as `None`, which is a
//! normal outcome callers turn into a fallback label, never an error.

use crate::keywords::Keyword;
use crate::lexer::Tokenizer;
use crate::token::{Token, TokenKind};
use log::trace;
use serde::Serialize;
use std::fmt;

/// The statement shapes a signature can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// An extracted statement signature: the shape plus the immediate table
/// reference, with the table's source casing preserved. `Display` renders
/// the canonical label, e.g. `INSERT INTO orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub kind: StatementKind,
    pub table: String,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fixed keywords are always canonical upper case regardless of how
        // the statement spelled them.
        match self.kind {
            StatementKind::Select => write!(f, "SELECT FROM {}", self.table),
            StatementKind::Insert => write!(f, "INSERT INTO {}", self.table),
            StatementKind::Update => write!(f, "UPDATE {}", self.table),
            StatementKind::Delete => write!(f, "DELETE FROM {}", self.table),
        }
    }
}

/// Extracts the signature of a single SQL statement, or `None` when the
/// text has no recognizable shape.
///
/// Pure and total: the same input always produces the same result, no
/// input panics, and the statement text is never echoed into the result
/// beyond the extracted table name. Comment tokens are skipped wherever
/// they appear. Only the first statement of a multi-statement string is
/// considered.
pub fn parse(sql: &str) -> Option<Signature> {
    let mut tokens = Tokenizer::new(sql);
    let first = next_significant(&mut tokens)?;
    let TokenKind::Keyword(keyword) = first.kind else {
        trace!("no signature shape for leading token {:?}", first.kind);
        return None;
    };
    match keyword {
        Keyword::Select => select_signature(&mut tokens),
        Keyword::Insert => {
            // INSERT must be followed by INTO, then the table.
            let next = next_significant(&mut tokens)?;
            if next.kind != TokenKind::Keyword(Keyword::Into) {
                return None;
            }
            let table = dotted_name(&mut tokens)?;
            Some(Signature {
                kind: StatementKind::Insert,
                table,
            })
        }
        Keyword::Update => {
            // The table follows UPDATE directly, with no intervening
            // keyword.
            let table = dotted_name(&mut tokens)?;
            Some(Signature {
                kind: StatementKind::Update,
                table,
            })
        }
        Keyword::Delete => {
            let next = next_significant(&mut tokens)?;
            if next.kind != TokenKind::Keyword(Keyword::From) {
                return None;
            }
            let table = dotted_name(&mut tokens)?;
            Some(Signature {
                kind: StatementKind::Delete,
                table,
            })
        }
        _ => {
            trace!("no signature shape for leading keyword {:?}", keyword);
            None
        }
    }
}

/// Advances to the next non-comment token, or `None` at end of input.
fn next_significant<'a>(tokens: &mut Tokenizer<'a>) -> Option<Token<'a>> {
    while tokens.scan() {
        let token = tokens.token();
        if token.kind != TokenKind::Comment {
            return Some(token);
        }
    }
    None
}

/// Finds the first FROM at paren-nesting depth 0 after SELECT, then reads
/// the table name behind it. Parens before that FROM belong to function
/// calls or subqueries in the column list and are skipped by depth
/// counting; the depth is floored at zero so unbalanced `)` noise cannot
/// push the search underground.
fn select_signature(tokens: &mut Tokenizer) -> Option<Signature> {
    let mut depth = 0usize;
    loop {
        let token = next_significant(tokens)?;
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Keyword(Keyword::From) if depth == 0 => break,
            _ => {}
        }
    }
    let table = dotted_name(tokens)?;
    Some(Signature {
        kind: StatementKind::Select,
        table,
    })
}

/// Reads a dotted identifier, `Ident (Period Ident)*`, preserving every
/// segment and dot with the source casing intact. Extraction stops at the
/// first token that does not continue the name (an alias, a comma, WHERE,
/// ...), so only the immediate table reference is captured. Returns `None`
/// when the very first significant token is not an identifier.
fn dotted_name(tokens: &mut Tokenizer) -> Option<String> {
    let first = next_significant(tokens)?;
    if first.kind != TokenKind::Ident {
        return None;
    }
    let mut name = String::from(first.text);
    loop {
        let Some(token) = next_significant(tokens) else {
            break;
        };
        if token.kind != TokenKind::Period {
            break;
        }
        let Some(segment) = next_significant(tokens) else {
            break;
        };
        if segment.kind != TokenKind::Ident {
            break;
        }
        name.push('.');
        name.push_str(segment.text);
    }
    Some(name)
}
