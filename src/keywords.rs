// src/keywords.rs

//! Reserved-word classification for the SQL lexer.
//!
//! Keywords are grouped into buckets by exact byte length so a lookup only
//! ever compares the candidate against the handful of reserved words of the
//! same length, case-insensitively. A candidate longer than the longest
//! known keyword short-circuits to "not a keyword" without touching any
//! bucket, which also keeps long identifiers that share a keyword prefix
//! from being misclassified.

use once_cell::sync::Lazy;

/// A reserved word recognized by the lexer.
///
/// The signature builder only dispatches on `Select`, `From`, `Insert`,
/// `Into`, `Update`, and `Delete`; the remaining variants exist so common
/// vendor keywords are not reported as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    As,
    Asc,
    Call,
    Delete,
    Desc,
    From,
    Group,
    Insert,
    Into,
    Join,
    Like,
    Limit,
    Null,
    Or,
    Order,
    Select,
    Set,
    Table,
    Truncate,
    Union,
    Update,
    Values,
    Where,
}

/// Flat source list the bucketed table is built from. Entries must be
/// upper case; lookup compares case-insensitively against them.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("AND", Keyword::And),
    ("AS", Keyword::As),
    ("ASC", Keyword::Asc),
    ("CALL", Keyword::Call),
    ("DELETE", Keyword::Delete),
    ("DESC", Keyword::Desc),
    ("FROM", Keyword::From),
    ("GROUP", Keyword::Group),
    ("INSERT", Keyword::Insert),
    ("INTO", Keyword::Into),
    ("JOIN", Keyword::Join),
    ("LIKE", Keyword::Like),
    ("LIMIT", Keyword::Limit),
    ("NULL", Keyword::Null),
    ("OR", Keyword::Or),
    ("ORDER", Keyword::Order),
    ("SELECT", Keyword::Select),
    ("SET", Keyword::Set),
    ("TABLE", Keyword::Table),
    ("TRUNCATE", Keyword::Truncate),
    ("UNION", Keyword::Union),
    ("UPDATE", Keyword::Update),
    ("VALUES", Keyword::Values),
    ("WHERE", Keyword::Where),
];

/// Keywords indexed by byte length: `buckets[n]` holds every keyword of
/// length `n`. Built once on first use and immutable afterwards, so
/// concurrent lookups need no locking.
static BUCKETS: Lazy<Vec<Vec<(&'static str, Keyword)>>> = Lazy::new(|| {
    let max_len = KEYWORDS
        .iter()
        .map(|(text, _)| text.len())
        .max()
        .unwrap_or(0);
    let mut buckets = vec![Vec::new(); max_len + 1];
    for &(text, keyword) in KEYWORDS {
        buckets[text.len()].push((text, keyword));
    }
    buckets
});

impl Keyword {
    /// Classifies `word` as a reserved word, case-insensitively.
    ///
    /// Returns `None` for anything that is not in the table, including
    /// words longer than every known keyword (those never reach a bucket).
    pub fn lookup(word: &str) -> Option<Keyword> {
        let bucket = BUCKETS.get(word.len())?;
        bucket
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(word))
            .map(|&(_, keyword)| keyword)
    }
}
