// src/lexer.rs

//! Pull-based SQL lexer.
//!
//! Converts raw statement text into `Token`s one `scan()` call at a time,
//! tolerating every quoting convention the major dialects use (backtick,
//! double-quote, bracket, dollar-quote) plus line and nested block
//! comments. The lexer never fails: malformed or truncated input degrades
//! to best-effort tokens, because the text it sees is whatever an
//! application handed to its database driver.

use crate::keywords::Keyword;
use crate::token::{Token, TokenKind};
use log::{debug, trace};

/// Single-pass lexer over one SQL statement.
///
/// `scan()` advances to the next token and reports whether one was
/// produced; `token()` exposes the most recently scanned token. The scan
/// position only ever moves forward. A `Tokenizer` is built per statement
/// and discarded after use; re-lexing the same text means constructing a
/// new one.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    token: Token<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            pos: 0,
            // Placeholder until the first successful scan().
            token: Token {
                kind: TokenKind::Other,
                text: "",
                start: 0,
                end: 0,
            },
        }
    }

    /// The most recently scanned token. Meaningful only after a `scan()`
    /// call that returned `true`.
    pub fn token(&self) -> Token<'a> {
        self.token
    }

    /// Advances to the next token. Returns `false` once only whitespace
    /// (or nothing) remains, leaving the previous token in place.
    pub fn scan(&mut self) -> bool {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let start = self.pos;
        let Some(byte) = self.peek() else {
            return false;
        };
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'_' | 0x80.. => self.scan_word(start),
            b'0'..=b'9' => self.scan_number(start),
            b'.' => self.scan_single(TokenKind::Period, start),
            b'`' => self.scan_quoted_ident(start, b'`'),
            b'"' => self.scan_quoted_ident(start, b'"'),
            b'[' => self.scan_quoted_ident(start, b']'),
            b'$' => self.scan_dollar_quote(start),
            b'(' => self.scan_single(TokenKind::LParen, start),
            b')' => self.scan_single(TokenKind::RParen, start),
            b'/' if self.peek_at(1) == Some(b'*') => self.scan_block_comment(start),
            b'-' if self.peek_at(1) == Some(b'-') => self.scan_line_comment(start),
            b'\'' => self.scan_string(start),
            _ => self.scan_single(TokenKind::Other, start),
        }
        trace!(
            "scanned {:?} {:?} at {}..{}",
            self.token.kind,
            self.token.text,
            self.token.start,
            self.token.end
        );
        true
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Records a token whose text spans `start..self.pos` verbatim.
    fn emit(&mut self, kind: TokenKind, start: usize) {
        self.token = Token {
            kind,
            text: &self.input[start..self.pos],
            start,
            end: self.pos,
        };
    }

    /// Records a token whose text excludes its delimiters.
    fn emit_stripped(&mut self, kind: TokenKind, start: usize, text: &'a str) {
        self.token = Token {
            kind,
            text,
            start,
            end: self.pos,
        };
    }

    /// Consumes exactly one character and emits it as `kind`.
    fn scan_single(&mut self, kind: TokenKind, start: usize) {
        self.pos += 1;
        self.emit(kind, start);
    }

    /// Scans an identifier-shaped run. A run consisting purely of ASCII
    /// letters is a keyword candidate and gets looked up in the keyword
    /// table; any digit, `_`, `$`, or non-ASCII character in the run makes
    /// it an identifier unconditionally. Non-ASCII bytes are treated
    /// permissively as identifier characters rather than rejected.
    fn scan_word(&mut self, start: usize) {
        let mut candidate = true;
        while let Some(byte) = self.peek() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' => self.pos += 1,
                b'0'..=b'9' | b'_' | b'$' | 0x80.. => {
                    candidate = false;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let text = &self.input[start..self.pos];
        let kind = if candidate {
            match Keyword::lookup(text) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Ident,
            }
        } else {
            TokenKind::Ident
        };
        self.emit(kind, start);
    }

    /// Scans a numeric literal: a digit run, an optional fraction, and an
    /// optional exponent with an optional sign. Every digit of the run is
    /// consumed so the scan position always advances past the literal.
    fn scan_number(&mut self, start: usize) {
        self.eat_digits();
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digits_at = if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if matches!(self.peek_at(digits_at), Some(b'0'..=b'9')) {
                self.pos += digits_at;
                self.eat_digits();
            }
        }
        self.emit(TokenKind::Number, start);
    }

    #[inline]
    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    /// Scans a quoted identifier up to `close`, emitting `Ident` with the
    /// delimiters stripped. Inside double quotes a doubled `""` is an
    /// escaped quote character, not a terminator. An unterminated
    /// identifier consumes to end of input.
    fn scan_quoted_ident(&mut self, start: usize, close: u8) {
        self.pos += 1;
        let body = self.pos;
        while let Some(byte) = self.peek() {
            if byte == close {
                if close == b'"' && self.peek_at(1) == Some(b'"') {
                    self.pos += 2;
                    continue;
                }
                let text = &self.input[body..self.pos];
                self.pos += 1;
                self.emit_stripped(TokenKind::Ident, start, text);
                return;
            }
            self.pos += 1;
        }
        debug!("unterminated quoted identifier at offset {}", start);
        let text = &self.input[body..self.pos];
        self.emit_stripped(TokenKind::Ident, start, text);
    }

    /// Scans a `'...'` string literal. A backslash escapes the character
    /// after it and a doubled `''` is an escaped quote inside the literal.
    /// An unterminated literal consumes to end of input and still emits a
    /// `String` token.
    fn scan_string(&mut self, start: usize) {
        self.pos += 1;
        let body = self.pos;
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                }
                b'\'' => {
                    if self.peek_at(1) == Some(b'\'') {
                        self.pos += 2;
                        continue;
                    }
                    let text = &self.input[body..self.pos];
                    self.pos += 1;
                    self.emit_stripped(TokenKind::String, start, text);
                    return;
                }
                _ => self.pos += 1,
            }
        }
        debug!("unterminated string literal at offset {}", start);
        let text = &self.input[body..self.pos];
        self.emit_stripped(TokenKind::String, start, text);
    }

    /// Attempts a Postgres dollar-quoted string: `$tag$ ... $tag$` with a
    /// possibly empty tag. When the identical closing delimiter exists the
    /// whole region is emitted as one `String` token with the delimiters
    /// stripped from its text. Otherwise the `$` alone is emitted as
    /// `Other` and scanning resumes after it.
    fn scan_dollar_quote(&mut self, start: usize) {
        let bytes = self.input.as_bytes();
        let mut tag_end = self.pos + 1;
        while tag_end < bytes.len() && is_tag_byte(bytes[tag_end]) {
            tag_end += 1;
        }
        if tag_end < bytes.len() && bytes[tag_end] == b'$' {
            let delim = &self.input[self.pos..tag_end + 1];
            let body = tag_end + 1;
            if let Some(found) = self.input[body..].find(delim) {
                let text = &self.input[body..body + found];
                self.pos = body + found + delim.len();
                self.emit_stripped(TokenKind::String, start, text);
                return;
            }
            debug!("dollar quote {:?} at offset {} never closes", delim, start);
        }
        self.scan_single(TokenKind::Other, start);
    }

    /// Scans a block comment to its balanced `*/`, counting nested `/*`
    /// pairs. An unterminated comment consumes to end of input.
    fn scan_block_comment(&mut self, start: usize) {
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(byte) = self.peek() {
            if byte == b'/' && self.peek_at(1) == Some(b'*') {
                depth += 1;
                self.pos += 2;
            } else if byte == b'*' && self.peek_at(1) == Some(b'/') {
                depth -= 1;
                self.pos += 2;
                if depth == 0 {
                    break;
                }
            } else {
                self.pos += 1;
            }
        }
        if depth > 0 {
            debug!("unterminated block comment at offset {}", start);
        }
        self.emit(TokenKind::Comment, start);
    }

    /// Scans a `--` comment to end of line or end of input. The newline
    /// itself is left for the whitespace skip.
    fn scan_line_comment(&mut self, start: usize) {
        self.pos += 2;
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.pos += 1;
        }
        self.emit(TokenKind::Comment, start);
    }
}

/// Bytes allowed inside a dollar-quote tag. Permissive on purpose: any
/// identifier-ish byte, including non-ASCII, participates in the tag.
#[inline]
fn is_tag_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.scan() {
            Some(self.token)
        } else {
            None
        }
    }
}
