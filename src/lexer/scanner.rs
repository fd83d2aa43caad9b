//! Character-level scanner.
//!
//! Produces primitive tokens (words, numbers, strings, operators, comments,
//! whitespace, error kinds) with no knowledge of the language's vocabulary.
//! The scanner never fails: malformed input becomes an error-kind token, and
//! once the buffer is exhausted it returns `Eof` forever.

use crate::ast::Span;

use super::tokens::{Token, TokenKind};

/// Cursor over a source buffer.
///
/// All scanning rules are ASCII-level, so the cursor walks raw bytes; any
/// byte outside the vocabulary (including UTF-8 continuation bytes) is a
/// one-byte `InvalidCharacters` token.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    index: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            index: 0,
        }
    }

    /// Return the next primitive token, advancing the cursor.
    pub fn next_token(&mut self) -> Token {
        let start = self.index;

        let Some(&c) = self.bytes.get(self.index) else {
            return Token::new(TokenKind::Eof, Span::new(start, start));
        };
        self.index += 1;

        if is_word_start(c) {
            while self.index < self.bytes.len() && is_word_body(self.bytes[self.index]) {
                self.index += 1;
            }
            return Token::new(TokenKind::Word, Span::new(start, self.index));
        }

        if is_whitespace(c) {
            while self.index < self.bytes.len() && is_whitespace(self.bytes[self.index]) {
                self.index += 1;
            }
            return Token::new(TokenKind::Whitespace, Span::new(start, self.index));
        }

        if c.is_ascii_digit() {
            while self.index < self.bytes.len() && self.bytes[self.index].is_ascii_digit() {
                self.index += 1;
            }
            let digits = self.source[start..self.index].to_string();
            return Token::with_value(TokenKind::Number, Span::new(start, self.index), digits);
        }

        let kind = match c {
            b'"' => return self.scan_string(start),
            b'&' => TokenKind::Ampersand,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'*' => TokenKind::Star,
            b'+' => TokenKind::Plus,
            b',' => TokenKind::Comma,
            b'-' => TokenKind::Minus,
            b'/' => {
                if self.peek() == Some(b'*') {
                    self.index += 1;
                    return self.scan_comment(start);
                }
                TokenKind::Divide
            }
            b';' => TokenKind::Semicolon,
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.index += 1;
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            b'=' => TokenKind::Equal,
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.index += 1;
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            b'|' => TokenKind::Bar,
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.index += 1;
                    TokenKind::NotEqual
                } else {
                    TokenKind::InvalidCharacters
                }
            }
            _ => TokenKind::InvalidCharacters,
        };

        Token::new(kind, Span::new(start, self.index))
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    /// Scan past the opening `"`. No escape processing: the string runs to
    /// the next `"` or, failing that, to end of input.
    fn scan_string(&mut self, start: usize) -> Token {
        while self.index < self.bytes.len() {
            if self.bytes[self.index] == b'"' {
                self.index += 1;
                let contents = self.source[start + 1..self.index - 1].to_string();
                return Token::with_value(TokenKind::String, Span::new(start, self.index), contents);
            }
            self.index += 1;
        }
        Token::new(TokenKind::UnterminatedString, Span::new(start, self.index))
    }

    /// Scan past the opening `/*` to the matching `*/`.
    fn scan_comment(&mut self, start: usize) -> Token {
        while self.index + 1 < self.bytes.len() {
            if self.bytes[self.index] == b'*' && self.bytes[self.index + 1] == b'/' {
                self.index += 2;
                return Token::new(TokenKind::Comment, Span::new(start, self.index));
            }
            self.index += 1;
        }
        self.index = self.bytes.len();
        Token::new(TokenKind::UnterminatedComment, Span::new(start, self.index))
    }
}

// ============================================================================
// Character classes
// ============================================================================

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Apostrophes continue a word, so `don't` scans as one word.
fn is_word_body(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'\''
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b)
}
