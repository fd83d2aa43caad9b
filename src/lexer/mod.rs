//! Lexer for the relevance query language.
//!
//! Lexing is a two-stage pipeline:
//! - `scanner` - character-level tokenization (words, numbers, strings,
//!   operators, comments, error kinds)
//! - `keywords` - streaming longest-match folding of word runs into keyword
//!   and identifier tokens over the sorted phrase table
//!
//! [`Lexer`] is the composition root: it drives the scanner, routes word
//! tokens through the keyword matcher, drops trivia, and exposes a single
//! pull interface. It never fails; lexical problems surface as error-kind
//! tokens for the parser to reject.

mod keywords;
mod scanner;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use std::collections::VecDeque;

use keywords::KeywordMatcher;
use scanner::Scanner;

/// Pull-based lexer over one in-memory source buffer.
///
/// `next_token()` returns tokens in source order and returns `Eof` forever
/// once the input is exhausted.
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    matcher: KeywordMatcher<'a>,
    queue: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            matcher: KeywordMatcher::new(source),
            queue: VecDeque::new(),
        }
    }

    /// Return the next identifier, keyword, literal, operator, or error
    /// token.
    ///
    /// Whitespace and comments are dropped here, so they never reach the
    /// keyword matcher and never act as a match boundary: a comment in the
    /// middle of "is greater /*x*/ than" does not split the keyword. Every
    /// non-word token flushes the matcher first, which keeps keyword and
    /// identifier boundaries aligned with the following token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return token;
            }

            let raw = self.scanner.next_token();
            match raw.kind {
                kind if kind.is_trivia() => {}
                TokenKind::Word => self.matcher.append(raw.span, &mut self.queue),
                _ => {
                    self.matcher.flush(&mut self.queue);
                    self.queue.push_back(raw);
                }
            }
        }
    }
}

/// Convenience function to lex a whole source string, `Eof` included.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    use super::keywords::PHRASES;

    #[track_caller]
    fn assert_tokens(source: &str, expected: &[(TokenKind, usize, usize)]) {
        let tokens = lex(source);
        let actual: Vec<(TokenKind, usize, usize)> = tokens
            .iter()
            .map(|t| (t.kind, t.span.start, t.span.end))
            .collect();
        assert_eq!(actual, expected, "token stream for {:?}", source);
    }

    #[test]
    fn empty_input() {
        assert_tokens("", &[(TokenKind::Eof, 0, 0)]);
    }

    #[test]
    fn whitespace_only() {
        assert_tokens(" \r\n\t\x0b", &[(TokenKind::Eof, 5, 5)]);
    }

    #[test]
    fn filler_words_only() {
        assert_tokens("a An THE", &[(TokenKind::Eof, 8, 8)]);
    }

    #[test]
    fn number() {
        assert_tokens("0123456789", &[(TokenKind::Number, 0, 10), (TokenKind::Eof, 10, 10)]);
    }

    #[test]
    fn string() {
        assert_tokens(
            "\"Hello, World!\"",
            &[(TokenKind::String, 0, 15), (TokenKind::Eof, 15, 15)],
        );
    }

    #[test]
    fn unterminated_string() {
        assert_tokens(
            "\"Hello, World!",
            &[(TokenKind::UnterminatedString, 0, 14), (TokenKind::Eof, 14, 14)],
        );
    }

    #[test]
    fn comment_is_dropped() {
        assert_tokens("/* this is a comment */", &[(TokenKind::Eof, 23, 23)]);
    }

    #[test]
    fn unterminated_comment() {
        assert_tokens(
            "/* this is a comment",
            &[(TokenKind::UnterminatedComment, 0, 20), (TokenKind::Eof, 20, 20)],
        );
    }

    #[test]
    fn comment_does_not_split_keywords() {
        // Trivia never reaches the matcher, so it is not a match boundary.
        assert_tokens(
            "is greater /* gap */ than",
            &[(TokenKind::Greater, 0, 25), (TokenKind::Eof, 25, 25)],
        );
    }

    #[test]
    fn invalid_characters() {
        assert_tokens(
            "! @",
            &[
                (TokenKind::InvalidCharacters, 0, 1),
                (TokenKind::InvalidCharacters, 2, 3),
                (TokenKind::Eof, 3, 3),
            ],
        );
    }

    #[test]
    fn keyword_and_identifier_folding() {
        let tokens = lex("Name OF the Local   Computer contains \"cats\"");
        let expected = [
            (TokenKind::Identifier, 0, 4, Some("name")),
            (TokenKind::Of, 5, 7, None),
            (TokenKind::Identifier, 12, 28, Some("local computer")),
            (TokenKind::Contains, 29, 37, None),
            (TokenKind::String, 38, 44, Some("cats")),
            (TokenKind::Eof, 44, 44, None),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, start, end, value)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.span, Span::new(start, end));
            assert_eq!(token.value.as_deref(), value);
        }
    }

    #[test]
    fn longest_keyword_wins() {
        assert_tokens(
            "1 is greater than or equal to 0",
            &[
                (TokenKind::Number, 0, 1),
                (TokenKind::GreaterEq, 2, 29),
                (TokenKind::Number, 30, 31),
                (TokenKind::Eof, 31, 31),
            ],
        );
    }

    #[test]
    fn keyword_flush_at_end_of_input() {
        assert_tokens(
            "is greater than or",
            &[
                (TokenKind::Greater, 0, 15),
                (TokenKind::Or, 16, 18),
                (TokenKind::Eof, 18, 18),
            ],
        );
    }

    #[test]
    fn keyword_flush_with_identifier() {
        let tokens = lex("is greater than or bears");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Greater,
                TokenKind::Or,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[2].value.as_deref(), Some("bears"));
        assert_eq!(tokens[2].span, Span::new(19, 24));
    }

    #[test]
    fn non_word_token_flushes_matcher() {
        // The '(' forces the pending "is greater" attempt to resolve before
        // the paren is emitted, keeping output in source order.
        assert_tokens(
            "is greater (",
            &[
                (TokenKind::Is, 0, 2),
                (TokenKind::Identifier, 3, 10),
                (TokenKind::OpenParen, 11, 12),
                (TokenKind::Eof, 12, 12),
            ],
        );
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn phrase_table_parity() {
        // Every table entry, lexed on its own, produces exactly its kind.
        for entry in PHRASES {
            let source = entry.words.join(" ");
            let tokens = lex(&source);
            assert_eq!(
                tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
                vec![entry.kind, TokenKind::Eof],
                "phrase {:?}",
                entry.words
            );
            assert_eq!(tokens[0].span, Span::new(0, source.len()));
        }
    }
}
