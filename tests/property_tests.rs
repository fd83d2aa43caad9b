//! Property-based tests for the relevance frontend.
//!
//! These use proptest to verify pipeline invariants across many generated
//! inputs: the lexer and keyword matcher must never fail or panic, spans must
//! stay consistent with the source buffer, and the parser must reject or
//! accept without ever aborting.

use proptest::prelude::*;

use relevance_syntax::lexer::{self, TokenKind};
use relevance_syntax::parser;

/// One filler word followed by a run of whitespace.
fn filler_and_gap() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("a"), Just("an"), Just("the"), Just("A"), Just("The")],
        proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\r')], 1..4),
    )
        .prop_map(|(word, gap)| {
            let mut s = word.to_string();
            s.extend(gap);
            s
        })
}

proptest! {
    /// Inputs made only of filler words and whitespace lex to exactly `[Eof]`.
    #[test]
    fn filler_only_input_lexes_to_eof(pieces in proptest::collection::vec(filler_and_gap(), 0..20)) {
        let source: String = pieces.concat();
        let tokens = lexer::lex(&source);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Eof);
        prop_assert_eq!(tokens[0].span.start, source.len());
    }

    /// A digit run is always one NUMBER token spanning the full run.
    #[test]
    fn digit_run_is_never_split(digits in "[0-9]{1,40}") {
        let tokens = lexer::lex(&digits);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Number);
        prop_assert_eq!(tokens[0].span.start, 0);
        prop_assert_eq!(tokens[0].span.end, digits.len());
        prop_assert_eq!(tokens[0].value.as_deref(), Some(digits.as_str()));
    }

    /// Lexing arbitrary printable input terminates with in-bounds,
    /// source-ordered spans and a final Eof.
    #[test]
    fn lexing_is_total_and_spans_are_ordered(source in "[ -~]{0,200}") {
        let tokens = lexer::lex(&source);
        let last = tokens.last().expect("stream is never empty");
        prop_assert_eq!(last.kind, TokenKind::Eof);

        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(token.span.start <= token.span.end);
            prop_assert!(token.span.end <= source.len());
            // Derived tokens may skip filler-word gaps, but never reorder.
            prop_assert!(token.span.start >= previous_end || token.kind == TokenKind::Eof);
            previous_end = token.span.end;
        }
    }

    /// Slicing the source at a non-derived token's span reproduces its text.
    #[test]
    fn non_derived_spans_round_trip(source in "[ -~]{0,200}") {
        for token in lexer::lex(&source) {
            let slice = &source[token.span.start..token.span.end];
            match token.kind {
                TokenKind::Number => prop_assert_eq!(Some(slice), token.value.as_deref()),
                TokenKind::String => {
                    prop_assert_eq!(Some(&slice[1..slice.len() - 1]), token.value.as_deref());
                }
                TokenKind::Plus => prop_assert_eq!(slice, "+"),
                TokenKind::LessEq => prop_assert_eq!(slice, "<="),
                TokenKind::GreaterEq => prop_assert_eq!(slice, ">="),
                TokenKind::NotEqual => prop_assert_eq!(slice, "!="),
                TokenKind::OpenParen => prop_assert_eq!(slice, "("),
                TokenKind::CloseParen => prop_assert_eq!(slice, ")"),
                _ => {}
            }
        }
    }

    /// The parser returns Ok or Err on arbitrary input; it never panics.
    #[test]
    fn parsing_is_total(source in "[ -~]{0,200}") {
        let _ = parser::parse(&source);
    }

    /// Generated arithmetic chains always parse.
    #[test]
    fn arithmetic_chains_parse(
        first in 0u32..1000,
        rest in proptest::collection::vec(
            (prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just(" mod ")], 0u32..1000),
            0..10,
        ),
    ) {
        let mut source = first.to_string();
        for (op, operand) in &rest {
            source.push_str(op);
            source.push_str(&operand.to_string());
        }
        let expr = parser::parse(&source)
            .unwrap_or_else(|e| panic!("parse({source:?}) failed: {e}"));
        prop_assert_eq!(expr.span.end, source.len());
    }
}
