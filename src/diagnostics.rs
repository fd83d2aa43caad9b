//! Diagnostics for the relevance frontend.
//!
//! The scanner and keyword matcher never fail: malformed input surfaces as
//! ordinary error-kind tokens. Only the parser produces a [`SyntaxError`],
//! and it stops at the first one.

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};

/// A parse failure with location information.
///
/// `found` and `expected` describe the failure structurally; `message` is the
/// rendered form used by `Display` and by miette's fancy reporter.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(relevance::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub found: TokenKind,
    pub expected: Vec<TokenKind>,
    #[label("here")]
    pub span: Span,
}

impl SyntaxError {
    /// An expected token (or one of several) was absent.
    pub fn expected(expected: &[TokenKind], found: &Token) -> Self {
        let message = match expected {
            [single] => format!("expected {}, found {}", single, found.kind),
            _ => {
                let names: Vec<String> = expected.iter().map(ToString::to_string).collect();
                format!("expected one of {}, found {}", names.join(", "), found.kind)
            }
        };
        Self {
            message,
            found: found.kind,
            expected: expected.to_vec(),
            span: found.span,
        }
    }

    /// A lexical-error token was reached where an expression is expected.
    pub fn invalid_token(found: &Token) -> Self {
        Self {
            message: format!("{} in expression", found.kind),
            found: found.kind,
            expected: Vec::new(),
            span: found.span,
        }
    }

    /// A digit run does not fit in a 64-bit number.
    pub fn number_too_large(found: &Token) -> Self {
        Self {
            message: "number literal is too large".to_string(),
            found: found.kind,
            expected: Vec::new(),
            span: found.span,
        }
    }
}
