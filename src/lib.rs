//! Syntax frontend for the relevance query language: lexer, keyword matcher, parser, AST.
//!
//! Relevance is a small English-like expression language ("name of the local
//! computer contains \"cats\""). This crate turns source text into an
//! expression tree; evaluating that tree against a data model is a separate
//! concern and lives downstream.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not resolve
//!   identifiers, evaluate `whose` predicates, or touch any data source.
//! - Keywords are multi-word phrases with shared prefixes ("is greater than
//!   or equal to"), so lexing is a two-stage pipeline: a character-level
//!   scanner plus a streaming longest-match keyword matcher.
//!
//! ## Examples
//! ```rust
//! use relevance_syntax::parser;
//!
//! let expr = parser::parse("1 + 2 * 3").unwrap();
//! assert_eq!(expr.span.end, 9);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
