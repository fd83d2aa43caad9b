//! Token types for the relevance lexer.
//!
//! One closed [`TokenKind`] enum covers the whole vocabulary: primitive
//! scanner output, punctuation/operators, lexical-error kinds, and the
//! derived kinds produced by the keyword matcher (identifier + keywords).
//!
//! ## Notes
//! - Symbolic comparisons and their phrase spellings share a kind: `>=` and
//!   "is greater than or equal to" both lex to [`TokenKind::GreaterEq`], so
//!   the parser checks kinds only, never text.

use std::fmt;

use crate::ast::{CompareOp, Span, UnaryOp};

/// Kind of token produced by the scanner or keyword matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Primitive ==========
    Eof,
    Whitespace,
    Comment,
    Word,
    String,
    Number,

    // ========== Punctuation / operators ==========
    Ampersand,
    OpenParen,
    CloseParen,
    Star,
    Plus,
    Comma,
    Minus,
    Divide,
    Semicolon,
    Less,
    LessEq,
    Equal,
    Greater,
    GreaterEq,
    Bar,
    NotEqual,

    // ========== Lexical errors ==========
    InvalidCharacters,
    UnterminatedString,
    UnterminatedComment,

    // ========== Derived (keyword matcher output) ==========
    Identifier,
    And,
    As,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    ContainedBy,
    NotContainedBy,
    Exist,
    NotExist,
    If,
    Then,
    Else,
    Is,
    It,
    Mod,
    Not,
    Of,
    Or,
    Whose,
}

impl TokenKind {
    /// Return `true` if this token is dropped before keyword matching.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Return `true` if this is one of the lexical-error kinds.
    pub fn is_lexical_error(self) -> bool {
        matches!(
            self,
            TokenKind::InvalidCharacters | TokenKind::UnterminatedString | TokenKind::UnterminatedComment
        )
    }

    /// Map a comparison token to its operator. Bare `is` means equality.
    pub fn compare_op(self) -> Option<CompareOp> {
        match self {
            TokenKind::Equal | TokenKind::Is => Some(CompareOp::Equal),
            TokenKind::NotEqual => Some(CompareOp::NotEqual),
            TokenKind::Less => Some(CompareOp::Less),
            TokenKind::LessEq => Some(CompareOp::LessEq),
            TokenKind::Greater => Some(CompareOp::Greater),
            TokenKind::GreaterEq => Some(CompareOp::GreaterEq),
            TokenKind::Contains => Some(CompareOp::Contains),
            TokenKind::NotContains => Some(CompareOp::NotContains),
            TokenKind::StartsWith => Some(CompareOp::StartsWith),
            TokenKind::NotStartsWith => Some(CompareOp::NotStartsWith),
            TokenKind::EndsWith => Some(CompareOp::EndsWith),
            TokenKind::NotEndsWith => Some(CompareOp::NotEndsWith),
            TokenKind::ContainedBy => Some(CompareOp::ContainedBy),
            TokenKind::NotContainedBy => Some(CompareOp::NotContainedBy),
            _ => None,
        }
    }

    /// Map a prefix-operator token to its unary operator.
    pub fn unary_op(self) -> Option<UnaryOp> {
        match self {
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Exist => Some(UnaryOp::Exists),
            TokenKind::NotExist => Some(UnaryOp::NotExists),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Word => "word",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Ampersand => "'&'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Star => "'*'",
            TokenKind::Plus => "'+'",
            TokenKind::Comma => "','",
            TokenKind::Minus => "'-'",
            TokenKind::Divide => "'/'",
            TokenKind::Semicolon => "';'",
            TokenKind::Less => "'<'",
            TokenKind::LessEq => "'<='",
            TokenKind::Equal => "'='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEq => "'>='",
            TokenKind::Bar => "'|'",
            TokenKind::NotEqual => "'!='",
            TokenKind::InvalidCharacters => "invalid character",
            TokenKind::UnterminatedString => "unterminated string",
            TokenKind::UnterminatedComment => "unterminated comment",
            TokenKind::Identifier => "identifier",
            TokenKind::And => "'and'",
            TokenKind::As => "'as'",
            TokenKind::Contains => "'contains'",
            TokenKind::NotContains => "'does not contain'",
            TokenKind::StartsWith => "'starts with'",
            TokenKind::NotStartsWith => "'does not start with'",
            TokenKind::EndsWith => "'ends with'",
            TokenKind::NotEndsWith => "'does not end with'",
            TokenKind::ContainedBy => "'is contained by'",
            TokenKind::NotContainedBy => "'is not contained by'",
            TokenKind::Exist => "'exists'",
            TokenKind::NotExist => "'does not exist'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::Is => "'is'",
            TokenKind::It => "'it'",
            TokenKind::Mod => "'mod'",
            TokenKind::Not => "'not'",
            TokenKind::Of => "'of'",
            TokenKind::Or => "'or'",
            TokenKind::Whose => "'whose'",
        };
        f.write_str(name)
    }
}

/// A token with its kind, source span, and (for derived and literal kinds)
/// its text value.
///
/// `value` is `Some` for identifiers (folded, space-joined words), strings
/// (literal contents without the quotes), and numbers (raw digit text).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: Option<String>,
}

impl Token {
    /// Construct a token with no text value.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            value: None,
        }
    }

    /// Construct a token carrying a text value.
    pub fn with_value(kind: TokenKind, span: Span, value: String) -> Self {
        Self {
            kind,
            span,
            value: Some(value),
        }
    }
}
