//! Abstract syntax tree for relevance expressions.
//!
//! The node set follows the expression grammar: a fixed precedence cascade
//! from `if`/collection forms down to primaries. Every node carries a byte
//! span over the original source, taken as the union of its children's spans.

/// Source location span (byte offsets, half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A relevance expression.
///
/// Sequence forms (`Collection`, `Tuple`, `Or`, `And`, `Concat`) are only
/// built when two or more operands are present; a lone operand passes through
/// without a wrapper node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `if test then consequent else alternate`
    If {
        test: Box<Spanned<Expr>>,
        consequent: Box<Spanned<Expr>>,
        alternate: Box<Spanned<Expr>>,
    },
    /// Semicolon-separated sequence: `a; b; c`
    Collection(Vec<Spanned<Expr>>),
    /// Comma-separated sequence: `a, b, c`
    Tuple(Vec<Spanned<Expr>>),
    /// `a or b or c`
    Or(Vec<Spanned<Expr>>),
    /// `a and b and c`
    And(Vec<Spanned<Expr>>),
    /// A single comparison; chained comparisons are not part of the grammar.
    Compare(Box<Spanned<Expr>>, CompareOp, Box<Spanned<Expr>>),
    /// Left-associative sum/product chains.
    Arith(Box<Spanned<Expr>>, ArithOp, Box<Spanned<Expr>>),
    /// Concatenation: `a | b` or `a & b`.
    Concat(Vec<Spanned<Expr>>),
    /// Prefix operator: `not x`, `- x`, `exists x`.
    Unary(UnaryOp, Box<Spanned<Expr>>),
    /// `expr as type_name`
    Cast {
        expr: Box<Spanned<Expr>>,
        type_name: String,
    },
    /// `name of parent` — right-recursive, so `a of b of c` is `a of (b of c)`.
    Reference {
        name: Box<Spanned<Expr>>,
        of: Option<Box<Spanned<Expr>>>,
    },
    /// `base whose predicate` — the predicate is evaluated per element with
    /// an implicit `it` reference.
    Property {
        base: Box<Spanned<Expr>>,
        predicate: Box<Spanned<Expr>>,
    },
    /// A folded, space-joined run of non-keyword words.
    Identifier(String),
    Number(u64),
    String(String),
    /// The implicit current-element reference inside a `whose` clause.
    It,
}

/// Comparison operators, whether spelled symbolically (`<=`) or as an English
/// phrase ("is less than or equal to").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    ContainedBy,
    NotContainedBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Exists,
    NotExists,
}
