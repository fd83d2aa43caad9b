//! Parser for the relevance query language.
//!
//! A recursive-descent parser with single-token lookahead, pulling straight
//! from the [`Lexer`]. Each precedence level is one method; chain levels fold
//! operands into sequence nodes, the at-most-one levels (`comparison`,
//! `cast_expr`) take a single optional operator. The parser stops at the
//! first error; there is no recovery and no partial tree.
//!
//! ## Examples
//!
//! ```rust
//! use relevance_syntax::parser;
//! use relevance_syntax::ast::{CompareOp, Expr};
//!
//! let expr = parser::parse("name of computer contains \"cats\"").unwrap();
//! assert!(matches!(expr.node, Expr::Compare(_, CompareOp::Contains, _)));
//! ```

use crate::ast::{ArithOp, Expr, Spanned};
use crate::diagnostics::SyntaxError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Token kinds that can start a primary expression.
const PRIMARY_STARTS: &[TokenKind] = &[
    TokenKind::OpenParen,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::Identifier,
    TokenKind::It,
];

/// Parser state: the lexer plus at most one peeked token.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self { lexer, peeked: None }
    }

    /// Parse the entire token stream into one root expression.
    ///
    /// ## Errors
    /// Returns a [`SyntaxError`] if a required token is absent, a lexical
    /// error token is reached where an expression is expected, or input
    /// remains after the expression.
    pub fn parse(mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let expr = self.expression()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    /// Return the current token without consuming it.
    fn peek(&mut self) -> &Token {
        let lexer = &mut self.lexer;
        self.peeked.get_or_insert_with(|| lexer.next_token())
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    /// Return `true` if the current token has the given kind.
    fn check(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// If the current token has the given kind, consume it and return `true`.
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::expected(&[kind], self.peek()))
        }
    }

    // ========================================================================
    // Precedence cascade, loosest first
    // ========================================================================

    /// `if E then E else E` or fallthrough to `collection`.
    fn expression(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        if !self.check(TokenKind::If) {
            return self.collection();
        }

        let if_token = self.advance();
        let test = self.expression()?;
        self.expect(TokenKind::Then)?;
        let consequent = self.expression()?;
        self.expect(TokenKind::Else)?;
        let alternate = self.expression()?;

        let span = if_token.span.merge(alternate.span);
        Ok(Spanned::new(
            Expr::If {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span,
        ))
    }

    /// `Tuple (; Tuple)*`
    fn collection(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.tuple_expr()?;
        if !self.check(TokenKind::Semicolon) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut items = vec![first];
        while self.match_kind(TokenKind::Semicolon) {
            let item = self.tuple_expr()?;
            span = span.merge(item.span);
            items.push(item);
        }
        Ok(Spanned::new(Expr::Collection(items), span))
    }

    /// `Or (, Or)*`
    fn tuple_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.or_expr()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut items = vec![first];
        while self.match_kind(TokenKind::Comma) {
            let item = self.or_expr()?;
            span = span.merge(item.span);
            items.push(item);
        }
        Ok(Spanned::new(Expr::Tuple(items), span))
    }

    /// `And (or And)*`
    fn or_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.and_expr()?;
        if !self.check(TokenKind::Or) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut items = vec![first];
        while self.match_kind(TokenKind::Or) {
            let item = self.and_expr()?;
            span = span.merge(item.span);
            items.push(item);
        }
        Ok(Spanned::new(Expr::Or(items), span))
    }

    /// `Logical (and Logical)*`
    fn and_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.comparison()?;
        if !self.check(TokenKind::And) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut items = vec![first];
        while self.match_kind(TokenKind::And) {
            let item = self.comparison()?;
            span = span.merge(item.span);
            items.push(item);
        }
        Ok(Spanned::new(Expr::And(items), span))
    }

    /// `Sum [compare-op Sum]` — at most one comparison; chains like
    /// `1 < 2 < 3` are rejected upstream when the second `<` is left over.
    fn comparison(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let left = self.sum()?;

        let Some(op) = self.peek().kind.compare_op() else {
            return Ok(left);
        };
        self.advance();

        let right = self.sum()?;
        let span = left.span.merge(right.span);
        Ok(Spanned::new(Expr::Compare(Box::new(left), op, Box::new(right)), span))
    }

    /// `Product ((+|-) Product)*`, left-associative.
    fn sum(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = self.product()?;

        loop {
            let op = if self.match_kind(TokenKind::Plus) {
                ArithOp::Add
            } else if self.match_kind(TokenKind::Minus) {
                ArithOp::Sub
            } else {
                break;
            };

            let right = self.product()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Arith(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    /// `Concat ((*|/|mod) Concat)*`, left-associative.
    fn product(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = self.concat_expr()?;

        loop {
            let op = if self.match_kind(TokenKind::Star) {
                ArithOp::Mul
            } else if self.match_kind(TokenKind::Divide) {
                ArithOp::Div
            } else if self.match_kind(TokenKind::Mod) {
                ArithOp::Mod
            } else {
                break;
            };

            let right = self.concat_expr()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Arith(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    /// `Unary ((|,&) Unary)*` — bar/ampersand concatenation.
    fn concat_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.unary()?;
        if !self.check(TokenKind::Bar) && !self.check(TokenKind::Ampersand) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut items = vec![first];
        while self.match_kind(TokenKind::Bar) || self.match_kind(TokenKind::Ampersand) {
            let item = self.unary()?;
            span = span.merge(item.span);
            items.push(item);
        }
        Ok(Spanned::new(Expr::Concat(items), span))
    }

    /// `(not|-|exists|not exists) Unary` or fallthrough to `cast_expr`.
    fn unary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let Some(op) = self.peek().kind.unary_op() else {
            return self.cast_expr();
        };

        let op_token = self.advance();
        let operand = self.unary()?;
        let span = op_token.span.merge(operand.span);
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    /// `Reference (as Identifier)?` — at most one cast.
    fn cast_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let expr = self.reference()?;
        if !self.match_kind(TokenKind::As) {
            return Ok(expr);
        }

        let name = self.expect(TokenKind::Identifier)?;
        let span = expr.span.merge(name.span);
        Ok(Spanned::new(
            Expr::Cast {
                expr: Box::new(expr),
                type_name: name.value.unwrap_or_default(),
            },
            span,
        ))
    }

    /// `Property (of Reference)?` — right-recursive, so
    /// `name of parent of grandparent` nests to the right.
    fn reference(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let name = self.property()?;
        if !self.match_kind(TokenKind::Of) {
            return Ok(name);
        }

        let of = self.reference()?;
        let span = name.span.merge(of.span);
        Ok(Spanned::new(
            Expr::Reference {
                name: Box::new(name),
                of: Some(Box::new(of)),
            },
            span,
        ))
    }

    /// `Index (whose Primary)*` — left-to-right chain of filters.
    fn property(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut base = self.index_expr()?;

        while self.match_kind(TokenKind::Whose) {
            let predicate = self.primary()?;
            let span = base.span.merge(predicate.span);
            base = Spanned::new(
                Expr::Property {
                    base: Box::new(base),
                    predicate: Box::new(predicate),
                },
                span,
            );
        }

        Ok(base)
    }

    /// Reserved level for future indexed-access forms.
    fn index_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.primary()
    }

    /// `( Expr )` | Number | String | Identifier | `it`.
    fn primary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        if self.peek().kind.is_lexical_error() {
            return Err(SyntaxError::invalid_token(self.peek()));
        }

        match self.peek().kind {
            TokenKind::OpenParen => {
                let open = self.advance();
                let inner = self.expression()?;
                let close = self.expect(TokenKind::CloseParen)?;
                // The group's span covers the parentheses.
                Ok(Spanned::new(inner.node, open.span.merge(close.span)))
            }
            TokenKind::Number => {
                let token = self.advance();
                let digits = token.value.as_deref().unwrap_or_default();
                let number = digits
                    .parse::<u64>()
                    .map_err(|_| SyntaxError::number_too_large(&token))?;
                Ok(Spanned::new(Expr::Number(number), token.span))
            }
            TokenKind::String => {
                let token = self.advance();
                Ok(Spanned::new(Expr::String(token.value.unwrap_or_default()), token.span))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Spanned::new(
                    Expr::Identifier(token.value.unwrap_or_default()),
                    token.span,
                ))
            }
            TokenKind::It => {
                let token = self.advance();
                Ok(Spanned::new(Expr::It, token.span))
            }
            _ => Err(SyntaxError::expected(PRIMARY_STARTS, self.peek())),
        }
    }
}

/// Parse a relevance expression into an AST.
///
/// This is the main public entrypoint: it owns the whole
/// scanner → keyword matcher → lexer → parser pipeline for one source string.
///
/// ## Errors
/// Returns a [`SyntaxError`] naming the offending token, its span, and the
/// expected token kinds. Parsing is pure and deterministic, so retrying on
/// the same input cannot succeed.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Spanned<Expr>, SyntaxError> {
    Parser::new(Lexer::new(source)).parse()
}
