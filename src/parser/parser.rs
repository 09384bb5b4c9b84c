//! Main parser
//!
//! This module provides the [`Parser`] struct and its error type.
//!
//! # Grammar
//!
//! ```text
//! statement := VAR '=' assignment | expr
//! assignment := expr                       (VAR '=' ... chains to the right)
//! expr      := factor ('^' expr)? (('+' | '-' | '*' | '/' | '%') factor)*
//! factor    := ('+' | '-') factor
//!            | NUMBER | CONST | VAR
//!            | FUNC '(' expr ')'
//!            | '(' expr ')'
//! ```
//!
//! # Precedence
//!
//! `^` is checked once, right after the first factor of an `expr`, and its
//! right-hand side is a whole `expr`, which makes it right-associative.
//! The five binary operators that follow form one flat, left-associative
//! chain: `2 + 3 * 4` groups as `(2 + 3) * 4`. Unary signs apply to a single
//! factor, so `-2 ^ 2` groups as `(-2) ^ 2`.
//!
//! # Implementation
//!
//! The parser keeps two tokens: `current`, the last token consumed, and
//! `lookahead`, the next one. `accept` consumes the lookahead when it has
//! the requested kind; `expect` does the same but fails otherwise.
//!
//! Nesting is capped at [`MAX_NESTING`] levels, counting groups, calls,
//! unary signs, exponents, assignment chains and the links of a binary
//! chain. Deeper input fails with [`ParseError::NestingTooDeep`].

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Deepest syntax tree the parser will build
pub const MAX_NESTING: usize = 256;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required token was missing
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },
    /// A `/` whose right operand is the literal zero
    DivisionByZero { location: SourceLocation },
    /// The expression nests deeper than [`MAX_NESTING`]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::DivisionByZero { location }
            | ParseError::NestingTooDeep { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Parse error at line {}, column {}: ",
            location.line, location.column
        )?;
        match self {
            ParseError::UnexpectedToken {
                expected, found, ..
            } => write!(f, "expected {}, found {}", expected, found),
            ParseError::DivisionByZero { .. } => write!(f, "division by zero"),
            ParseError::NestingTooDeep { limit, .. } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a token stream
pub struct Parser<I>
where
    I: Iterator<Item = Token>,
{
    tokens: I,
    current: Token,
    lookahead: Token,
    depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        let start = SourceLocation::new(1, 1);
        let mut parser = Self {
            tokens: tokens.into_iter(),
            current: Token::eof(start),
            lookahead: Token::eof(start),
            depth: 0,
        };
        parser.lookahead = parser.pull();
        parser
    }

    /// Parse every statement until the tokens run out.
    pub fn parse(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::Eof) {
            let statement = self.parse_statement()?;
            log::debug!("parsed statement {}: {}", statements.len() + 1, statement);
            statements.push(statement);
        }

        Ok(statements)
    }

    /// Parse a statement: an assignment when a variable is directly followed
    /// by `=`, an expression otherwise.
    fn parse_statement(&mut self) -> Result<Expr, ParseError> {
        if self.accept(TokenKind::Var) {
            let target = Variable::new(self.current.text.clone());
            if self.check(TokenKind::Eq) {
                return self.parse_assignment(target);
            }
            return self.parse_expr_from(Expr::Variable(target));
        }

        self.parse_expr()
    }

    /// Parse `'=' expr`, absorbing `var '=' ...` chains on the right.
    fn parse_assignment(&mut self, target: Variable) -> Result<Expr, ParseError> {
        self.expect(TokenKind::Eq)?;

        let value = match self.parse_expr()? {
            Expr::Variable(next) if self.check(TokenKind::Eq) => {
                self.nested(|parser| parser.parse_assignment(next))?
            }
            value => value,
        };

        Ok(Expr::Assignment {
            target,
            value: Box::new(value),
        })
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            let first = parser.parse_factor()?;
            parser.parse_expr_from(first)
        })
    }

    /// Continue an `expr` whose first factor is already parsed.
    fn parse_expr_from(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut left = first;

        if self.accept(TokenKind::Caret) {
            let exponent = self.parse_expr()?;
            left = Expr::Exponentiation {
                base: Box::new(left),
                exponent: Box::new(exponent),
            };
        }

        let outer = self.depth;
        let chain = self.parse_chain(left);
        self.depth = outer;
        chain
    }

    /// Parse the flat `op factor` run. Each link nests one level deeper,
    /// which the caller undoes.
    fn parse_chain(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut left = first;

        while let Some(op) = self.accept_binary_op() {
            let loc = self.current.location;
            if self.depth >= MAX_NESTING {
                return Err(self.too_deep(loc));
            }
            self.depth += 1;
            let right = self.parse_factor()?;

            if op == BinaryOp::Div && matches!(right, Expr::Number(n) if n == 0.0) {
                return Err(ParseError::DivisionByZero { location: loc });
            }

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse factor (signs, literals, constants, variables, calls, groups)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        if self.accept(TokenKind::Plus) || self.accept(TokenKind::Minus) {
            let op = if self.current.kind == TokenKind::Plus {
                UnaryOp::Plus
            } else {
                UnaryOp::Minus
            };
            let operand = self.nested(|parser| parser.parse_factor())?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        if self.accept(TokenKind::Number) {
            let value = self
                .current
                .text
                .parse::<f64>()
                .map_err(|_| self.error_at_current("number"))?;
            return Ok(Expr::Number(value));
        }

        if self.accept(TokenKind::Const) {
            let constant = Constant::from_name(&self.current.text)
                .ok_or_else(|| self.error_at_current("constant"))?;
            return Ok(Expr::Number(constant.value()));
        }

        if self.accept(TokenKind::Func) {
            let builtin = Builtin::from_name(&self.current.text)
                .ok_or_else(|| self.error_at_current("function"))?;
            self.expect(TokenKind::LParen)?;
            let argument = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            return Ok(Expr::Function {
                builtin,
                argument: Box::new(argument),
            });
        }

        if self.accept(TokenKind::Var) {
            return Ok(Expr::Variable(Variable::new(self.current.text.clone())));
        }

        if self.accept(TokenKind::LParen) {
            let inner = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            return Ok(Expr::Parentheses(Box::new(inner)));
        }

        Err(self.unexpected("number, constant, variable, function or '('"))
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.too_deep(self.lookahead.location));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn too_deep(&self, location: SourceLocation) -> ParseError {
        ParseError::NestingTooDeep {
            limit: MAX_NESTING,
            location,
        }
    }

    fn accept_binary_op(&mut self) -> Option<BinaryOp> {
        let op = match self.lookahead.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.accept(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    fn advance(&mut self) {
        let next = self.pull();
        self.current = std::mem::replace(&mut self.lookahead, next);
    }

    /// Next token from the stream, or an end marker right after the last one.
    fn pull(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => token,
            None => {
                let last = if self.lookahead.kind == TokenKind::Eof {
                    &self.current
                } else {
                    &self.lookahead
                };
                let mut end = last.location;
                end.column += last.text.chars().count();
                Token::eof(end)
            }
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.lookahead.to_string(),
            location: self.lookahead.location,
        }
    }

    fn error_at_current(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current.to_string(),
            location: self.current.location,
        }
    }
}
