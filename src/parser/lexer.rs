//! Lexer (tokenizer) for hoc expressions
//!
//! Converts raw source text into a lazy [`Token`] stream consumed by the parser.
//! Identifiers are classified as soon as they are scanned: constant names
//! become [`TokenKind::Const`], built-in function names become
//! [`TokenKind::Func`], everything else is a [`TokenKind::Var`].
//!
//! The lexer never fails. A character that starts no token is reported as a
//! [`LexWarning`] and dropped, and scanning carries on with the next one.

use super::ast::{Builtin, Constant, SourceLocation};
use std::fmt;
use std::iter::FusedIterator;

/// The lexical category of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals and identifiers
    Number,
    Const,
    Func,
    Var,

    // Operators
    Caret,   // ^
    Percent, // %
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Eq,      // =

    // Punctuation
    LParen, // (
    RParen, // )

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Const => write!(f, "constant"),
            TokenKind::Func => write!(f, "function"),
            TokenKind::Var => write!(f, "variable"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A classified lexical unit with its exact source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// The end-of-input marker, placed where the input stops.
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Const | TokenKind::Func | TokenKind::Var => {
                write!(f, "{} '{}'", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// A character the lexer could not place in any token.
#[derive(Debug, Clone, PartialEq)]
pub struct LexWarning {
    pub character: char,
    pub location: SourceLocation,
}

impl fmt::Display for LexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Illegal character '{}' at line {}, column {}",
            self.character, self.location.line, self.location.column
        )
    }
}

/// Start a lazy scan of `source`.
pub fn tokenize(source: &str) -> Tokenizer {
    Tokenizer::new(source)
}

/// Single-pass token iterator over a source text.
///
/// Rescanning means creating a new tokenizer. Warnings accumulate while the
/// iterator is driven and can be read at any point.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    warnings: Vec<LexWarning>,
}

impl Tokenizer {
    /// Create a new tokenizer for the given source string.
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            warnings: Vec::new(),
        }
    }

    /// Warnings raised so far
    pub fn warnings(&self) -> &[LexWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<LexWarning> {
        self.warnings
    }

    /// Location one past the last character consumed.
    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn operator(&self, ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '^' => TokenKind::Caret,
            '%' => TokenKind::Percent,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '=' => TokenKind::Eq,
            _ => return None,
        };
        Some(kind)
    }

    /// Scan an identifier and classify it against the constant table, then
    /// the builtin table.
    fn identifier(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if Constant::from_name(&ident).is_some() {
            TokenKind::Const
        } else if Builtin::from_name(&ident).is_some() {
            TokenKind::Func
        } else {
            TokenKind::Var
        };

        Token::new(kind, ident, loc)
    }

    /// Scan `digits ('.' digits)? ([Ee] [+-]? digits)?`.
    ///
    /// The fraction and exponent are only taken when digits follow; otherwise
    /// the `.` or `e` is left for the next token.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let signed = matches!(self.peek_ahead(1), Some('+') | Some('-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(ch) = self.advance() {
                        num_str.push(ch);
                    }
                }
                self.take_digits(&mut num_str);
            }
        }

        Token::new(TokenKind::Number, num_str, loc)
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn warn(&mut self, character: char, location: SourceLocation) {
        let warning = LexWarning {
            character,
            location,
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();

            let loc = self.current_location();
            let ch = self.advance()?;

            let token = match ch {
                'a'..='z' | 'A'..='Z' | '_' => self.identifier(ch, loc),
                '0'..='9' => self.number_literal(ch, loc),
                _ => match self.operator(ch) {
                    Some(kind) => Token::new(kind, ch.to_string(), loc),
                    None => {
                        self.warn(ch, loc);
                        continue;
                    }
                },
            };

            return Some(token);
        }
    }
}

impl FusedIterator for Tokenizer {}
