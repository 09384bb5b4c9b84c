//! hoc source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → lazy token stream)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! One statement per expression, separated by whitespace or newlines:
//! - Numbers with optional fraction and exponent (`1.5`, `2e-3`)
//! - Operators `+ - * / %` (one flat, left-associative level) and `^`
//!   (right-associative, binds tighter)
//! - Unary `+` and `-`
//! - Constants `PI`, `E`, `GAMMA`, `DEG`, `PHI`
//! - Built-ins `sin cos atan log log10 exp sqrt abs int`, one argument each
//! - Chained assignment `x = y = 0`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with two tokens of state.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;

use ast::Program;
use lexer::tokenize;
use parser::{ParseError, Parser};

/// Tokenize and parse `source` in one go.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let mut tokenizer = tokenize(source);
    let statements = Parser::new(&mut tokenizer).parse()?;

    Ok(Program {
        statements,
        warnings: tokenizer.into_warnings(),
    })
}
