//! # Introduction
//!
//! hocviz is the front end of a small calculator language: it parses
//! arithmetic statements with constants, built-in functions and chained
//! assignment, and renders each syntax tree as a graph for inspection.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Renderer → Graph (DOT / TUI)
//! ```
//!
//! 1. [`parser`]: tokenises the source lazily and builds one AST per
//!    statement.
//! 2. [`render`]: walks each AST and accumulates labeled nodes and edges in
//!    a [`render::Graph`], which serializes to Graphviz DOT.
//! 3. [`ui`]: ratatui-based viewer for source, tokens, AST and graph; not
//!    part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use hocviz::parser::parse_source;
//! use hocviz::render::render_program;
//!
//! let program = parse_source("x = y = 2 ^ 3").unwrap();
//! let graph = render_program(&program.statements);
//! assert!(graph.to_dot().starts_with("digraph hoc_ast {"));
//! ```

pub mod parser;
pub mod render;
pub mod ui;
