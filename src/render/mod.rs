//! Syntax tree visualization
//!
//! - [`visitor`]: walks an [`Expr`](crate::parser::ast::Expr) tree and records
//!   one labeled node per AST node
//! - [`graph`]: the resulting node/edge description and its Graphviz DOT form

pub mod graph;
pub mod visitor;

pub use graph::{Edge, Graph, GraphNode, NodeId, NodeStyle, Shape};
pub use visitor::{render, render_program, RenderState};
