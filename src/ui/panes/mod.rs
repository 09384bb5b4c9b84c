//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with token-based highlighting and the error line
//! - [`tokens`]: The token stream with source locations
//! - [`tree`]: The AST of every statement as an indented tree
//! - [`graph`]: The rendered node/edge graph, laid out per root
//! - [`status`]: Status bar with keybindings and parse state
//! - `utils`: Shared block, scrolling and tree-drawing helpers
//!
//! Each pane module exports a `render_*` function; the tree and graph panes
//! also export the pure functions that build their text rows.

mod utils;

pub mod graph;
pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use graph::{graph_lines, render_graph_pane};
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{ast_lines, render_tree_pane};
