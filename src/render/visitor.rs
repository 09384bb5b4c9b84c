//! Tree-to-graph rendering
//!
//! [`render`] walks one expression depth-first. Each node is registered in
//! the graph before any of its children, children are then rendered left to
//! right and joined to their parent by an edge. The id of the node is
//! returned so the caller can draw the edge that points at it.
//!
//! Ids come from the [`RenderState`] counter. Rendering several statements
//! with the same state produces one disjoint subtree per statement in a
//! single graph.

use super::graph::{Graph, NodeId, NodeStyle, Shape};
use crate::parser::ast::{format_number, Expr, Variable};

const VARIABLE_STYLE: NodeStyle = NodeStyle::new(Shape::Ellipse, "blue");
const BINARY_STYLE: NodeStyle = NodeStyle::new(Shape::Circle, "green");
const UNARY_STYLE: NodeStyle = NodeStyle::new(Shape::Octagon, "red");
const FUNCTION_STYLE: NodeStyle = NodeStyle::new(Shape::Box, "purple");

/// Id counter and graph buffer for one traversal (or one batch of them)
#[derive(Debug, Default)]
pub struct RenderState {
    last_id: usize,
    graph: Graph,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        self.last_id += 1;
        NodeId(self.last_id)
    }

    fn node(&mut self, label: impl Into<String>, style: NodeStyle) -> NodeId {
        let id = self.allocate();
        self.graph.add_node(id, label, style);
        id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Render `expr` into `state` and return the id of its root node.
pub fn render(expr: &Expr, state: &mut RenderState) -> NodeId {
    match expr {
        Expr::Number(value) => state.node(format_number(*value), NodeStyle::DEFAULT),
        Expr::Variable(var) => render_variable(var, state),
        Expr::Assignment { target, value } => {
            let id = state.node("=", NodeStyle::DEFAULT);
            let target = render_variable(target, state);
            state.graph.add_edge(id, target, None);
            let value = render(value, state);
            state.graph.add_edge(id, value, None);
            id
        }
        Expr::Unary { op, operand } => {
            let id = state.node(op.symbol(), UNARY_STYLE);
            let operand = render(operand, state);
            state.graph.add_edge(id, operand, None);
            id
        }
        Expr::Binary { op, left, right } => {
            let id = state.node(op.symbol(), BINARY_STYLE);
            let left = render(left, state);
            state.graph.add_edge(id, left, Some("left"));
            let right = render(right, state);
            state.graph.add_edge(id, right, Some("right"));
            id
        }
        Expr::Exponentiation { base, exponent } => {
            let id = state.node("^", BINARY_STYLE);
            let base = render(base, state);
            state.graph.add_edge(id, base, Some("base"));
            let exponent = render(exponent, state);
            state.graph.add_edge(id, exponent, Some("exponent"));
            id
        }
        Expr::Function { builtin, argument } => {
            let id = state.node(builtin.name(), FUNCTION_STYLE);
            let argument = render(argument, state);
            state.graph.add_edge(id, argument, None);
            id
        }
        Expr::Parentheses(inner) => {
            let id = state.node("( )", NodeStyle::DEFAULT);
            let inner = render(inner, state);
            state.graph.add_edge(id, inner, None);
            id
        }
    }
}

fn render_variable(var: &Variable, state: &mut RenderState) -> NodeId {
    state.node(var.name.as_str(), VARIABLE_STYLE)
}

/// Render all statements into one graph, in order.
pub fn render_program(statements: &[Expr]) -> Graph {
    let mut state = RenderState::new();
    for statement in statements {
        let root = render(statement, &mut state);
        log::debug!("rendered statement rooted at {}", root);
    }
    state.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinaryOp, Builtin, UnaryOp};
    use crate::render::graph::Edge;

    fn labels(graph: &Graph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_first_id_is_n1() {
        let mut state = RenderState::new();
        let id = render(&Expr::Number(2.0), &mut state);
        assert_eq!(id, NodeId(1));
        assert_eq!(id.to_string(), "n1");
        assert_eq!(labels(state.graph()), vec!["2.0"]);
    }

    #[test]
    fn test_binary_is_preorder_with_labeled_edges() {
        let expr = Expr::binary(BinaryOp::Sub, Expr::variable("a"), Expr::Number(1.0));
        let mut state = RenderState::new();
        let root = render(&expr, &mut state);
        let graph = state.into_graph();

        assert_eq!(root, NodeId(1));
        assert_eq!(labels(&graph), vec!["-", "a", "1.0"]);
        assert_eq!(graph.nodes[0].style, BINARY_STYLE);
        assert_eq!(graph.nodes[1].style, VARIABLE_STYLE);
        assert_eq!(
            graph.edges,
            vec![
                Edge { from: NodeId(1), to: NodeId(2), label: Some("left") },
                Edge { from: NodeId(1), to: NodeId(3), label: Some("right") },
            ]
        );
    }

    #[test]
    fn test_nested_ids_follow_traversal_order() {
        // x = -(y ^ 2)
        let expr = Expr::assignment(
            "x",
            Expr::unary(
                UnaryOp::Minus,
                Expr::parentheses(Expr::exponentiation(Expr::variable("y"), Expr::Number(2.0))),
            ),
        );
        let graph = render_program(&[expr]);

        assert_eq!(labels(&graph), vec!["=", "x", "-", "( )", "^", "y", "2.0"]);
        let pairs: Vec<(usize, usize)> = graph.edges.iter().map(|e| (e.from.0, e.to.0)).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (3, 4), (4, 5), (5, 6), (5, 7)]);
        assert_eq!(graph.nodes[2].style, UNARY_STYLE);
    }

    #[test]
    fn test_function_node() {
        let graph = render_program(&[Expr::function(Builtin::Cos, Expr::variable("t"))]);
        assert_eq!(labels(&graph), vec!["cos", "t"]);
        assert_eq!(graph.nodes[0].style, FUNCTION_STYLE);
        assert_eq!(graph.edges[0].label, None);
    }

    #[test]
    fn test_statements_share_one_counter() {
        let statements = vec![
            Expr::assignment("x", Expr::Number(1.0)),
            Expr::variable("x"),
        ];
        let graph = render_program(&statements);
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.roots(), vec![NodeId(1), NodeId(4)]);
    }
}
