//! Renderable graph description
//!
//! A [`Graph`] is a flat list of labeled nodes and directed edges. It is the
//! hand-off point between the tree walk in [`super::visitor`] and whatever
//! displays the result: [`Graph::to_dot`] serializes it for Graphviz, and the
//! terminal viewer walks it through [`Graph::roots`] and [`Graph::children`].

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Identifier of a graph node, displayed as `n<k>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Graphviz node shapes used by the style table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Circle,
    Ellipse,
    Octagon,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Circle => "circle",
            Shape::Ellipse => "ellipse",
            Shape::Octagon => "octagon",
        }
    }
}

/// Per-node visual overrides. `None` falls back to the graph defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: Option<Shape>,
    pub color: Option<&'static str>,
}

impl NodeStyle {
    pub const DEFAULT: NodeStyle = NodeStyle {
        shape: None,
        color: None,
    };

    pub const fn new(shape: Shape, color: &'static str) -> Self {
        Self {
            shape: Some(shape),
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: Option<&'static str>,
}

/// Nodes and edges in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

/// Graph name written in the DOT header
pub const DOT_GRAPH_NAME: &str = "hoc_ast";

const DOT_NODE_DEFAULTS: &str =
    "node [fillcolor=lightblue fontcolor=black shape=box style=filled]";
const DOT_EDGE_DEFAULTS: &str = "edge [arrowhead=none]";

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId, label: impl Into<String>, style: NodeStyle) {
        self.nodes.push(GraphNode {
            id,
            label: label.into(),
            style,
        });
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, label: Option<&'static str>) {
        self.edges.push(Edge { from, to, label });
    }

    /// Every node keyed by its id.
    pub fn node_index(&self) -> FxHashMap<NodeId, &GraphNode> {
        self.nodes.iter().map(|n| (n.id, n)).collect()
    }

    /// Nodes without an incoming edge, in insertion order.
    pub fn roots(&self) -> Vec<NodeId> {
        let targets: FxHashSet<NodeId> = self.edges.iter().map(|e| e.to).collect();
        self.nodes
            .iter()
            .map(|n| n.id)
            .filter(|id| !targets.contains(id))
            .collect()
    }

    /// Outgoing edges of every node, each list in insertion order.
    pub fn adjacency(&self) -> FxHashMap<NodeId, Vec<&Edge>> {
        let mut adjacency: FxHashMap<NodeId, Vec<&Edge>> = FxHashMap::default();
        for edge in &self.edges {
            adjacency.entry(edge.from).or_default().push(edge);
        }
        adjacency
    }

    /// Outgoing edges of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.from == id).collect()
    }

    /// Serialize as a Graphviz `digraph`.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dot(&mut out);
        out
    }

    pub fn write_dot(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "digraph {} {{", DOT_GRAPH_NAME)?;
        writeln!(out, "\t{}", DOT_NODE_DEFAULTS)?;
        writeln!(out, "\t{}", DOT_EDGE_DEFAULTS)?;

        for node in &self.nodes {
            write!(out, "\t{} [label={}", node.id, quote(&node.label))?;
            if let Some(color) = node.style.color {
                write!(out, " color={}", color)?;
            }
            if let Some(shape) = node.style.shape {
                write!(out, " shape={}", shape.as_str())?;
            }
            writeln!(out, "]")?;
        }

        for edge in &self.edges {
            write!(out, "\t{} -> {}", edge.from, edge.to)?;
            if let Some(label) = edge.label {
                write!(out, " [label={}]", quote(label))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "}}")
    }
}

/// Quote a DOT string, escaping `"` and `\`.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(NodeId(1), "+", NodeStyle::new(Shape::Circle, "green"));
        graph.add_node(NodeId(2), "1.0", NodeStyle::DEFAULT);
        graph.add_node(NodeId(3), "x", NodeStyle::new(Shape::Ellipse, "blue"));
        graph.add_edge(NodeId(1), NodeId(2), Some("left"));
        graph.add_edge(NodeId(1), NodeId(3), Some("right"));
        graph.add_node(NodeId(4), "y", NodeStyle::new(Shape::Ellipse, "blue"));
        graph
    }

    #[test]
    fn test_roots_and_children() {
        let graph = sample();
        assert_eq!(graph.roots(), vec![NodeId(1), NodeId(4)]);

        let children: Vec<NodeId> = graph.children(NodeId(1)).iter().map(|e| e.to).collect();
        assert_eq!(children, vec![NodeId(2), NodeId(3)]);
        assert!(graph.children(NodeId(4)).is_empty());

        let adjacency = graph.adjacency();
        assert_eq!(adjacency[&NodeId(1)].len(), 2);
        assert!(!adjacency.contains_key(&NodeId(2)));
    }

    #[test]
    fn test_node_index() {
        let graph = sample();
        let index = graph.node_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index[&NodeId(3)].label, "x");
        assert!(!index.contains_key(&NodeId(5)));
    }

    #[test]
    fn test_to_dot() {
        let dot = sample().to_dot();
        let expected = "digraph hoc_ast {\n\
            \tnode [fillcolor=lightblue fontcolor=black shape=box style=filled]\n\
            \tedge [arrowhead=none]\n\
            \tn1 [label=\"+\" color=green shape=circle]\n\
            \tn2 [label=\"1.0\"]\n\
            \tn3 [label=\"x\" color=blue shape=ellipse]\n\
            \tn4 [label=\"y\" color=blue shape=ellipse]\n\
            \tn1 -> n2 [label=\"left\"]\n\
            \tn1 -> n3 [label=\"right\"]\n\
            }\n";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
