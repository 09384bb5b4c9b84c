// Integration tests for tree-to-graph rendering

use hocviz::parser::parse_source;
use hocviz::render::{render, render_program, Graph, NodeId, RenderState};

fn graph_for(source: &str) -> Graph {
    let program = parse_source(source).expect("Parsing failed");
    render_program(&program.statements)
}

fn labels(graph: &Graph) -> Vec<String> {
    graph.nodes.iter().map(|n| n.label.clone()).collect()
}

#[test]
fn test_rendering_is_repeatable() {
    let program = parse_source("x = sin(y ^ 2) - (3 % z)").unwrap();

    let mut first = RenderState::new();
    let first_root = render(&program.statements[0], &mut first);
    let mut second = RenderState::new();
    let second_root = render(&program.statements[0], &mut second);

    assert_eq!(first_root, second_root);
    assert_eq!(first.graph(), second.graph());
}

#[test]
fn test_label_sequence_follows_preorder() {
    let graph = graph_for("x = sin(y ^ 2) - (3 % z)");
    assert_eq!(
        labels(&graph),
        vec!["=", "x", "-", "sin", "^", "y", "2.0", "( )", "%", "3.0", "z"]
    );
    // Tree: one fewer edge than nodes
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
}

#[test]
fn test_each_statement_is_a_disjoint_subtree() {
    let graph = graph_for("a = 1\nb = 2\n3");
    assert_eq!(graph.roots(), vec![NodeId(1), NodeId(4), NodeId(7)]);
    for edge in &graph.edges {
        let same_statement = (edge.from.0 - 1) / 3 == (edge.to.0 - 1) / 3;
        assert!(same_statement, "edge {:?} crosses statements", edge);
    }
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let graph = graph_for("x = y = z = 0\n-2 ^ 2\nexp(2.3 * log(1.5))");
    let ids: Vec<usize> = graph.nodes.iter().map(|n| n.id.0).collect();
    let expected: Vec<usize> = (1..=graph.nodes.len()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_dot_output() {
    let dot = graph_for("-x").to_dot();
    assert!(dot.starts_with("digraph hoc_ast {\n"));
    assert!(dot.contains("\tn1 [label=\"-\" color=red shape=octagon]\n"));
    assert!(dot.contains("\tn2 [label=\"x\" color=blue shape=ellipse]\n"));
    assert!(dot.contains("\tn1 -> n2\n"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_empty_program_renders_empty_graph() {
    let graph = graph_for("   ");
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}
