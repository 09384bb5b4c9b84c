//! Graph pane rendering
//!
//! Lays the rendered graph out as text: one tree per root node, children in
//! edge order, edge labels in front of the child they lead to.

use super::utils::{branch, pane_block, visible_height, visible_window};
use crate::render::graph::{Edge, Graph, GraphNode, NodeId};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use rustc_hash::FxHashMap;

fn describe(node: &GraphNode) -> String {
    let mut text = format!("{} {}", node.id, node.label);
    match (node.style.shape, node.style.color) {
        (Some(shape), Some(color)) => text.push_str(&format!(" ({}, {})", shape.as_str(), color)),
        (Some(shape), None) => text.push_str(&format!(" ({})", shape.as_str())),
        (None, Some(color)) => text.push_str(&format!(" ({})", color)),
        (None, None) => {}
    }
    text
}

fn push_children(
    lines: &mut Vec<String>,
    nodes: &FxHashMap<NodeId, &GraphNode>,
    adjacency: &FxHashMap<NodeId, Vec<&Edge>>,
    id: NodeId,
    prefix: &str,
) {
    let Some(edges) = adjacency.get(&id) else {
        return;
    };

    for (idx, edge) in edges.iter().enumerate() {
        let Some(node) = nodes.get(&edge.to) else {
            continue;
        };
        let text = match edge.label {
            Some(label) => format!("{}: {}", label, describe(node)),
            None => describe(node),
        };
        let child_prefix = branch(lines, prefix, idx + 1 == edges.len(), &text);
        push_children(lines, nodes, adjacency, edge.to, &child_prefix);
    }
}

/// Text rows for the graph pane
pub fn graph_lines(graph: &Graph) -> Vec<String> {
    let nodes = graph.node_index();
    let adjacency = graph.adjacency();
    let mut lines = Vec::new();

    for root in graph.roots() {
        let Some(node) = nodes.get(&root) else {
            continue;
        };
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(describe(node));
        push_children(&mut lines, &nodes, &adjacency, root, "");
    }

    lines
}

/// Render the graph pane, or the parse error when there is no graph
pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    lines: Result<&[String], &str>,
    node_count: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Graph ({} nodes) ", node_count);
    let block = pane_block(&title, is_focused);

    let paragraph = match lines {
        Ok([]) => Paragraph::new("(empty graph)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment)),
        Ok(lines) => {
            let all_lines: Vec<Line> = lines
                .iter()
                .map(|line| {
                    let style = if line.starts_with('n') {
                        Style::default()
                            .fg(DEFAULT_THEME.secondary)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.fg)
                    };
                    Line::styled(line.clone(), style)
                })
                .collect();
            let visible = visible_window(all_lines, visible_height(area), scroll_offset);
            Paragraph::new(visible).block(block)
        }
        Err(message) => Paragraph::new(message.to_string())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error)),
    };

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use crate::render::render_program;

    #[test]
    fn test_graph_lines() {
        let program = parse_source("a - 1\nb").unwrap();
        let graph = render_program(&program.statements);
        assert_eq!(
            graph_lines(&graph),
            vec![
                "n1 - (circle, green)",
                "├─ left: n2 a (ellipse, blue)",
                "└─ right: n3 1.0",
                "",
                "n4 b (ellipse, blue)",
            ]
        );
    }

    #[test]
    fn test_graph_lines_for_many_statements() {
        let program = parse_source(&"a\n".repeat(2_000)).unwrap();
        let lines = graph_lines(&render_program(&program.statements));
        assert_eq!(lines.len(), 2 * 2_000 - 1);
        assert_eq!(lines.last().map(String::as_str), Some("n2000 a (ellipse, blue)"));
    }
}
