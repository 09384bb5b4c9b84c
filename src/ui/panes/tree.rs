//! AST pane rendering
//!
//! Each statement is drawn as an indented tree, headed by its source form.

use super::utils::{branch, pane_block, visible_height, visible_window};
use crate::parser::ast::{format_number, Expr, Variable};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

fn describe(expr: &Expr) -> String {
    match expr {
        Expr::Number(value) => format!("Number {}", format_number(*value)),
        Expr::Variable(var) => format!("Variable {}", var.name),
        Expr::Assignment { .. } => "Assignment".to_string(),
        Expr::Unary { op, .. } => format!("Unary {}", op.symbol()),
        Expr::Binary { op, .. } => format!("Binary {}", op.symbol()),
        Expr::Exponentiation { .. } => "Exponentiation".to_string(),
        Expr::Function { builtin, .. } => format!("Function {}", builtin.name()),
        Expr::Parentheses(_) => "Parentheses".to_string(),
    }
}

/// A child slot of an AST node; assignment targets are not expressions.
enum Child<'a> {
    Expr(&'a Expr),
    Target(&'a Variable),
}

fn children(expr: &Expr) -> Vec<(&'static str, Child<'_>)> {
    match expr {
        Expr::Number(_) | Expr::Variable(_) => Vec::new(),
        Expr::Assignment { target, value } => vec![
            ("target", Child::Target(target)),
            ("value", Child::Expr(value)),
        ],
        Expr::Unary { operand, .. } => vec![("operand", Child::Expr(operand))],
        Expr::Binary { left, right, .. } => {
            vec![("left", Child::Expr(left)), ("right", Child::Expr(right))]
        }
        Expr::Exponentiation { base, exponent } => {
            vec![("base", Child::Expr(base)), ("exponent", Child::Expr(exponent))]
        }
        Expr::Function { argument, .. } => vec![("argument", Child::Expr(argument))],
        Expr::Parentheses(inner) => vec![("inner", Child::Expr(inner))],
    }
}

fn push_children(lines: &mut Vec<String>, expr: &Expr, prefix: &str) {
    let kids = children(expr);
    let count = kids.len();
    for (idx, (role, child)) in kids.into_iter().enumerate() {
        let is_last = idx + 1 == count;
        match child {
            Child::Expr(child) => {
                let text = format!("{}: {}", role, describe(child));
                let child_prefix = branch(lines, prefix, is_last, &text);
                push_children(lines, child, &child_prefix);
            }
            Child::Target(var) => {
                branch(lines, prefix, is_last, &format!("{}: Variable {}", role, var.name));
            }
        }
    }
}

/// Text rows for the AST pane
pub fn ast_lines(statements: &[Expr]) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, statement) in statements.iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.push(format!("[{}] {}", idx + 1, statement));
        lines.push(describe(statement));
        push_children(&mut lines, statement, "");
    }
    lines
}

/// Render the AST pane, or the parse error when there is no tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: Result<&[String], &str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" AST ", is_focused);

    let paragraph = match lines {
        Ok([]) => Paragraph::new("(no statements)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment)),
        Ok(lines) => {
            let all_lines: Vec<Line> = lines
                .iter()
                .map(|line| {
                    if line.starts_with('[') {
                        Line::styled(
                            line.clone(),
                            Style::default()
                                .fg(DEFAULT_THEME.secondary)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Line::styled(line.clone(), Style::default().fg(DEFAULT_THEME.fg))
                    }
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
