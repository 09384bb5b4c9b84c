//! Token stream pane rendering

use super::utils::{pane_block, visible_height, visible_window};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

fn kind_color(kind: TokenKind) -> ratatui::style::Color {
    match kind {
        TokenKind::Number => DEFAULT_THEME.number,
        TokenKind::Const => DEFAULT_THEME.constant,
        TokenKind::Func => DEFAULT_THEME.function,
        TokenKind::Var => DEFAULT_THEME.variable,
        _ => DEFAULT_THEME.operator,
    }
}

/// Render the token list, one `line:column  token` entry per row
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = tokens
        .iter()
        .map(|token| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(token.to_string(), Style::default().fg(kind_color(token.kind))),
            ]))
        })
        .collect();

    let visible_items = visible_window(all_items, visible_height(area), scroll_offset);
    frame.render_widget(List::new(visible_items).block(block), area);
}
