//! Shared helpers for the list-style panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane block, highlighted when focused
pub fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Number of content rows inside a bordered pane, at least 1
pub fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `scroll_offset` so the window never runs past the last item, then
/// return the visible slice of `items`.
pub fn visible_window<T>(items: Vec<T>, height: usize, scroll_offset: &mut usize) -> Vec<T> {
    let total_items = items.len();

    if total_items > height {
        let max_scroll = total_items - height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    items.into_iter().skip(*scroll_offset).take(height).collect()
}

/// Append `text` as a child line under `prefix` and return the prefix its
/// own children should use.
pub fn branch(lines: &mut Vec<String>, prefix: &str, is_last: bool, text: &str) -> String {
    let (glyph, continuation) = if is_last {
        ("└─ ", "   ")
    } else {
        ("├─ ", "│  ")
    };
    lines.push(format!("{}{}{}", prefix, glyph, text));
    format!("{}{}", prefix, continuation)
}
