//! Source code pane rendering with syntax highlighting
//!
//! Highlighting reuses the crate's own tokenizer output rather than a
//! separate scanner, so the colors always agree with how the parser sees
//! the text: constants, functions and variables get distinct colors, and
//! characters the lexer rejected are painted in the error color.
//!
//! The line holding a parse error, if any, gets a red line number and an
//! underlined body.

use super::utils::{pane_block, visible_height, visible_window};
use crate::parser::lexer::{LexWarning, Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Const => Style::default()
            .fg(DEFAULT_THEME.constant)
            .add_modifier(Modifier::BOLD),
        TokenKind::Func => Style::default().fg(DEFAULT_THEME.function),
        TokenKind::Var => Style::default().fg(DEFAULT_THEME.variable),
        TokenKind::LParen | TokenKind::RParen => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Eof => Style::default(),
        _ => Style::default().fg(DEFAULT_THEME.operator),
    }
}

/// Style every character of source line `line_num` (1-based) from the
/// tokens and warnings that start on it, then merge runs of equal style.
fn highlight_line(
    line: &str,
    line_num: usize,
    tokens: &[Token],
    warnings: &[LexWarning],
) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];

    for token in tokens.iter().filter(|t| t.location.line == line_num) {
        let start = token.location.column.saturating_sub(1);
        let end = (start + token.text.chars().count()).min(chars.len());
        for style in styles.iter_mut().take(end).skip(start) {
            *style = token_style(token.kind);
        }
    }

    for warning in warnings.iter().filter(|w| w.location.line == line_num) {
        if let Some(style) = styles.get_mut(warning.location.column.saturating_sub(1)) {
            *style = Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (ch, style) in chars.into_iter().zip(styles) {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}

/// Render the source code pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    warnings: &[LexWarning],
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source ", is_focused);

    let all_lines: Vec<Line> = source_code
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line, line_num, tokens, warnings);
            if is_error {
                for span in &mut content.spans {
                    span.style = span.style.add_modifier(Modifier::UNDERLINED);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let visible_lines = visible_window(all_lines, visible_height(area), scroll_offset);

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_highlight_groups_runs() {
        let source = "x = 10 # y";
        let mut tokenizer = tokenize(source);
        let tokens: Vec<Token> = tokenizer.by_ref().collect();
        let line = highlight_line(source, 1, &tokens, tokenizer.warnings());

        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["x", " ", "=", " ", "10", " ", "#", " ", "y"]);
        assert_eq!(line.spans[0].style, token_style(TokenKind::Var));
        assert_eq!(line.spans[4].style, token_style(TokenKind::Number));
        assert_eq!(line.spans[6].style.fg, Some(DEFAULT_THEME.error));
    }
}
