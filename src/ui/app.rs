//! Main TUI application state and logic

use crate::parser::lexer::{tokenize, LexWarning, Token};
use crate::parser::parser::{ParseError, Parser};
use crate::render::render_program;
use crate::ui::panes::{ast_lines, graph_lines};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
    Graph,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> graph -> ast)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Graph,
            FocusedPane::Graph => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Graph => FocusedPane::Tokens,
            FocusedPane::Ast => FocusedPane::Graph,
        }
    }
}

/// Everything derived from a successful parse, preformatted for display
pub struct ParsedView {
    pub statement_count: usize,
    pub node_count: usize,
    pub ast_lines: Vec<String>,
    pub graph_lines: Vec<String>,
}

/// The main application state
pub struct App {
    /// The source text being inspected
    pub source_code: String,

    pub tokens: Vec<Token>,
    pub warnings: Vec<LexWarning>,

    /// Parse outcome: the display rows, or the error that stopped the parser
    pub parsed: Result<ParsedView, ParseError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub ast_scroll: usize,
    pub graph_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Tokenize, parse and render `source_code` up front.
    pub fn new(source_code: String) -> Self {
        let mut tokenizer = tokenize(&source_code);
        let tokens: Vec<Token> = tokenizer.by_ref().collect();
        let warnings = tokenizer.into_warnings();

        let parsed = Parser::new(tokens.iter().cloned())
            .parse()
            .map(|statements| {
                let graph = render_program(&statements);
                ParsedView {
                    statement_count: statements.len(),
                    node_count: graph.nodes.len(),
                    ast_lines: ast_lines(&statements),
                    graph_lines: graph_lines(&graph),
                }
            });

        let status_message = match (&parsed, warnings.first()) {
            (Err(err), _) => err.to_string(),
            (Ok(_), Some(warning)) => warning.to_string(),
            (Ok(_), None) => String::from("Parsed successfully"),
        };

        App {
            source_code,
            tokens,
            warnings,
            parsed,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            ast_scroll: 0,
            graph_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Tokens (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: AST (top) | Graph (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let error_line = self.parsed.as_ref().err().map(|e| e.location().line);
        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &self.tokens,
            &self.warnings,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let error_text = self.parsed.as_ref().err().map(|e| e.to_string());
        let (ast, graph, node_count) = match (&self.parsed, error_text.as_deref()) {
            (Ok(view), _) => (
                Ok(view.ast_lines.as_slice()),
                Ok(view.graph_lines.as_slice()),
                view.node_count,
            ),
            (Err(_), message) => {
                let message = message.unwrap_or_default();
                (Err(message), Err(message), 0)
            }
        };

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            ast,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_graph_pane(
            frame,
            right_rows[1],
            graph,
            node_count,
            self.focused_pane == FocusedPane::Graph,
            &mut self.graph_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.parsed.as_ref().ok().map(|view| view.statement_count),
            self.warnings.len(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Ast => &mut self.ast_scroll,
            FocusedPane::Graph => &mut self.graph_scroll,
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_new_app_parses_source() {
        let app = App::new("x = 1\ny ^ 2".to_string());
        assert_eq!(app.tokens.len(), 6);
        let view = app.parsed.as_ref().unwrap();
        assert_eq!(view.statement_count, 2);
        assert_eq!(view.node_count, 6);
        assert_eq!(app.status_message, "Parsed successfully");
    }

    #[test]
    fn test_new_app_keeps_parse_error() {
        let app = App::new("(1 + 2".to_string());
        assert!(app.parsed.is_err());
        assert!(app.status_message.contains("expected ')'"));
    }

    #[test]
    fn test_focus_and_scroll_keys() {
        let mut app = App::new("1".to_string());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, PAGE - 1);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
