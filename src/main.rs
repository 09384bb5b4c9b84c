// hocviz: parse hoc expressions and visualize their syntax trees

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use hocviz::parser::lexer::{tokenize, Token};
use hocviz::parser::parser::Parser;
use hocviz::render::render_program;
use hocviz::ui::App;

#[derive(clap::Parser)]
#[command(version, about = "Parse hoc expressions and render their syntax trees")]
struct Cli {
    /// Source file to read
    #[arg(required_unless_present = "eval")]
    file: Option<PathBuf>,

    /// Use EXPR as the source text instead of reading a file
    #[arg(short = 'e', long = "eval", value_name = "EXPR", conflicts_with = "file")]
    eval: Option<String>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print each parsed statement
    #[arg(long)]
    ast: bool,

    /// Write the syntax graph in Graphviz DOT format to PATH
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,
}

impl Cli {
    /// Any print or write flag turns the viewer off.
    fn is_batch(&self) -> bool {
        self.tokens || self.ast || self.dot.is_some()
    }
}

fn read_source(cli: &Cli) -> io::Result<String> {
    match (&cli.eval, &cli.file) {
        (Some(expr), _) => Ok(expr.clone()),
        (None, Some(path)) => fs::read_to_string(path),
        (None, None) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no input file or expression given",
        )),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            match &cli.file {
                Some(path) => eprintln!("Error reading {}: {}", path.display(), e),
                None => eprintln!("Error: {}", e),
            }
            process::exit(1);
        }
    };

    if cli.is_batch() {
        run_batch(&cli, &source)
    } else {
        run_viewer(source)
    }
}

/// Print and write what the flags ask for, without the TUI.
fn run_batch(cli: &Cli, source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut tokenizer = tokenize(source);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();

    for warning in tokenizer.warnings() {
        eprintln!("Warning: {}", warning);
    }

    if cli.tokens {
        for token in &tokens {
            println!(
                "{}:{}\t{}",
                token.location.line, token.location.column, token
            );
        }
    }

    let statements = match Parser::new(tokens).parse() {
        Ok(statements) => statements,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if cli.ast {
        for statement in &statements {
            println!("{}", statement);
        }
    }

    if let Some(path) = &cli.dot {
        let graph = render_program(&statements);
        fs::write(path, graph.to_dot())?;
        eprintln!(
            "Wrote {} nodes for {} statement(s) to {}",
            graph.nodes.len(),
            statements.len(),
            path.display()
        );
    }

    Ok(())
}

fn run_viewer(source: String) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(source);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
