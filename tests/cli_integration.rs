use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("hocviz_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_hocviz(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hocviz"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run hocviz")
}

#[test]
fn eval_expression_prints_statements() {
    let dir = TestDir::new("eval_ast");
    let output = run_hocviz(&["-e", "x = y = 2^3\n-a", "--ast"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "x = y = 2.0 ^ 3.0\n-a\n");
}

#[test]
fn tokens_flag_lists_positions() {
    let dir = TestDir::new("tokens");
    let output = run_hocviz(&["-e", "x = sin(PI)", "--tokens"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "unexpected token listing: {stdout}");
    assert!(lines[0].starts_with("1:1\t"), "got: {}", lines[0]);
    assert!(lines[4].starts_with("1:9\t"), "got: {}", lines[4]);
    assert!(lines[4].contains("PI"), "got: {}", lines[4]);
}

#[test]
fn file_input_writes_dot_file() {
    let dir = TestDir::new("file_dot");
    fs::write(dir.path.join("sample.hoc"), "a = 1\nsqrt(a) * 2\n").expect("write sample file");

    let output = run_hocviz(&["sample.hoc", "--dot", "out.dot"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let dot_path = dir.path.join("out.dot");
    assert!(dot_path.is_file(), "expected output file at {dot_path:?}");
    let dot = fs::read_to_string(dot_path).expect("read dot output");
    assert!(dot.starts_with("digraph hoc_ast {"));
    assert!(dot.contains("n1 [label=\"=\"]"));
    assert!(dot.contains("label=\"sqrt\""));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Wrote 7 nodes for 2 statement(s)"),
        "expected summary on stderr, got: {stderr}"
    );
}

#[test]
fn parse_error_exits_with_failure() {
    let dir = TestDir::new("parse_error");
    let output = run_hocviz(&["-e", "(1 + 2", "--ast"], &dir.path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Parse error at line 1, column 7"),
        "expected parse error on stderr, got: {stderr}"
    );
}

#[test]
fn deep_nesting_exits_with_failure() {
    let dir = TestDir::new("deep_nesting");
    let depth = 20_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    fs::write(dir.path.join("deep.hoc"), source).expect("write deep file");

    let output = run_hocviz(&["deep.hoc", "--ast"], &dir.path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("nested deeper than 256 levels"),
        "expected nesting error on stderr, got: {stderr}"
    );
}

#[test]
fn illegal_character_is_reported_but_not_fatal() {
    let dir = TestDir::new("illegal_char");
    let output = run_hocviz(&["-e", "1 & 2", "--ast"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: Illegal character '&'"), "got: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "1.0\n2.0\n");
}

#[test]
fn missing_file_is_reported() {
    let dir = TestDir::new("missing");
    let output = run_hocviz(&["nope.hoc", "--ast"], &dir.path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error reading nope.hoc"), "got: {stderr}");
}
